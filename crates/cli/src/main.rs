use anyhow::{anyhow, Context};
use config::{Config, File};
use log::{info, LevelFilter};
use mapgen::{timed, GeneratorConfig, MapGenerator, MapReport, TopologyKind};
use simple_logger::SimpleLogger;
use std::{path::PathBuf, process};
use structopt::StructOpt;

/// CLI for generating terrain maps. With no arguments, this generates the
/// standard circle and square maps under `resources/maps`.
#[derive(Debug, StructOpt)]
#[structopt(name = "mapgen")]
struct Opt {
    /// Path to a config file that customizes generation. Any field missing
    /// from the file falls back to its default. Supported formats: JSON, TOML
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Root directory to write maps to. Each map gets its own subdirectory.
    /// Overrides `output_dir` from the config
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// Only generate the given map shape(s). Supported values: circle, square.
    /// Defaults to every shape that's enabled in the config
    #[structopt(short, long)]
    topology: Vec<TopologyKind>,

    /// Don't render thumbnail previews
    #[structopt(long)]
    no_thumbnail: bool,

    /// Print the full config that would be used, in TOML format, then exit
    /// without generating anything
    #[structopt(long)]
    print_config: bool,

    /// The logging level to use during generation. See
    /// https://docs.rs/log/0.4/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Opt {
    /// Build the generator config from the config file (if any), then apply
    /// CLI overrides on top
    fn generator_config(&self) -> anyhow::Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(config_path) => {
                let mut settings = Config::new();
                let config_path = config_path.to_str().ok_or_else(|| {
                    anyhow!("invalid character in path {:?}", config_path)
                })?;
                settings
                    .merge(File::with_name(config_path))
                    .context("error reading config file")?;
                settings.try_into().context("error reading config")?
            }
            None => GeneratorConfig::default(),
        };

        if let Some(output_dir) = &self.output {
            config.output_dir = output_dir.clone();
        }
        if !self.topology.is_empty() {
            for kind in &[TopologyKind::Circle, TopologyKind::Square] {
                config.set_enabled(*kind, self.topology.contains(kind));
            }
        }
        if self.no_thumbnail {
            config.thumbnail.enabled = false;
        }

        Ok(config)
    }
}

/// Print the land tile counts of a generated map
fn print_summary(report: &MapReport) {
    println!("\nLand tile counts ({} map):", report.kind);
    for raster in &report.rasters {
        println!(
            "  {} ({}): {}",
            raster.level, raster.dimensions, raster.land_tiles
        );
    }
    if let Some(manifest) = &report.manifest {
        println!("Manifest written to {:?}", manifest);
    }
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    let config = opt.generator_config()?;
    if opt.print_config {
        let toml = toml::to_string_pretty(&config)
            .context("error serializing config")?;
        print!("{}", toml);
        return Ok(());
    }

    SimpleLogger::new().with_level(opt.log_level).init()?;

    let generator = MapGenerator::new(config)?;
    let reports =
        timed!("Map generation", log::Level::Info, generator.run())?;
    if reports.is_empty() {
        info!("No map shapes enabled, nothing was generated");
    }
    for report in &reports {
        print_summary(report);
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
