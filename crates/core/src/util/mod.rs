pub mod range;

/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs the elapsed time at the given level (debug by default),
/// and evaluates to the value of the expression.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} ms", $label, elapsed.as_millis());
        value
    }};
}

/// Truncate a float toward zero, then force it into the given integer range.
/// `NaN` maps to the range minimum. This is the one conversion used for every
/// float -> magnitude step, so all of them round the same way.
pub fn truncate_into(value: f64, range: range::NumRange<u8>) -> u8 {
    let truncated = value.trunc();
    if truncated.is_nan() || truncated <= f64::from(range.min) {
        range.min
    } else if truncated >= f64::from(range.max) {
        range.max
    } else {
        truncated as u8
    }
}
