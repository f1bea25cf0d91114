use derive_more::Display;
use serde::{Deserialize, Serialize};

/// An RGB color with 8-bit components. Thumbnail colors are defined directly
/// in `[0, 255]` integers, so there's no float representation here.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
)]
#[display(fmt = "#{:02x}{:02x}{:02x}", red, green, blue)]
pub struct Color3 {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color3 {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Convert this color to a set of 3 bytes: `[red, green, blue]`
    pub fn to_array(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_display() {
        assert_eq!(Color3::new(100, 143, 255).to_string(), "#648fff");
        assert_eq!(Color3::new(0, 10, 1).to_array(), [0, 10, 1]);
    }
}
