use derive_more::Display;

/// A range between two values, inclusive on both ends. Used for the bounded
/// integer fields in this crate, e.g. magnitudes and color shades.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
#[display(fmt = "[{}, {}]", min, max)]
pub struct NumRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: Copy + PartialOrd> NumRange<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Force a value into this range. If it's already in the range, return
    /// that value. If it's outside the range, return the bound (lower or upper)
    /// that's closest to the value.
    pub fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}
