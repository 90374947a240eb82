//! Miscellaneous utility structs and functions.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// A closed interval `[min, max]`.
#[derive(Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval<T> {
    pub min: T,
    pub max: T,
}

impl<T> Interval<T> {
    /// Creates a new interval.
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: PartialOrd> Interval<T> {
    /// Returns true if this interval contains the value.
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// Returns true if `min` does not exceed `max`.
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

impl<T: Ord + Copy> Interval<T> {
    /// Restricts the value to lie within the interval.
    ///
    /// An inverted interval clamps to `min`.
    pub fn clamp(&self, value: T) -> T {
        value.min(self.max).max(self.min)
    }
}

impl<T: Debug> Debug for Interval<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interval({:?}, {:?})", &self.min, &self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::Interval;

    #[test]
    fn clamp_into_bounds() {
        let bounds = Interval::new(3, 15);
        assert_eq!(bounds.clamp(0), 3);
        assert_eq!(bounds.clamp(9), 9);
        assert_eq!(bounds.clamp(40), 15);
    }

    #[test]
    fn inverted_interval() {
        let bounds = Interval::new(10, 2);
        assert!(!bounds.is_ordered());
        assert_eq!(bounds.clamp(5), 10);
    }
}
