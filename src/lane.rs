use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the four approaches into the intersection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    North,
    South,
    East,
    West,
}

impl Lane {
    /// All lanes in their fixed order. Ties are always broken in this order.
    pub const ALL: [Lane; 4] = [Lane::North, Lane::South, Lane::East, Lane::West];

    /// The position of the lane within [Lane::ALL].
    pub const fn index(self) -> usize {
        match self {
            Lane::North => 0,
            Lane::South => 1,
            Lane::East => 2,
            Lane::West => 3,
        }
    }

    /// The lowercase name of the lane.
    pub const fn name(self) -> &'static str {
        match self {
            Lane::North => "north",
            Lane::South => "south",
            Lane::East => "east",
            Lane::West => "west",
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value for each of the four lanes.
///
/// Serialized as an array in [Lane::ALL] order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaneMap<T>([T; 4]);

impl<T> LaneMap<T> {
    /// Creates a map from values given in [Lane::ALL] order.
    pub const fn new(values: [T; 4]) -> Self {
        Self(values)
    }

    /// Creates a map by evaluating `f` for every lane.
    pub fn from_fn(mut f: impl FnMut(Lane) -> T) -> Self {
        Self(Lane::ALL.map(&mut f))
    }

    /// Iterates over the lanes and their values in fixed lane order.
    pub fn iter(&self) -> impl Iterator<Item = (Lane, &T)> + '_ {
        Lane::ALL.into_iter().zip(self.0.iter())
    }

    /// Iterates mutably over the lanes and their values in fixed lane order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Lane, &mut T)> + '_ {
        Lane::ALL.into_iter().zip(self.0.iter_mut())
    }

    /// Iterates over the values in fixed lane order.
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.0.iter()
    }

    /// Applies `f` to every value.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> LaneMap<U> {
        LaneMap(self.0.map(f))
    }

    /// Gets the values as an array in fixed lane order.
    pub fn into_array(self) -> [T; 4] {
        self.0
    }
}

impl<T: Copy> LaneMap<T> {
    /// Creates a map holding the same value for every lane.
    pub const fn splat(value: T) -> Self {
        Self([value; 4])
    }
}

impl LaneMap<u32> {
    /// The sum of all four values, widened so that it cannot overflow.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&value| value as u64).sum()
    }
}

impl<T> Index<Lane> for LaneMap<T> {
    type Output = T;

    fn index(&self, lane: Lane) -> &T {
        &self.0[lane.index()]
    }
}

impl<T> IndexMut<Lane> for LaneMap<T> {
    fn index_mut(&mut self, lane: Lane) -> &mut T {
        &mut self.0[lane.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_follows_fixed_order() {
        for (idx, lane) in Lane::ALL.into_iter().enumerate() {
            assert_eq!(lane.index(), idx);
        }
    }

    #[test]
    fn lane_map_indexing() {
        let mut map = LaneMap::new([5, 3, 2, 1]);
        assert_eq!(map[Lane::East], 2);
        map[Lane::West] += 4;
        assert_eq!(map.into_array(), [5, 3, 2, 5]);
        assert_eq!(map.total(), 15);
    }

    #[test]
    fn serializes_as_array() {
        let map = LaneMap::new([5u32, 3, 2, 1]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, "[5,3,2,1]");
        let back: LaneMap<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
        assert_eq!(serde_json::to_string(&Lane::North).unwrap(), "\"north\"");
    }
}
