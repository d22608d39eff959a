//! Strongly-typed identifiers.
//!
//! Every resource the simulator touches is addressed through one of these
//! newtypes rather than a raw integer, so a station index can never be
//! passed where a station side or a link is expected.

use std::fmt;

/// Index of a physical station in `[0, num_stations)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub u32);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for StationId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Travel direction along a line.
///
/// A line is traversed forward from its first declared station to its
/// last, then backward to the first again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// First declared station towards the last.
    Forward,
    /// Last declared station towards the first.
    Backward,
}

impl Direction {
    /// Numeric component used in the station-side index space.
    pub fn index(self) -> u32 {
        match self {
            Self::Forward => 0,
            Self::Backward => 1,
        }
    }

    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// A station observed from one travel direction.
///
/// Each physical station has an independent loading bay per direction,
/// so locks and wait statistics are keyed by side rather than station.
/// The flat index is `station + direction * num_stations`, giving an
/// index space of `2 * num_stations`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationSide {
    /// The physical station.
    pub station: StationId,
    /// The direction trains are travelling when they load here.
    pub direction: Direction,
}

impl StationSide {
    /// Create a side for `station` approached in `direction`.
    pub fn new(station: StationId, direction: Direction) -> Self {
        Self { station, direction }
    }

    /// Flat index in `[0, 2 * num_stations)`.
    pub fn index(self, num_stations: u32) -> usize {
        (self.station.0 + self.direction.index() * num_stations) as usize
    }

    /// Inverse of [`index`](Self::index).
    ///
    /// Returns `None` if `index >= 2 * num_stations`.
    pub fn from_index(index: usize, num_stations: u32) -> Option<Self> {
        let n = num_stations as usize;
        if n == 0 || index >= 2 * n {
            return None;
        }
        let direction = if index < n {
            Direction::Forward
        } else {
            Direction::Backward
        };
        Some(Self {
            station: StationId((index % n) as u32),
            direction,
        })
    }
}

impl fmt::Display for StationSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self.direction {
            Direction::Forward => '>',
            Direction::Backward => '<',
        };
        write!(f, "s{}{arrow}", self.station.0)
    }
}

/// Identifies a line within a network. `LineId(n)` is the n-th declared line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub u32);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for LineId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Position index within one line's cyclic node sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(pub u32);

impl fmt::Display for NodeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a directed transit edge registered by some line.
///
/// Only ordered station pairs that a line actually traverses receive an
/// id, so the link lock table is dense.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(pub u32);

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a train: its line and its spawn-order index on that line.
///
/// `local` doubles as the display id and as the admission gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrainId {
    /// The line the train runs on.
    pub line: LineId,
    /// Spawn-order index within the line.
    pub local: u32,
}

impl TrainId {
    /// Create a train id.
    pub fn new(line: LineId, local: u32) -> Self {
        Self { line, local }
    }

    /// Non-zero packed form, used as the holder tag in lock slots.
    pub fn packed(self) -> u64 {
        ((u64::from(self.line.0) << 32) | u64::from(self.local)) + 1
    }

    /// Inverse of [`packed`](Self::packed). Returns `None` for `0`.
    pub fn unpack(value: u64) -> Option<Self> {
        let raw = value.checked_sub(1)?;
        Some(Self {
            line: LineId((raw >> 32) as u32),
            local: (raw & u64::from(u32::MAX)) as u32,
        })
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}#{}", self.line.0, self.local)
    }
}

/// Monotonically increasing tick counter. The first tick is `TickId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl TickId {
    /// The following tick.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn station_side_index_layout() {
        let fwd = StationSide::new(StationId(2), Direction::Forward);
        let bwd = StationSide::new(StationId(2), Direction::Backward);
        assert_eq!(fwd.index(5), 2);
        assert_eq!(bwd.index(5), 7);
    }

    #[test]
    fn station_side_from_index_out_of_range() {
        assert_eq!(StationSide::from_index(10, 5), None);
        assert_eq!(StationSide::from_index(0, 0), None);
    }

    #[test]
    fn packed_train_id_is_never_zero() {
        let id = TrainId::new(LineId(0), 0);
        assert_ne!(id.packed(), 0);
        assert_eq!(TrainId::unpack(0), None);
    }

    #[test]
    fn direction_reversed() {
        assert_eq!(Direction::Forward.reversed(), Direction::Backward);
        assert_eq!(Direction::Backward.reversed(), Direction::Forward);
    }

    proptest! {
        #[test]
        fn station_side_index_roundtrip(n in 1u32..500, raw in 0usize..1000) {
            let idx = raw % (2 * n as usize);
            let side = StationSide::from_index(idx, n).unwrap();
            prop_assert_eq!(side.index(n), idx);
        }

        #[test]
        fn train_id_pack_roundtrip(line in 0u32..1000, local in any::<u32>()) {
            let id = TrainId::new(LineId(line), local);
            prop_assert_eq!(TrainId::unpack(id.packed()), Some(id));
        }
    }
}
