//! Error types for network construction.

use std::error::Error;
use std::fmt;

/// Errors detected while assembling a [`RailNetwork`](crate::RailNetwork).
#[derive(Clone, Debug, PartialEq)]
pub enum NetworkError {
    /// The station table is empty.
    NoStations,
    /// Two stations share a name.
    DuplicateStation {
        /// The repeated name.
        name: String,
    },
    /// A popularity factor is NaN, infinite, or negative.
    InvalidPopularity {
        /// Name of the station.
        station: String,
        /// The rejected value.
        value: f32,
    },
    /// The cost matrix is not `num_stations × num_stations`.
    CostMatrixShape {
        /// Expected number of rows and columns.
        expected: usize,
        /// Row index that was wrong, or `None` if the row count was wrong.
        row: Option<usize>,
        /// Length actually found.
        found: usize,
    },
    /// No lines were declared.
    NoLines,
    /// A line declares no stations.
    EmptyLine {
        /// Name of the line.
        line: String,
    },
    /// A line references a station name absent from the station table.
    UnknownStation {
        /// Name of the line.
        line: String,
        /// The unresolved station name.
        station: String,
    },
    /// A line lists the same station twice in a row.
    ConsecutiveDuplicate {
        /// Name of the line.
        line: String,
        /// The repeated station name.
        station: String,
    },
    /// A line traverses an ordered station pair whose cost is zero.
    MissingLinkCost {
        /// Name of the line.
        line: String,
        /// Departure station name.
        from: String,
        /// Arrival station name.
        to: String,
    },
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoStations => write!(f, "station table is empty"),
            Self::DuplicateStation { name } => write!(f, "duplicate station name '{name}'"),
            Self::InvalidPopularity { station, value } => write!(
                f,
                "station '{station}' popularity must be finite and >= 0, got {value}"
            ),
            Self::CostMatrixShape {
                expected,
                row,
                found,
            } => match row {
                Some(r) => write!(f, "cost matrix row {r} has {found} entries, expected {expected}"),
                None => write!(f, "cost matrix has {found} rows, expected {expected}"),
            },
            Self::NoLines => write!(f, "no lines declared"),
            Self::EmptyLine { line } => write!(f, "line '{line}' has no stations"),
            Self::UnknownStation { line, station } => {
                write!(f, "line '{line}' references unknown station '{station}'")
            }
            Self::ConsecutiveDuplicate { line, station } => {
                write!(f, "line '{line}' lists station '{station}' twice in a row")
            }
            Self::MissingLinkCost { line, from, to } => write!(
                f,
                "line '{line}' traverses '{from}' -> '{to}' but no link cost is defined"
            ),
        }
    }
}

impl Error for NetworkError {}
