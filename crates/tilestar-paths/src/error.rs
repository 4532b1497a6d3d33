use std::fmt;

use tilestar_core::{Point, TerrainError};

/// Errors that can stop a search or a path reconstruction.
///
/// Not finding a path is not an error; see
/// [`PathResult::NotFound`](crate::PathResult::NotFound).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Start or target lies outside the grid.
    OutOfBounds { point: Point },
    /// The terrain handed to the search was malformed.
    Terrain(TerrainError),
    /// A search table could not be allocated.
    ResourceExhausted { requested: usize },
    /// More entries were pushed into the open list than it was sized for.
    OpenListOverflow { capacity: usize },
    /// Following predecessors from `from` did not reach a start point within
    /// `hops` steps.
    PredecessorCycle { from: Point, hops: usize },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { point } => write!(f, "{point} is not a point in the map"),
            Self::Terrain(e) => write!(f, "invalid terrain: {e}"),
            Self::ResourceExhausted { requested } => {
                write!(f, "could not allocate search tables for {requested} entries")
            }
            Self::OpenListOverflow { capacity } => {
                write!(f, "open list overflowed its capacity of {capacity}")
            }
            Self::PredecessorCycle { from, hops } => write!(
                f,
                "predecessor chain from {from} did not end after {hops} steps"
            ),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Terrain(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TerrainError> for SearchError {
    fn from(e: TerrainError) -> Self {
        Self::Terrain(e)
    }
}
