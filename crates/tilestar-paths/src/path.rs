//! Path reconstruction from a predecessor table.

use tilestar_core::{Cost, Point, Range};

use crate::error::SearchError;

/// A path found by a search, ordered from start to target.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    points: Vec<Point>,
    cost: Cost,
}

impl Path {
    pub(crate) fn new(points: Vec<Point>, cost: Cost) -> Self {
        Self { points, cost }
    }

    /// Every point on the path, both endpoints included.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Accumulated traversal cost from start to target.
    #[inline]
    pub fn cost(&self) -> Cost {
        self.cost
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of moves, one less than the number of points.
    #[inline]
    pub fn steps(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn target(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.points.contains(&p)
    }
}

/// Walk `rev_path` back from `terminal` to the first self-referencing
/// entry, returning the points in forward order.
///
/// `rev_path` is indexed by flat indices of `rng`. The walk gives up with
/// [`SearchError::PredecessorCycle`] after `rev_path.len()` hops, or when an
/// entry points outside the table.
pub fn reconstruct(rev_path: &[usize], rng: Range, terminal: usize) -> Result<Vec<Point>, SearchError> {
    let limit = rev_path.len();
    let cycle = |hops| SearchError::PredecessorCycle {
        from: rng.point(terminal),
        hops,
    };
    if terminal >= limit {
        return Err(cycle(0));
    }

    let mut path = vec![rng.point(terminal)];
    let mut ci = terminal;
    while rev_path[ci] != ci {
        if path.len() > limit {
            log::warn!("predecessor chain from {} exceeds {limit} hops", rng.point(terminal));
            return Err(cycle(path.len() - 1));
        }
        ci = rev_path[ci];
        if ci >= limit {
            return Err(cycle(path.len()));
        }
        path.push(rng.point(ci));
    }
    path.reverse();
    Ok(path)
}
