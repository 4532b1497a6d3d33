use tilestar_core::{Cost, Point};

/// Grid adjacency as seen by the search engine.
pub trait Pather {
    /// Push the points reachable in one move from `p` onto `buf`, which the
    /// caller has already cleared.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);

    /// Upper bound on how many neighbors [`neighbors`](Self::neighbors)
    /// appends for one point. Sizes the open list.
    fn max_neighbors(&self) -> usize {
        8
    }
}

/// Pather with weighted (non-negative) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`.
    ///
    /// Impassable destinations return `infinity`; the engine adds step costs
    /// with saturation, so any value at or above `infinity` is never relaxed.
    fn cost(&self, from: Point, to: Point, infinity: Cost) -> Cost;

    /// Upper bound on any finite value [`cost`](Self::cost) returns.
    fn max_step_cost(&self) -> Cost;
}

/// Adds the heuristic that orders the open list.
pub trait AstarPather: WeightedPather {
    /// Lower bound on the cost of reaching `to` from `from`. An estimate
    /// above the real cost can make the returned path suboptimal.
    fn estimate(&self, from: Point, to: Point) -> Cost;
}
