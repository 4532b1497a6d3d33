use tilestar_core::{Cost, Point, Range};

use crate::error::SearchError;
use crate::open_list::OpenList;
use crate::path::{self, Path};
use crate::traits::AstarPather;
use crate::visited::VisitedSet;

/// Outcome of a search that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathResult {
    /// The target was reached; the predecessor table leads back from it.
    Found(Point),
    /// The open list ran dry before the target was reached.
    NotFound,
}

impl PathResult {
    #[inline]
    pub fn is_found(self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Where the engine is in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Tables reset, nothing expanded yet.
    Initialized,
    /// Main loop running.
    Expanding,
    /// Terminal: the target was popped from the open list.
    Found,
    /// Terminal: the open list emptied first.
    Exhausted,
}

/// Counters from the last search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Points popped and expanded.
    pub expanded: usize,
    /// Entries pushed into the open list, start included.
    pub pushed: usize,
    /// Popped entries skipped because their point was already closed.
    pub stale: usize,
}

/// Owns every table an A* search over one grid rectangle needs.
///
/// Tables are sized to the range on first use and reused by later
/// searches; each search fully resets them before it starts. Independent
/// contexts can search concurrently since nothing is shared.
pub struct SearchContext {
    rng: Range,
    g: Vec<Cost>,
    f: Vec<Cost>,
    rev_path: Vec<usize>,
    visited: VisitedSet,
    open: OpenList,
    // scratch buffer for neighbor queries
    nbuf: Vec<Point>,
    infinity: Cost,
    start: Option<usize>,
    state: SearchState,
    stats: SearchStats,
}

impl SearchContext {
    /// Create a context for the grid rectangle `rng`. Tables are allocated
    /// by the first search.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            g: Vec::new(),
            f: Vec::new(),
            rev_path: Vec::new(),
            visited: VisitedSet::default(),
            open: OpenList::default(),
            nbuf: Vec::with_capacity(8),
            infinity: rng.len() as Cost + 1,
            start: None,
            state: SearchState::Initialized,
            stats: SearchStats::default(),
        }
    }

    /// Replace the grid rectangle. The next search resizes the tables.
    pub fn set_range(&mut self, rng: Range) {
        self.rng = rng;
        self.start = None;
        self.state = SearchState::Initialized;
    }

    /// The grid rectangle being searched.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// The cost standing in for "unreachable" during the last search.
    #[inline]
    pub fn infinity(&self) -> Cost {
        self.infinity
    }

    /// The predecessor table of the last search, indexed by flat index.
    /// An entry equal to its own index has no predecessor.
    #[inline]
    pub fn rev_path(&self) -> &[usize] {
        &self.rev_path
    }

    /// Best known cost from the start to `p`, or `None` if `p` was not
    /// reached.
    pub fn g_cost(&self, p: Point) -> Option<Cost> {
        let i = self.rng.index(p)?;
        let g = *self.g.get(i)?;
        (g < self.infinity).then_some(g)
    }

    /// Priority `g + h` of `p`, or `None` if `p` was not reached.
    pub fn f_cost(&self, p: Point) -> Option<Cost> {
        let i = self.rng.index(p)?;
        let f = *self.f.get(i)?;
        (self.g[i] < self.infinity).then_some(f)
    }

    /// The point through which the cheapest known route reaches `p`.
    pub fn predecessor(&self, p: Point) -> Option<Point> {
        let i = self.rng.index(p)?;
        let pi = *self.rev_path.get(i)?;
        (pi != i).then(|| self.rng.point(pi))
    }

    /// Whether `p` was expanded by the last search.
    pub fn is_closed(&self, p: Point) -> bool {
        self.rng
            .index(p)
            .is_some_and(|i| i < self.visited.len() && self.visited.is_marked(i))
    }

    /// The path from the start of the last search to `p`, or `None` if `p`
    /// was not reached.
    pub fn path_to(&self, p: Point) -> Result<Option<Path>, SearchError> {
        let Some(cost) = self.g_cost(p) else {
            return Ok(None);
        };
        let Some(i) = self.rng.index(p) else {
            return Ok(None);
        };
        let points = path::reconstruct(&self.rev_path, self.rng, i)?;
        if points.first().and_then(|&s| self.rng.index(s)) != self.start {
            return Err(SearchError::PredecessorCycle {
                from: p,
                hops: points.len(),
            });
        }
        Ok(Some(Path::new(points, cost)))
    }

    /// Search for the cheapest path from `from` to `to` with A*.
    ///
    /// On [`PathResult::Found`] use [`path_to`](Self::path_to) to extract the
    /// path. Errors are reported before any expansion for out-of-range
    /// endpoints, or mid-search if a table cannot grow.
    pub fn search<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Result<PathResult, SearchError> {
        let start_idx = self.rng.index(from).ok_or(SearchError::OutOfBounds { point: from })?;
        let goal_idx = self.rng.index(to).ok_or(SearchError::OutOfBounds { point: to })?;

        let len = self.rng.len();
        // No real path takes more than `len - 1` steps of at most
        // `max_step_cost` each.
        let infinity = (len as Cost + 1).saturating_mul(pather.max_step_cost().max(1));
        let limit = pather
            .max_neighbors()
            .saturating_mul(len)
            .saturating_add(1);
        self.reset(len, limit, infinity)?;

        self.g[start_idx] = 0;
        self.f[start_idx] = pather.estimate(from, to);
        self.start = Some(start_idx);
        log::debug!("search {from} -> {to} on {} (infinity {infinity})", self.rng);

        if start_idx == goal_idx {
            self.state = SearchState::Found;
            return Ok(PathResult::Found(to));
        }

        self.open.insert(start_idx, self.f[start_idx])?;
        self.stats.pushed = 1;
        self.state = SearchState::Expanding;

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let found = self.expand(pather, goal_idx, to, &mut nbuf);
        self.nbuf = nbuf;
        let found = found?;

        self.state = if found {
            SearchState::Found
        } else {
            SearchState::Exhausted
        };
        let SearchStats {
            expanded,
            pushed,
            stale,
        } = self.stats;
        log::debug!(
            "search {from} -> {to}: {:?} after {expanded} expansions ({pushed} pushed, {stale} stale)",
            self.state
        );

        Ok(if found {
            PathResult::Found(to)
        } else {
            PathResult::NotFound
        })
    }

    /// The main loop. Returns whether the goal was popped.
    fn expand<P: AstarPather>(
        &mut self,
        pather: &P,
        goal_idx: usize,
        to: Point,
        nbuf: &mut Vec<Point>,
    ) -> Result<bool, SearchError> {
        while let Some(ci) = self.open.remove_min() {
            if ci == goal_idx {
                return Ok(true);
            }

            // Skip stale duplicates of already-closed points.
            if self.visited.test_and_mark(ci) {
                self.stats.stale += 1;
                continue;
            }
            self.stats.expanded += 1;

            let current_g = self.g[ci];
            let current_point = self.rng.point(ci);
            log::trace!("expand {current_point} g={current_g} f={}", self.f[ci]);

            nbuf.clear();
            pather.neighbors(current_point, nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.rng.index(np) else {
                    continue;
                };
                if self.visited.is_marked(ni) {
                    continue;
                }
                let alt = current_g.saturating_add(pather.cost(current_point, np, self.infinity));
                if alt >= self.g[ni] {
                    continue;
                }

                self.rev_path[ni] = ci;
                self.g[ni] = alt;
                self.f[ni] = alt.saturating_add(pather.estimate(np, to));
                self.open.insert(ni, self.f[ni])?;
                self.stats.pushed += 1;
            }
        }
        Ok(false)
    }

    /// Size every table to `len` cells and put it in its initial state.
    fn reset(&mut self, len: usize, limit: usize, infinity: Cost) -> Result<(), SearchError> {
        fn refill<T: Clone>(v: &mut Vec<T>, len: usize, value: T) -> Result<(), SearchError> {
            v.clear();
            v.try_reserve_exact(len)
                .map_err(|_| SearchError::ResourceExhausted { requested: len })?;
            v.resize(len, value);
            Ok(())
        }

        refill(&mut self.g, len, infinity)?;
        refill(&mut self.f, len, infinity)?;
        self.rev_path.clear();
        self.rev_path
            .try_reserve_exact(len)
            .map_err(|_| SearchError::ResourceExhausted { requested: len })?;
        self.rev_path.extend(0..len);
        self.visited.reset(len)?;
        self.open.reset(limit, len)?;

        self.infinity = infinity;
        self.start = None;
        self.state = SearchState::Initialized;
        self.stats = SearchStats::default();
        Ok(())
    }
}
