//! A* search over terrain grids.
//!
//! The engine lives in [`SearchContext`], which owns and reuses the cost,
//! predecessor, visited and open-list tables of a grid rectangle. It is
//! generic over the pather traits; [`TerrainPather`] implements them for a
//! [`Terrain`] and a [`CostTable`].
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | neighbor enumeration |
//! | [`WeightedPather`] : [`Pather`] | step costs |
//! | [`AstarPather`] : [`WeightedPather`] | heuristic estimate |
//!
//! # One-shot searches
//!
//! ```
//! use tilestar_core::{CostTable, Point, Terrain};
//! use tilestar_paths::{SearchConfig, find_path};
//!
//! let terrain = Terrain::from_rows("..@\n...\n").unwrap();
//! let path = find_path(
//!     &terrain,
//!     &CostTable::standard(),
//!     &SearchConfig::default(),
//!     Point::new(0, 0),
//!     Point::new(2, 1),
//! )
//! .unwrap()
//! .expect("reachable");
//! assert_eq!(path.steps(), 3);
//! ```

mod config;
mod distance;
mod error;
mod heuristic;
mod neighbors;
mod open_list;
mod path;
mod pather;
mod search;
mod traits;
mod visited;

pub use config::{CostModel, SearchConfig};
pub use distance::{chebyshev, euclidean, manhattan, octile};
pub use error::SearchError;
pub use heuristic::{Heuristic, UnknownHeuristic};
pub use neighbors::Topology;
pub use open_list::OpenList;
pub use path::{Path, reconstruct};
pub use pather::TerrainPather;
pub use search::{PathResult, SearchContext, SearchState, SearchStats};
pub use traits::{AstarPather, Pather, WeightedPather};

use tilestar_core::{CostTable, Point, Terrain};

/// Run one search over `terrain` and hand back the context holding the
/// predecessor table.
///
/// Step costs come straight from `costs` (see [`CostModel::Terrain`]).
pub fn search(
    terrain: &Terrain,
    costs: &CostTable,
    start: Point,
    target: Point,
    topology: Topology,
    heuristic: Heuristic,
) -> Result<(PathResult, SearchContext), SearchError> {
    let config = SearchConfig::default()
        .with_topology(topology)
        .with_heuristic(heuristic);
    let pather = TerrainPather::new(terrain, costs, &config);
    let mut ctx = SearchContext::new(terrain.bounds());
    let result = ctx.search(&pather, start, target)?;
    Ok((result, ctx))
}

/// Find the cheapest path from `start` to `target`, or `None` if the target
/// cannot be reached.
pub fn find_path(
    terrain: &Terrain,
    costs: &CostTable,
    config: &SearchConfig,
    start: Point,
    target: Point,
) -> Result<Option<Path>, SearchError> {
    let pather = TerrainPather::new(terrain, costs, config);
    let mut ctx = SearchContext::new(terrain.bounds());
    match ctx.search(&pather, start, target)? {
        PathResult::Found(p) => ctx.path_to(p),
        PathResult::NotFound => Ok(None),
    }
}
