//! **tilestar-core**: grid types shared by the tilestar crates.
//!
//! This crate provides the geometry primitives, the immutable terrain
//! buffer, and the per-symbol cost table that the search crate consumes.

pub mod cost;
pub mod geom;
pub mod terrain;

pub use cost::{Cost, CostTable};
pub use geom::{Point, Range};
pub use terrain::{Terrain, TerrainError};
