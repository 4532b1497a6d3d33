//! **tilestar**: find the cheapest path across a text map.
//!
//! The binary reads a map file, runs an A* search from
//! [`tilestar_paths`] between two points and prints the path. The pieces are
//! exposed here so they can be driven without a process boundary:
//!
//! - [`mapfile`]: the map-file header and terrain block.
//! - [`args`]: command-line flags and coordinates.
//! - [`config`]: JSON settings layered under the flags.
//! - [`render`]: path lines and the marked map, optionally coloured.

pub mod args;
pub mod config;
pub mod mapfile;
pub mod render;

mod app;

pub use app::{AppError, run};
