//! World data model: the tile registry and the square grid it lives on.

pub mod grid;
pub mod tile;

pub use grid::{Cell, TileCounts, TileGrid};
pub use tile::{legend, Legend, Tile};
