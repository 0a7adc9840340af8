//! Road layout on the plan grid.
//!
//! Creates the street network in two steps:
//! 1. A regular grid of road lines every `stride` rows and columns
//! 2. Connectors joining any stranded road fragments to the main network
//!
//! Metro and station cells count as level crossings: a road line cut by the
//! metro spine stays one network, and connectors never build over the spine.

use std::collections::BTreeSet;

use bevy::prelude::*;

use super::roads::repair_connectivity;
use crate::world::{Cell, Tile, TileGrid};

/// Tiles a road line may claim.
fn is_paveable(tile: Tile) -> bool {
    matches!(tile, Tile::Empty | Tile::Walk)
}

/// Convert EMPTY and WALK cells on every stride-aligned row and column into
/// ROAD. Returns the number of cells converted.
pub fn lay_road_grid(grid: &mut TileGrid, stride: usize) -> usize {
    let stride = stride.max(1);
    let on_line: Vec<Cell> = grid
        .positions()
        .filter(|&(row, col)| row % stride == 0 || col % stride == 0)
        .filter(|&cell| is_paveable(grid[cell]))
        .collect();

    for &cell in &on_line {
        grid.set(cell, Tile::Road);
    }

    debug!("Road grid: stride {}, {} cells paved", stride, on_line.len());
    on_line.len()
}

/// Tiles that carry street traffic, including crossings over the metro line.
pub fn is_street(tile: Tile) -> bool {
    matches!(tile, Tile::Road | Tile::Metro | Tile::Station)
}

/// Every street cell of the grid.
pub fn street_cells(grid: &TileGrid) -> BTreeSet<Cell> {
    grid.positions().filter(|&cell| is_street(grid[cell])).collect()
}

/// Join every street fragment to the largest one with L-shaped connectors.
///
/// Connector cells become ROAD whatever they held, bridging water and ridges.
/// Metro and station cells are already part of the network and are left
/// alone. Returns the number of cells that became ROAD.
pub fn connect_road_network(grid: &mut TileGrid) -> usize {
    if grid.count(Tile::Road) == 0 {
        return 0;
    }

    let streets = street_cells(grid);
    let repaired = repair_connectivity(&streets);
    let mut added = 0;
    for &cell in repaired.difference(&streets) {
        grid.set(cell, Tile::Road);
        added += 1;
    }

    if added > 0 {
        info!("Road network repaired: {} connector cells", added);
    }
    added
}
