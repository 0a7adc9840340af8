//! Metro spine placement.
//!
//! One column, chosen by weighted home/office density, becomes a metro line.
//! Stations sit at a fixed row interval wherever the line touches homes or
//! offices.

use bevy::prelude::*;
use serde::Serialize;

use crate::config::TransitConfig;
use crate::world::{Cell, Tile, TileGrid};

/// The metro column and its stations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransitSpine {
    pub column: usize,
    /// Station cells, top to bottom.
    pub stations: Vec<Cell>,
}

/// Tiles the metro line may take over.
fn is_track_bed(tile: Tile) -> bool {
    matches!(tile, Tile::Empty | Tile::Walk | Tile::Road)
}

/// Weighted home/office score per column.
pub fn column_density(grid: &TileGrid, config: &TransitConfig) -> Vec<u32> {
    let mut density = vec![0u32; grid.size()];
    for (row, col) in grid.positions() {
        density[col] += match grid[(row, col)] {
            Tile::Home => config.home_weight,
            Tile::Office => config.office_weight,
            _ => 0,
        };
    }
    density
}

/// Lay the metro spine on the densest column (leftmost on ties).
///
/// Returns `None` without touching the grid when no column has any homes or
/// offices.
pub fn lay_transit_spine(grid: &mut TileGrid, config: &TransitConfig) -> Option<TransitSpine> {
    let density = column_density(grid, config);
    let (column, &best) = density
        .iter()
        .enumerate()
        .rev()
        .max_by_key(|&(_, score)| *score)?;
    if best == 0 {
        debug!("No homes or offices; metro spine skipped");
        return None;
    }

    let size = grid.size();
    for row in 0..size {
        if is_track_bed(grid[(row, column)]) {
            grid.set((row, column), Tile::Metro);
        }
    }

    let interval = config.station_interval.max(1);
    let mut stations = Vec::new();
    for row in (0..size).step_by(interval) {
        let cell = (row, column);
        if grid[cell] == Tile::Metro && grid.is_adjacent_to(cell, &[Tile::Home, Tile::Office]) {
            grid.set(cell, Tile::Station);
            stations.push(cell);
        }
    }

    info!(
        "Metro spine on column {} (density {}), {} stations",
        column,
        best,
        stations.len()
    );
    Some(TransitSpine { column, stations })
}
