//! Terrain synthesis: water and mountains laid down before any zoning.
//!
//! Order of draws from the random stream is part of the output contract:
//! coast edge (coastal only), river (all but mountain), then ridge spread.

use std::fmt;
use std::str::FromStr;

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::river::RiverPath;
use crate::config::TerrainConfig;
use crate::world::{Tile, TileGrid};

/// Landscape archetype requested by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainArchetype {
    /// Sea along one edge plus a river.
    Coastal,
    /// River through open land.
    #[default]
    Plains,
    /// Heavier ridge and no river.
    Mountain,
}

impl TerrainArchetype {
    pub const ALL: [TerrainArchetype; 3] = [
        TerrainArchetype::Coastal,
        TerrainArchetype::Plains,
        TerrainArchetype::Mountain,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TerrainArchetype::Coastal => "coastal",
            TerrainArchetype::Plains => "plains",
            TerrainArchetype::Mountain => "mountain",
        }
    }

    pub fn has_river(self) -> bool {
        !matches!(self, TerrainArchetype::Mountain)
    }

    /// Probability that a ridge cell also claims its right-hand neighbour.
    pub fn ridge_spread(self, config: &TerrainConfig) -> f64 {
        match self {
            TerrainArchetype::Mountain => config.ridge_spread_mountain,
            _ => config.ridge_spread_default,
        }
    }
}

impl fmt::Display for TerrainArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TerrainArchetype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TerrainArchetype::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| trimmed.to_string())
    }
}

/// Map edge carrying the coastal band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoastEdge {
    North,
    South,
    West,
    East,
}

impl CoastEdge {
    const ALL: [CoastEdge; 4] = [CoastEdge::North, CoastEdge::South, CoastEdge::West, CoastEdge::East];

    fn pick(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Paint a water band `width` cells deep along `edge`.
pub fn carve_coast(grid: &mut TileGrid, edge: CoastEdge, width: usize) {
    let size = grid.size();
    let width = width.min(size);
    for depth in 0..width {
        for along in 0..size {
            let cell = match edge {
                CoastEdge::North => (depth, along),
                CoastEdge::South => (size - 1 - depth, along),
                CoastEdge::West => (along, depth),
                CoastEdge::East => (along, size - 1 - depth),
            };
            grid.set(cell, Tile::Water);
        }
    }
}

/// Coastal band width for a grid of `size`.
pub fn coast_width(size: usize, config: &TerrainConfig) -> usize {
    (size / config.coast_width_divisor.max(1)).max(config.coast_min_width)
}

/// Lay a diagonal ridge starting at column `size / ridge_start_divisor`,
/// advancing one column per row and wrapping at the right edge.
///
/// The ridge never overwrites water. A spread roll is drawn for every row so
/// the stream stays aligned regardless of what the river did.
pub fn raise_ridge(grid: &mut TileGrid, spread: f64, config: &TerrainConfig, rng: &mut impl Rng) {
    let size = grid.size();
    if size == 0 {
        return;
    }
    let start = size / config.ridge_start_divisor.max(1);
    for row in 0..size {
        let col = (start + row) % size;
        let widen = rng.gen_bool(spread.clamp(0.0, 1.0));

        if grid[(row, col)] != Tile::Water {
            grid.set((row, col), Tile::Mountain);
        }
        if widen && col + 1 < size && grid[(row, col + 1)] != Tile::Water {
            grid.set((row, col + 1), Tile::Mountain);
        }
    }
}

/// Build the terrain grid for an archetype.
pub fn synthesize_terrain(
    size: usize,
    archetype: TerrainArchetype,
    config: &TerrainConfig,
    rng: &mut impl Rng,
) -> TileGrid {
    let mut grid = TileGrid::new(size);

    if archetype == TerrainArchetype::Coastal {
        let edge = CoastEdge::pick(rng);
        carve_coast(&mut grid, edge, coast_width(size, config));
        debug!("Coast laid along {:?} edge", edge);
    }

    if archetype.has_river() {
        RiverPath::trace(size, config, rng).carve(&mut grid);
    }

    raise_ridge(&mut grid, archetype.ridge_spread(config), config, rng);

    info!(
        "Terrain synthesized ({}, {}x{}): {} water, {} mountain",
        archetype,
        size,
        size,
        grid.count(Tile::Water),
        grid.count(Tile::Mountain)
    );

    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn terrain(size: usize, archetype: TerrainArchetype, seed: u64) -> TileGrid {
        let mut rng = StdRng::seed_from_u64(seed);
        synthesize_terrain(size, archetype, &TerrainConfig::default(), &mut rng)
    }

    #[test]
    fn archetypes_parse_case_insensitively() {
        assert_eq!("Coastal".parse::<TerrainArchetype>(), Ok(TerrainArchetype::Coastal));
        assert_eq!(" plains ".parse::<TerrainArchetype>(), Ok(TerrainArchetype::Plains));
        assert_eq!("MOUNTAIN".parse::<TerrainArchetype>(), Ok(TerrainArchetype::Mountain));
        assert_eq!("desert".parse::<TerrainArchetype>(), Err("desert".to_string()));
    }

    #[test]
    fn terrain_only_holds_natural_tiles() {
        for archetype in TerrainArchetype::ALL {
            let grid = terrain(40, archetype, 9);
            assert!(grid
                .positions()
                .all(|c| matches!(grid[c], Tile::Empty | Tile::Water | Tile::Mountain)));
        }
    }

    #[test]
    fn mountain_archetype_has_no_water() {
        let grid = terrain(32, TerrainArchetype::Mountain, 5);
        assert_eq!(grid.count(Tile::Water), 0);
        assert!(grid.count(Tile::Mountain) >= 32);
    }

    #[test]
    fn coastal_band_covers_a_full_edge() {
        let size = 40;
        let grid = terrain(size, TerrainArchetype::Coastal, 11);
        let width = coast_width(size, &TerrainConfig::default());
        assert_eq!(width, 4);

        let edge_full = |cells: Vec<(usize, usize)>| cells.iter().all(|&c| grid[c] == Tile::Water);
        let north = edge_full((0..width).flat_map(|d| (0..size).map(move |a| (d, a))).collect());
        let south = edge_full((0..width).flat_map(|d| (0..size).map(move |a| (size - 1 - d, a))).collect());
        let west = edge_full((0..width).flat_map(|d| (0..size).map(move |a| (a, d))).collect());
        let east = edge_full((0..width).flat_map(|d| (0..size).map(move |a| (a, size - 1 - d))).collect());
        assert!(north || south || west || east);
    }

    #[test]
    fn ridge_cell_sits_on_the_wrapped_diagonal() {
        let size = 24;
        let grid = terrain(size, TerrainArchetype::Plains, 42);
        for row in 0..size {
            let col = (size / 3 + row) % size;
            assert!(matches!(grid[(row, col)], Tile::Mountain | Tile::Water));
            for c in 0..size {
                if grid[(row, c)] == Tile::Mountain {
                    assert!(c == col || c == col + 1, "stray mountain at ({row}, {c})");
                }
            }
        }
    }

    #[test]
    fn same_seed_same_terrain() {
        for archetype in TerrainArchetype::ALL {
            assert_eq!(terrain(48, archetype, 77), terrain(48, archetype, 77));
        }
    }
}
