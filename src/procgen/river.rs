//! River generation for the terrain grid.
//!
//! The river runs from the top row to the bottom row. Its centre column takes
//! a bounded random walk (one step of -1, 0 or +1 per row) from a jittered
//! start near the middle of the map.

use bevy::prelude::*;
use rand::Rng;

use crate::config::TerrainConfig;
use crate::world::{Cell, Tile, TileGrid};

/// Centre column of the river for every row, top to bottom.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RiverPath {
    pub centers: Vec<usize>,
    /// Cells on each side of the centre column.
    pub half_width: usize,
}

impl RiverPath {
    /// Trace a meandering path down a `size`×`size` grid.
    pub fn trace(size: usize, config: &TerrainConfig, rng: &mut impl Rng) -> Self {
        let half_width = config.river_width / 2;
        if size == 0 {
            return Self {
                centers: Vec::new(),
                half_width,
            };
        }

        // Centre stays at least one cell off either border.
        let min_center = 1.min(size - 1);
        let max_center = size.saturating_sub(2).max(min_center);

        let jitter = (size / config.river_jitter_divisor.max(1)) as isize;
        let start = size as isize / 2 + rng.gen_range(-jitter..=jitter);
        let mut center = start.clamp(min_center as isize, max_center as isize);

        let mut centers = Vec::with_capacity(size);
        for _ in 0..size {
            centers.push(center as usize);
            let step: isize = rng.gen_range(-1..=1);
            center = (center + step).clamp(min_center as isize, max_center as isize);
        }

        Self {
            centers,
            half_width,
        }
    }

    /// True if the cell lies inside the channel.
    pub fn contains(&self, (row, col): Cell) -> bool {
        self.centers
            .get(row)
            .is_some_and(|&center| col + self.half_width >= center && col <= center + self.half_width)
    }

    /// Paint the channel as water.
    pub fn carve(&self, grid: &mut TileGrid) -> usize {
        let mut carved = 0;
        for (row, &center) in self.centers.iter().enumerate() {
            let first = center.saturating_sub(self.half_width);
            for col in first..=center + self.half_width {
                if grid.in_bounds((row, col)) {
                    grid.set((row, col), Tile::Water);
                    carved += 1;
                }
            }
        }
        debug!(
            "River carved: {} cells, enters at column {:?}",
            carved,
            self.centers.first()
        );
        carved
    }
}
