//! Sustainability metrics derived from a finished plan grid.

use serde::{Deserialize, Serialize};

use crate::world::{Tile, TileGrid};

/// Five headline figures for a plan. Every value is rounded to 2 decimals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanMetrics {
    /// Share of cells that are park, walkway or farm, in percent.
    pub green_cover_pct: f64,
    /// Share of homes next to a park, walkway or station, in percent.
    pub walkability_index: f64,
    /// Share of homes next to the metro line, in percent.
    pub transit_coverage_pct: f64,
    pub renewable_potential: f64,
    /// Estimated tonnes of CO2 per resident per year. Never below 5.
    pub est_co2_per_capita: f64,
}

/// Floor on the CO2 estimate.
pub const MIN_CO2_PER_CAPITA: f64 = 5.0;

/// Renewable yield weight per tile kind.
const RENEWABLE_WEIGHTS: [(Tile, f64); 5] = [
    (Tile::Farm, 0.3),
    (Tile::Park, 0.2),
    (Tile::Water, 0.1),
    (Tile::Mountain, 0.1),
    (Tile::Office, 0.3),
];

impl PlanMetrics {
    pub fn from_grid(grid: &TileGrid) -> Self {
        let counts = grid.counts();
        let area = grid.area().max(1) as f64;
        let homes = counts[Tile::Home];

        let green = 100.0 * (counts[Tile::Park] + counts[Tile::Walk] + counts[Tile::Farm]) as f64 / area;
        let walk = 100.0 * homes_adjacent_to(grid, &[Tile::Park, Tile::Walk, Tile::Station]) as f64
            / homes.max(1) as f64;
        let transit = 100.0 * homes_adjacent_to(grid, &[Tile::Metro, Tile::Station]) as f64
            / homes.max(1) as f64;
        let renewable = 100.0
            * RENEWABLE_WEIGHTS
                .iter()
                .map(|&(tile, weight)| weight * counts[tile] as f64)
                .sum::<f64>()
            / area;
        let co2 = ((100.0 - (0.4 * green + 0.3 * walk + 0.3 * transit)) / 3.0).max(MIN_CO2_PER_CAPITA);

        Self {
            green_cover_pct: round2(green),
            walkability_index: round2(walk),
            transit_coverage_pct: round2(transit),
            renewable_potential: round2(renewable),
            est_co2_per_capita: round2(co2),
        }
    }
}

fn homes_adjacent_to(grid: &TileGrid, kinds: &[Tile]) -> usize {
    grid.cells_of(Tile::Home)
        .filter(|&cell| grid.is_adjacent_to(cell, kinds))
        .count()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid_has_floor_co2_and_no_cover() {
        let metrics = PlanMetrics::from_grid(&TileGrid::new(10));
        assert_eq!(metrics.green_cover_pct, 0.0);
        assert_eq!(metrics.walkability_index, 0.0);
        assert_eq!(metrics.transit_coverage_pct, 0.0);
        assert_eq!(metrics.renewable_potential, 0.0);
        assert!((metrics.est_co2_per_capita - 33.33).abs() < 1e-9);
    }

    #[test]
    fn hand_built_block() {
        // 4x4 grid:
        //   P H . .
        //   . M . .
        //   F H . .
        //   W . . O
        let mut grid = TileGrid::new(4);
        grid.set((0, 0), Tile::Park);
        grid.set((0, 1), Tile::Home);
        grid.set((1, 1), Tile::Metro);
        grid.set((2, 0), Tile::Farm);
        grid.set((2, 1), Tile::Home);
        grid.set((3, 0), Tile::Walk);
        grid.set((3, 3), Tile::Office);

        let metrics = PlanMetrics::from_grid(&grid);

        // park + walk + farm = 3 of 16
        assert_eq!(metrics.green_cover_pct, 18.75);
        // only (0,1) touches the park
        assert_eq!(metrics.walkability_index, 50.0);
        // both homes touch the metro cell
        assert_eq!(metrics.transit_coverage_pct, 100.0);
        // (0.3 + 0.2 + 0.3) / 16 * 100
        assert_eq!(metrics.renewable_potential, 5.0);
        // (100 - (7.5 + 15 + 30)) / 3 = 15.8333
        assert_eq!(metrics.est_co2_per_capita, 15.83);
    }

    #[test]
    fn co2_is_floored() {
        let mut grid = TileGrid::new(3);
        for cell in grid.positions().collect::<Vec<_>>() {
            grid.set(cell, Tile::Park);
        }
        grid.set((1, 1), Tile::Home);
        grid.set((1, 2), Tile::Station);

        let metrics = PlanMetrics::from_grid(&grid);
        assert_eq!(metrics.walkability_index, 100.0);
        assert_eq!(metrics.transit_coverage_pct, 100.0);
        assert_eq!(metrics.est_co2_per_capita, MIN_CO2_PER_CAPITA);
    }
}
