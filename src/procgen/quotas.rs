//! Placement quotas derived from population and eco priority.

use serde::Serialize;

use crate::config::ZoningConfig;
use crate::world::Tile;

/// Upper bounds on how many cells of each buildable kind may be placed.
///
/// Quotas are advisory: allocation may under-fill but never exceeds them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuotaSet {
    /// Population density factor in `1..=max_density`.
    pub density: u32,
    /// Spacing between road lines.
    pub road_stride: usize,
    pub park: usize,
    pub farm: usize,
    pub home: usize,
    pub office: usize,
    pub hospital: usize,
    pub school: usize,
}

impl QuotaSet {
    /// Derive quotas for an N×N grid.
    pub fn derive(size: usize, population: u64, eco_priority: u8, config: &ZoningConfig) -> Self {
        let density = density_factor(population, config);
        let area = (size * size) as f64;
        let d = density as f64;
        let share = |fraction: f64| (area * fraction).round().max(0.0) as usize;

        let road_stride = config
            .base_road_stride
            .saturating_sub(density as usize)
            .max(config.min_road_stride)
            .max(1);

        Self {
            density,
            road_stride,
            park: share(config.park_share * d + config.park_eco_share * eco_priority as f64),
            farm: share(config.farm_share * d),
            home: share(config.home_share * d),
            office: share(config.office_share * d),
            hospital: ratio_with_floor(population, config.people_per_hospital, config.min_hospitals),
            school: ratio_with_floor(population, config.people_per_school, config.min_schools),
        }
    }

    /// Quota for a tile kind, `None` for kinds that are not quota-bound.
    pub fn for_tile(&self, tile: Tile) -> Option<usize> {
        match tile {
            Tile::Park => Some(self.park),
            Tile::Farm => Some(self.farm),
            Tile::Home => Some(self.home),
            Tile::Office => Some(self.office),
            Tile::Hospital => Some(self.hospital),
            Tile::School => Some(self.school),
            _ => None,
        }
    }
}

/// Population scaled into `1..=max_density`.
pub fn density_factor(population: u64, config: &ZoningConfig) -> u32 {
    let steps = population / config.people_per_density_step.max(1);
    let max = config.max_density.max(1);
    steps.clamp(1, max as u64) as u32
}

fn ratio_with_floor(population: u64, per_unit: u64, floor: usize) -> usize {
    let units = population / per_unit.max(1);
    usize::try_from(units).unwrap_or(usize::MAX).max(floor)
}
