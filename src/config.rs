//! Tunable constants for plan generation.
//!
//! Everything here has a sensible default; hosts may override any field by
//! inserting their own [`GeneratorConfig`] resource or deserializing one.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Top-level generator configuration.
#[derive(Resource, Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Accepted ranges for request parameters.
    pub limits: PlanLimits,
    pub terrain: TerrainConfig,
    pub zoning: ZoningConfig,
    pub transit: TransitConfig,
    /// Seed used when a request does not supply one.
    pub default_seed: u64,
}

impl GeneratorConfig {
    /// Default seed for requests without an explicit one.
    pub const DEFAULT_SEED: u64 = 42;
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            limits: PlanLimits::default(),
            terrain: TerrainConfig::default(),
            zoning: ZoningConfig::default(),
            transit: TransitConfig::default(),
            default_seed: Self::DEFAULT_SEED,
        }
    }
}

/// Validation bounds for incoming requests.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanLimits {
    /// Smallest grid side length.
    pub min_size: usize,
    /// Largest grid side length.
    pub max_size: usize,
    /// Smallest accepted population.
    pub min_population: u64,
    /// Upper bound on population.
    pub max_population: u64,
    pub min_eco_priority: u8,
    pub max_eco_priority: u8,
}

impl Default for PlanLimits {
    fn default() -> Self {
        Self {
            min_size: 24,
            max_size: 96,
            min_population: 1,
            max_population: 50_000_000,
            min_eco_priority: 1,
            max_eco_priority: 10,
        }
    }
}

/// Terrain synthesis parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Minimum width of the coastal water band.
    pub coast_min_width: usize,
    /// Coast width is `size / coast_width_divisor` when larger than the minimum.
    pub coast_width_divisor: usize,
    /// River width in cells (odd values keep the channel centred).
    pub river_width: usize,
    /// River start column is jittered by up to `size / river_jitter_divisor`.
    pub river_jitter_divisor: usize,
    /// Ridge starts at column `size / ridge_start_divisor`.
    pub ridge_start_divisor: usize,
    /// Chance of widening a ridge cell to the right under the mountain archetype.
    pub ridge_spread_mountain: f64,
    /// Chance of widening a ridge cell to the right elsewhere.
    pub ridge_spread_default: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            coast_min_width: 2,
            coast_width_divisor: 10,
            river_width: 3,
            river_jitter_divisor: 8,
            ridge_start_divisor: 3,
            ridge_spread_mountain: 0.6,
            ridge_spread_default: 0.4,
        }
    }
}

/// Quota derivation and placement parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoningConfig {
    /// Residents per density step.
    pub people_per_density_step: u64,
    /// Density factor ceiling.
    pub max_density: u32,
    /// Fraction of the grid zoned HOME per density step.
    pub home_share: f64,
    /// Fraction of the grid zoned OFFICE per density step.
    pub office_share: f64,
    /// Fraction of the grid zoned FARM per density step.
    pub farm_share: f64,
    /// Fraction of the grid zoned PARK per density step.
    pub park_share: f64,
    /// Additional PARK fraction per eco priority point.
    pub park_eco_share: f64,
    pub people_per_hospital: u64,
    pub min_hospitals: usize,
    pub people_per_school: u64,
    pub min_schools: usize,
    /// Office admission probability at eco priority 0.
    pub office_base_bias: f64,
    /// Office admission probability added per eco priority point.
    pub office_eco_bias: f64,
    /// Chance an eligible cell between parks and homes becomes a walkway.
    pub walk_probability: f64,
    /// Road stride at density 0; shrinks by one per density step.
    pub base_road_stride: usize,
    pub min_road_stride: usize,
    /// Keep stride-aligned rows and columns free of buildings.
    pub reserve_road_lines: bool,
    /// Splice connectors so all road cells form one network.
    pub repair_roads: bool,
}

impl Default for ZoningConfig {
    fn default() -> Self {
        Self {
            people_per_density_step: 20_000,
            max_density: 5,
            home_share: 0.06,
            office_share: 0.03,
            farm_share: 0.02,
            park_share: 0.01,
            park_eco_share: 0.015,
            people_per_hospital: 50_000,
            min_hospitals: 1,
            people_per_school: 15_000,
            min_schools: 2,
            office_base_bias: 0.35,
            office_eco_bias: 0.04,
            walk_probability: 0.5,
            base_road_stride: 8,
            min_road_stride: 3,
            reserve_road_lines: true,
            repair_roads: true,
        }
    }
}

/// Metro spine parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitConfig {
    /// Column density weight of a HOME cell.
    pub home_weight: u32,
    /// Column density weight of an OFFICE cell.
    pub office_weight: u32,
    /// Rows between candidate stations along the spine.
    pub station_interval: usize,
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            home_weight: 2,
            office_weight: 3,
            station_interval: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"zoning": {"walk_probability": 0.9}, "default_seed": 7}"#)
                .unwrap();
        assert_eq!(config.default_seed, 7);
        assert_eq!(config.zoning.walk_probability, 0.9);
        assert_eq!(config.zoning.base_road_stride, 8);
        assert_eq!(config.limits.max_size, 96);
    }
}
