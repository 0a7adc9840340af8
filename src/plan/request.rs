//! Incoming plan requests and their validated form.

use serde::{Deserialize, Serialize};

use super::error::PlanError;
use crate::config::GeneratorConfig;
use crate::procgen::TerrainArchetype;

fn default_size() -> i64 {
    48
}

/// Raw caller input, as it arrives over the wire.
///
/// Numeric fields are signed so that out-of-range values can be reported back
/// verbatim instead of failing deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    #[serde(default)]
    pub city_name: Option<String>,
    #[serde(default = "default_size")]
    pub size: i64,
    pub terrain: String,
    pub population: i64,
    pub eco_priority: i64,
    /// Omitted seeds fall back to the configured default.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for PlanRequest {
    fn default() -> Self {
        Self {
            city_name: None,
            size: default_size(),
            terrain: TerrainArchetype::Plains.to_string(),
            population: 120_000,
            eco_priority: 5,
            seed: None,
        }
    }
}

/// A request that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanParams {
    pub city_name: Option<String>,
    pub size: usize,
    pub terrain: TerrainArchetype,
    pub population: u64,
    pub eco_priority: u8,
    pub seed: u64,
}

impl PlanRequest {
    /// Check every field against the configured limits.
    ///
    /// Fields are checked in declaration order; the first failure is returned.
    pub fn validate(&self, config: &GeneratorConfig) -> Result<PlanParams, PlanError> {
        let limits = &config.limits;

        let size = usize::try_from(self.size)
            .ok()
            .filter(|s| (limits.min_size..=limits.max_size).contains(s))
            .ok_or(PlanError::InvalidSize {
                size: self.size,
                min: limits.min_size,
                max: limits.max_size,
            })?;

        let terrain = self
            .terrain
            .parse::<TerrainArchetype>()
            .map_err(PlanError::UnknownTerrain)?;

        let population = u64::try_from(self.population)
            .ok()
            .filter(|p| (limits.min_population..=limits.max_population).contains(p))
            .ok_or(PlanError::InvalidPopulation {
                population: self.population,
                min: limits.min_population,
                max: limits.max_population,
            })?;

        let eco_priority = u8::try_from(self.eco_priority)
            .ok()
            .filter(|e| (limits.min_eco_priority..=limits.max_eco_priority).contains(e))
            .ok_or(PlanError::InvalidEcoPriority {
                eco_priority: self.eco_priority,
                min: limits.min_eco_priority,
                max: limits.max_eco_priority,
            })?;

        Ok(PlanParams {
            city_name: self.city_name.clone(),
            size,
            terrain,
            population,
            eco_priority,
            seed: self.seed.unwrap_or(config.default_seed),
        })
    }
}
