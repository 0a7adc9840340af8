//! The generation pipeline: validate, synthesize, allocate, measure, package.

use bevy::prelude::*;
use serde::Serialize;

use super::error::PlanError;
use super::notes::advisory_notes;
use super::request::{PlanParams, PlanRequest};
use super::rng::PlanRng;
use crate::config::GeneratorConfig;
use crate::metrics::PlanMetrics;
use crate::procgen::{allocate_zones, synthesize_terrain, PlacementReport, QuotaSet, TerrainArchetype};
use crate::world::{legend, Legend, TileCounts, TileGrid};

/// A finished city plan.
#[derive(Clone, Debug, Serialize)]
pub struct CityPlan {
    pub city_name: Option<String>,
    pub legend: &'static Legend,
    pub size: usize,
    pub terrain_grid: TileGrid,
    pub plan_grid: TileGrid,
    pub metrics: PlanMetrics,
    pub notes: Vec<String>,
    #[serde(skip)]
    pub terrain: TerrainArchetype,
    #[serde(skip)]
    pub seed: u64,
    #[serde(skip)]
    pub quotas: QuotaSet,
    #[serde(skip)]
    pub report: PlacementReport,
}

impl CityPlan {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn tile_counts(&self) -> TileCounts {
        self.plan_grid.counts()
    }

    /// One-line description for logs.
    pub fn summary(&self) -> String {
        format!(
            "{} {}x{} {} (seed {}): green {:.2}%, walkability {:.2}, transit {:.2}%, CO2 {:.2} t/capita",
            self.city_name.as_deref().unwrap_or("Unnamed city"),
            self.size,
            self.size,
            self.terrain,
            self.seed,
            self.metrics.green_cover_pct,
            self.metrics.walkability_index,
            self.metrics.transit_coverage_pct,
            self.metrics.est_co2_per_capita
        )
    }
}

/// Validate `request` and generate a plan.
///
/// Every call builds its own grids and random stream, so concurrent callers
/// never influence each other.
pub fn generate_plan(request: &PlanRequest, config: &GeneratorConfig) -> Result<CityPlan, PlanError> {
    let params = request.validate(config)?;
    Ok(generate_validated(params, config))
}

/// Generate from parameters that already passed validation.
pub fn generate_validated(params: PlanParams, config: &GeneratorConfig) -> CityPlan {
    let PlanParams {
        city_name,
        size,
        terrain,
        population,
        eco_priority,
        seed,
    } = params;

    debug!(
        "Generating plan: size {}, {}, population {}, eco {}, seed {}",
        size, terrain, population, eco_priority, seed
    );

    let mut rng = PlanRng::from_seed_u64(seed);
    let terrain_grid = synthesize_terrain(size, terrain, &config.terrain, &mut rng.0);
    let quotas = QuotaSet::derive(size, population, eco_priority, &config.zoning);
    let allocation = allocate_zones(
        &terrain_grid,
        &quotas,
        eco_priority,
        &config.zoning,
        &config.transit,
        &mut rng.0,
    );

    let metrics = PlanMetrics::from_grid(&allocation.grid);
    let notes = advisory_notes(&allocation.report, &metrics);

    CityPlan {
        city_name,
        legend: legend(),
        size,
        terrain_grid,
        plan_grid: allocation.grid,
        metrics,
        notes,
        terrain,
        seed,
        quotas,
        report: allocation.report,
    }
}
