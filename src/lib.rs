//! TerraNova city generator.
//!
//! Turns a size, terrain archetype, population and eco priority into a tiled
//! city plan:
//!
//! 1. Terrain synthesis lays down coast, river and mountain ridge.
//! 2. Zone allocation fills the land with parks, farms, homes, offices,
//!    hospitals, schools and walkways under population-derived quotas.
//! 3. A road grid is laid and a metro spine follows the densest column.
//! 4. Connectors join the streets into a single network that crosses the
//!    metro line.
//! 5. Metrics and advisory notes summarize the result.
//!
//! [`plan::generate_plan`] runs the whole pipeline; [`plan::CityPlanPlugin`]
//! hosts it inside a Bevy app.

pub mod config;
pub mod metrics;
pub mod plan;
pub mod procgen;
pub mod world;

pub use config::GeneratorConfig;
pub use metrics::PlanMetrics;
pub use plan::{generate_plan, CityPlan, CityPlanPlugin, PlanError, PlanRequest};
pub use world::{Tile, TileGrid};
