//! Procedural generation stages.
//!
//! - Terrain synthesis (coast, river, ridge)
//! - Quota derivation from population and eco priority
//! - Zone allocation passes
//! - Road grid and connectivity repair
//! - Metro spine

pub mod quotas;
pub mod river;
pub mod road_generator;
pub mod roads;
pub mod terrain;
pub mod transit;
pub mod zoning;

pub use quotas::QuotaSet;
pub use road_generator::{connect_road_network, street_cells};
pub use roads::{repair_connectivity, ExhaustivePairSearch, NearestPairSearch, RoadNetwork};
pub use terrain::{synthesize_terrain, TerrainArchetype};
pub use transit::TransitSpine;
pub use zoning::{allocate_zones, Allocation, AllocationPass, PlacementReport, QuotaUsage, ZoneAllocator};
