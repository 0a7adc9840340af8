//! City plan generation and its Bevy host.
//!
//! Apps send a [`GeneratePlanEvent`]; the plugin validates it, runs the whole
//! pipeline with a fresh random stream, stores the result in [`LatestPlan`]
//! and announces it with [`PlanGenerated`] or [`PlanRejected`].

use bevy::prelude::*;

pub mod ascii;
pub mod error;
pub mod generate;
pub mod notes;
pub mod request;
pub mod rng;

pub use ascii::render_ascii;
pub use error::PlanError;
pub use generate::{generate_plan, generate_validated, CityPlan};
pub use notes::advisory_notes;
pub use request::{PlanParams, PlanRequest};
pub use rng::PlanRng;

use crate::config::GeneratorConfig;

/// Request a new plan.
#[derive(Event, Clone, Debug)]
pub struct GeneratePlanEvent(pub PlanRequest);

/// A plan was generated and stored in [`LatestPlan`].
#[derive(Event, Clone, Debug)]
pub struct PlanGenerated {
    pub city_name: Option<String>,
    pub seed: u64,
}

/// A request failed validation.
#[derive(Event, Clone, Debug)]
pub struct PlanRejected {
    pub request: PlanRequest,
    pub error: PlanError,
}

/// Most recently generated plan.
#[derive(Resource, Default)]
pub struct LatestPlan(pub Option<CityPlan>);

pub struct CityPlanPlugin;

impl Plugin for CityPlanPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GeneratorConfig>()
            .init_resource::<LatestPlan>()
            .add_event::<GeneratePlanEvent>()
            .add_event::<PlanGenerated>()
            .add_event::<PlanRejected>()
            .add_systems(Update, generate_plans_on_event);
    }
}

fn generate_plans_on_event(
    mut requests: EventReader<GeneratePlanEvent>,
    config: Res<GeneratorConfig>,
    mut latest: ResMut<LatestPlan>,
    mut generated: EventWriter<PlanGenerated>,
    mut rejected: EventWriter<PlanRejected>,
) {
    for GeneratePlanEvent(request) in requests.read() {
        match generate_plan(request, &config) {
            Ok(plan) => {
                info!("Plan generated: {}", plan.summary());
                generated.send(PlanGenerated {
                    city_name: plan.city_name.clone(),
                    seed: plan.seed,
                });
                latest.0 = Some(plan);
            }
            Err(error) => {
                warn!("Plan request rejected ({}): {}", error.field(), error);
                rejected.send(PlanRejected {
                    request: request.clone(),
                    error,
                });
            }
        }
    }
}
