//! Advisory notes attached to every plan.

use crate::metrics::PlanMetrics;
use crate::procgen::PlacementReport;

/// Transit coverage below this (percent) earns a note.
pub const LOW_TRANSIT_PCT: f64 = 30.0;
/// Green cover below this (percent) earns a note.
pub const LOW_GREEN_PCT: f64 = 15.0;
/// Walkability below this earns a note.
pub const LOW_WALKABILITY: f64 = 40.0;

const PLANNING_RULES: [&str; 3] = [
    "Parks buffer the waterfront and farms sit on flat land near water or parks.",
    "Offices are mixed in beside homes; hospitals and schools are placed next to the neighbourhoods they serve.",
    "A metro spine follows the densest column of homes and offices, with stations at regular intervals.",
];

/// Static planning notes followed by observations about this plan.
pub fn advisory_notes(report: &PlacementReport, metrics: &PlanMetrics) -> Vec<String> {
    let mut notes: Vec<String> = PLANNING_RULES.iter().map(|s| s.to_string()).collect();

    for usage in report.underfilled() {
        notes.push(format!(
            "{} quota under-filled: placed {} of {} (no eligible land left).",
            usage.tile.description(),
            usage.placed,
            usage.quota
        ));
    }

    if metrics.transit_coverage_pct < LOW_TRANSIT_PCT {
        notes.push(format!(
            "Transit coverage is {:.2}%; consider a second metro line or feeder buses.",
            metrics.transit_coverage_pct
        ));
    }
    if metrics.green_cover_pct < LOW_GREEN_PCT {
        notes.push(format!(
            "Green cover is {:.2}%; raise eco priority to reserve more parkland.",
            metrics.green_cover_pct
        ));
    }
    if metrics.walkability_index < LOW_WALKABILITY {
        notes.push(format!(
            "Walkability index is {:.2}; few homes are next to parks, walkways or stations.",
            metrics.walkability_index
        ));
    }
    if report.road_connectors > 0 {
        notes.push(format!(
            "{} connector road cells were added to join isolated streets, bridging water or ridges where needed.",
            report.road_connectors
        ));
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procgen::QuotaUsage;
    use crate::world::Tile;

    fn healthy_metrics() -> PlanMetrics {
        PlanMetrics {
            green_cover_pct: 25.0,
            walkability_index: 60.0,
            transit_coverage_pct: 45.0,
            renewable_potential: 10.0,
            est_co2_per_capita: 12.0,
        }
    }

    #[test]
    fn healthy_plan_gets_static_notes_only() {
        let notes = advisory_notes(&PlacementReport::default(), &healthy_metrics());
        assert_eq!(notes.len(), PLANNING_RULES.len());
    }

    #[test]
    fn shortfalls_are_reported_in_order() {
        let report = PlacementReport {
            usage: vec![
                QuotaUsage {
                    tile: Tile::Park,
                    quota: 40,
                    placed: 12,
                },
                QuotaUsage {
                    tile: Tile::Home,
                    quota: 50,
                    placed: 50,
                },
            ],
            road_connectors: 4,
            ..Default::default()
        };
        let metrics = PlanMetrics {
            transit_coverage_pct: 10.0,
            ..healthy_metrics()
        };

        let notes = advisory_notes(&report, &metrics);

        assert_eq!(notes.len(), 6);
        assert!(notes[3].contains("placed 12 of 40"), "got: {}", notes[3]);
        assert!(notes[4].contains("10.00%"), "got: {}", notes[4]);
        assert!(notes[5].starts_with("4 connector"), "got: {}", notes[5]);
    }
}
