use std::fmt;

/// Reasons a plan request is rejected before generation starts.
///
/// Generation itself cannot fail; every variant describes a malformed input
/// and carries the offending value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// Grid side length outside the accepted range.
    InvalidSize { size: i64, min: usize, max: usize },
    /// Terrain archetype name not recognized.
    UnknownTerrain(String),
    /// Population not positive, or above the configured ceiling.
    InvalidPopulation { population: i64, min: u64, max: u64 },
    /// Eco priority outside the accepted range.
    InvalidEcoPriority { eco_priority: i64, min: u8, max: u8 },
}

impl PlanError {
    /// Name of the request field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            PlanError::InvalidSize { .. } => "size",
            PlanError::UnknownTerrain(_) => "terrain",
            PlanError::InvalidPopulation { .. } => "population",
            PlanError::InvalidEcoPriority { .. } => "eco_priority",
        }
    }
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::InvalidSize { size, min, max } => {
                write!(f, "Invalid size {size}: must be between {min} and {max}")
            }
            PlanError::UnknownTerrain(name) => write!(
                f,
                "Unknown terrain '{name}': expected coastal, plains or mountain"
            ),
            PlanError::InvalidPopulation {
                population,
                min,
                max,
            } => write!(
                f,
                "Invalid population {population}: must be between {min} and {max}"
            ),
            PlanError::InvalidEcoPriority {
                eco_priority,
                min,
                max,
            } => write!(
                f,
                "Invalid eco priority {eco_priority}: must be between {min} and {max}"
            ),
        }
    }
}

impl std::error::Error for PlanError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_error_display_size() {
        let err = PlanError::InvalidSize {
            size: 0,
            min: 24,
            max: 96,
        };
        let msg = format!("{err}");
        assert!(msg.contains("size 0"), "got: {msg}");
        assert!(msg.contains("24") && msg.contains("96"), "got: {msg}");
        assert_eq!(err.field(), "size");
    }

    #[test]
    fn test_plan_error_display_terrain() {
        let err = PlanError::UnknownTerrain("desert".to_string());
        let msg = format!("{err}");
        assert!(msg.contains("'desert'"), "got: {msg}");
        assert_eq!(err.field(), "terrain");
    }

    #[test]
    fn test_plan_error_fields() {
        let pop = PlanError::InvalidPopulation {
            population: 0,
            min: 1,
            max: 10,
        };
        let eco = PlanError::InvalidEcoPriority {
            eco_priority: 11,
            min: 1,
            max: 10,
        };
        assert_eq!(pop.field(), "population");
        assert_eq!(eco.field(), "eco_priority");
        assert!(format!("{eco}").contains("11"));
        assert!(format!("{pop}").contains("between 1 and 10"), "got: {pop}");
    }

    #[test]
    fn test_plan_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(PlanError::UnknownTerrain("x".into()));
        assert!(err.source().is_none());
    }
}
