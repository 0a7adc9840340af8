//! Tile registry: the fixed set of cell kinds and their wire codes.
//!
//! Codes are stable and shared with every consumer of a plan, so the order of
//! [`Tile::ALL`] must never change.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single grid cell kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Tile {
    /// Unallocated land.
    #[default]
    Empty = 0,
    Water = 1,
    Mountain = 2,
    Farm = 3,
    Park = 4,
    Home = 5,
    Office = 6,
    Hospital = 7,
    School = 8,
    /// Metro line cell along the transit spine.
    Metro = 9,
    /// Metro station (a metro cell with a stop).
    Station = 10,
    /// Pedestrian path.
    Walk = 11,
    Road = 12,
}

impl Tile {
    /// Number of tile kinds.
    pub const COUNT: usize = 13;

    /// All tile kinds in code order.
    pub const ALL: [Tile; Tile::COUNT] = [
        Tile::Empty,
        Tile::Water,
        Tile::Mountain,
        Tile::Farm,
        Tile::Park,
        Tile::Home,
        Tile::Office,
        Tile::Hospital,
        Tile::School,
        Tile::Metro,
        Tile::Station,
        Tile::Walk,
        Tile::Road,
    ];

    /// Integer code used in serialized grids.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a tile by its code.
    pub fn from_code(code: u8) -> Option<Tile> {
        Tile::ALL.get(code as usize).copied()
    }

    /// Legend name.
    pub fn name(self) -> &'static str {
        match self {
            Tile::Empty => "EMPTY",
            Tile::Water => "WATER",
            Tile::Mountain => "MOUNTAIN",
            Tile::Farm => "FARM",
            Tile::Park => "PARK",
            Tile::Home => "HOME",
            Tile::Office => "OFFICE",
            Tile::Hospital => "HOSPITAL",
            Tile::School => "SCHOOL",
            Tile::Metro => "METRO",
            Tile::Station => "STATION",
            Tile::Walk => "WALK",
            Tile::Road => "ROAD",
        }
    }

    /// Reverse of [`Tile::name`], case-insensitive.
    pub fn from_name(name: &str) -> Option<Tile> {
        Tile::ALL
            .into_iter()
            .find(|tile| tile.name().eq_ignore_ascii_case(name))
    }

    /// Human-readable description for tooltips and reports.
    pub fn description(self) -> &'static str {
        match self {
            Tile::Empty => "Undeveloped land",
            Tile::Water => "River, lake or coastline",
            Tile::Mountain => "Mountain ridge",
            Tile::Farm => "Farmland",
            Tile::Park => "Park / green space",
            Tile::Home => "Residential",
            Tile::Office => "Commercial / office",
            Tile::Hospital => "Hospital",
            Tile::School => "School",
            Tile::Metro => "Metro line",
            Tile::Station => "Metro station",
            Tile::Walk => "Pedestrian path",
            Tile::Road => "Road",
        }
    }

    /// Natural features laid down by terrain synthesis.
    pub fn is_terrain(self) -> bool {
        matches!(self, Tile::Water | Tile::Mountain)
    }

    /// Tiles that carry a placement quota.
    pub fn is_quota_bound(self) -> bool {
        matches!(
            self,
            Tile::Farm | Tile::Park | Tile::Home | Tile::Office | Tile::Hospital | Tile::School
        )
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Tile {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Tile::from_code(code).ok_or(code)
    }
}

impl Serialize for Tile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Tile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Tile::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown tile code {code}")))
    }
}

/// Code → name map attached to every plan.
pub type Legend = BTreeMap<u8, &'static str>;

/// The process-wide legend, built once and shared read-only.
pub fn legend() -> &'static Legend {
    static LEGEND: OnceLock<Legend> = OnceLock::new();
    LEGEND.get_or_init(|| Tile::ALL.iter().map(|t| (t.code(), t.name())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_registry() {
        for (i, tile) in Tile::ALL.iter().enumerate() {
            assert_eq!(tile.code() as usize, i);
            assert_eq!(Tile::from_code(tile.code()), Some(*tile));
            assert_eq!(Tile::from_name(tile.name()), Some(*tile));
        }
        assert_eq!(Tile::from_code(13), None);
        assert_eq!(Tile::try_from(200u8), Err(200));
    }

    #[test]
    fn legend_has_every_kind() {
        let legend = legend();
        assert_eq!(legend.len(), Tile::COUNT);
        assert_eq!(legend[&0], "EMPTY");
        assert_eq!(legend[&12], "ROAD");
        assert!(std::ptr::eq(legend, super::legend()));
    }

    #[test]
    fn tile_serializes_as_code() {
        let json = serde_json::to_string(&vec![Tile::Road, Tile::Water]).unwrap();
        assert_eq!(json, "[12,1]");
        let back: Vec<Tile> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Tile::Road, Tile::Water]);
        assert!(serde_json::from_str::<Tile>("42").is_err());
    }
}
