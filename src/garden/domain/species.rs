//! Plant species and the effort-keyed species pools.

use super::ParsePlantTypeError;
use crate::ledger::domain::EffortWeight;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the nine plant species a completed task can grow into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantType {
    /// Light-effort flower.
    Daisy,
    /// Light-effort flower.
    Tulip,
    /// Light-effort flower.
    Poppy,
    /// Medium-effort shrub.
    Rose,
    /// Medium-effort flower.
    Sunflower,
    /// Medium-effort shrub.
    Lavender,
    /// Heavy-effort tree.
    Oak,
    /// Heavy-effort tree.
    CherryBlossom,
    /// Heavy-effort tree.
    Maple,
}

/// Number of species in each effort pool.
pub const SPECIES_PER_POOL: usize = 3;

const LIGHT_POOL: [PlantType; SPECIES_PER_POOL] =
    [PlantType::Daisy, PlantType::Tulip, PlantType::Poppy];
const MEDIUM_POOL: [PlantType; SPECIES_PER_POOL] =
    [PlantType::Rose, PlantType::Sunflower, PlantType::Lavender];
const HEAVY_POOL: [PlantType; SPECIES_PER_POOL] =
    [PlantType::Oak, PlantType::CherryBlossom, PlantType::Maple];

impl PlantType {
    /// Returns the species pool a task of the given effort draws from.
    ///
    /// The three pools are disjoint and together cover every species.
    #[must_use]
    pub const fn pool_for(effort: EffortWeight) -> &'static [Self; SPECIES_PER_POOL] {
        match effort {
            EffortWeight::Light => &LIGHT_POOL,
            EffortWeight::Medium => &MEDIUM_POOL,
            EffortWeight::Heavy => &HEAVY_POOL,
        }
    }

    /// Returns the effort weight whose pool contains this species.
    #[must_use]
    pub const fn effort_weight(self) -> EffortWeight {
        match self {
            Self::Daisy | Self::Tulip | Self::Poppy => EffortWeight::Light,
            Self::Rose | Self::Sunflower | Self::Lavender => EffortWeight::Medium,
            Self::Oak | Self::CherryBlossom | Self::Maple => EffortWeight::Heavy,
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daisy => "daisy",
            Self::Tulip => "tulip",
            Self::Poppy => "poppy",
            Self::Rose => "rose",
            Self::Sunflower => "sunflower",
            Self::Lavender => "lavender",
            Self::Oak => "oak",
            Self::CherryBlossom => "cherry_blossom",
            Self::Maple => "maple",
        }
    }
}

impl fmt::Display for PlantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PlantType {
    type Error = ParsePlantTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "daisy" => Ok(Self::Daisy),
            "tulip" => Ok(Self::Tulip),
            "poppy" => Ok(Self::Poppy),
            "rose" => Ok(Self::Rose),
            "sunflower" => Ok(Self::Sunflower),
            "lavender" => Ok(Self::Lavender),
            "oak" => Ok(Self::Oak),
            "cherry_blossom" => Ok(Self::CherryBlossom),
            "maple" => Ok(Self::Maple),
            _ => Err(ParsePlantTypeError(value.to_owned())),
        }
    }
}
