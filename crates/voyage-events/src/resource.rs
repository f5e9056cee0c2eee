//! Resource Types
//!
//! The closed set of resource kinds, the categories they belong to and the
//! crew vitals those categories restore.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A kind of resource held in the shared ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Fish,
    CannedFood,
    FreshWater,
    Medicine,
    Plank,
    ScrapMetal,
}

impl ResourceType {
    /// Returns all resource variants.
    pub fn all() -> &'static [ResourceType] {
        &[
            ResourceType::Fish,
            ResourceType::CannedFood,
            ResourceType::FreshWater,
            ResourceType::Medicine,
            ResourceType::Plank,
            ResourceType::ScrapMetal,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Fish => "fish",
            ResourceType::CannedFood => "canned_food",
            ResourceType::FreshWater => "fresh_water",
            ResourceType::Medicine => "medicine",
            ResourceType::Plank => "plank",
            ResourceType::ScrapMetal => "scrap_metal",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a resource name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResourceError(pub String);

impl fmt::Display for ParseResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown resource type: '{}'", self.0)
    }
}

impl std::error::Error for ParseResourceError {}

impl FromStr for ResourceType {
    type Err = ParseResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ResourceType::all()
            .iter()
            .copied()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| ParseResourceError(s.to_string()))
    }
}

/// Grouping of resource types by what they do for the crew or the ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    Food,
    Water,
    Medicine,
    /// Hull repair stock; never handed to crew
    Material,
}

impl ResourceCategory {
    /// The crew vital this category restores, if any.
    pub fn vital(self) -> Option<Vital> {
        match self {
            ResourceCategory::Food => Some(Vital::Hunger),
            ResourceCategory::Water => Some(Vital::Thirst),
            ResourceCategory::Medicine => Some(Vital::Temperature),
            ResourceCategory::Material => None,
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceCategory::Food => write!(f, "food"),
            ResourceCategory::Water => write!(f, "water"),
            ResourceCategory::Medicine => write!(f, "medicine"),
            ResourceCategory::Material => write!(f, "material"),
        }
    }
}

/// One of the three crew survival gauges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vital {
    Hunger,
    Thirst,
    Temperature,
}

impl Vital {
    pub fn all() -> [Vital; 3] {
        [Vital::Hunger, Vital::Thirst, Vital::Temperature]
    }
}

impl fmt::Display for Vital {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vital::Hunger => write!(f, "hunger"),
            Vital::Thirst => write!(f, "thirst"),
            Vital::Temperature => write!(f, "temperature"),
        }
    }
}
