//! Configuration System
//!
//! Loads the voyage tables (resource metadata, crew presets, hull tuning) from
//! a TOML file. Everything here is read-only once a voyage is constructed.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use voyage_events::{CrewId, ResourceCategory, ResourceType, Vital};

use crate::crew::{DecayRange, DecayRanges, Vitals, VITAL_MAX, VITAL_MIN};
use crate::hull::HULL_MAX;

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "voyage.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoyageConfig {
    #[serde(default)]
    pub voyage: VoyageSettings,
    #[serde(default)]
    pub hull: HullConfig,
    #[serde(default = "default_resources")]
    pub resources: Vec<ResourceSpec>,
    #[serde(default = "default_crew")]
    pub crew: Vec<CrewPreset>,
    /// Haul table used by the autopilot harness only
    #[serde(default = "default_dive")]
    pub dive: DiveConfig,
}

/// Voyage length and seeding
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoyageSettings {
    /// Survival target: reaching this day wins the voyage
    pub max_days: u32,
    pub seed: u64,
}

impl Default for VoyageSettings {
    fn default() -> Self {
        Self {
            max_days: 7,
            seed: 42,
        }
    }
}

/// Ship hull tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HullConfig {
    pub initial_integrity: f32,
    pub daily_decay: f32,
    /// Material consumed by a plain `repair_ship` command
    pub repair_material: ResourceType,
}

impl Default for HullConfig {
    fn default() -> Self {
        Self {
            initial_integrity: 100.0,
            daily_decay: 8.0,
            repair_material: ResourceType::Plank,
        }
    }
}

/// Static metadata for one resource type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSpec {
    pub kind: ResourceType,
    pub category: ResourceCategory,
    /// Hunger restored per unit
    #[serde(default)]
    pub hunger: f32,
    /// Thirst restored per unit
    #[serde(default)]
    pub thirst: f32,
    /// Temperature restored per unit
    #[serde(default)]
    pub temperature: f32,
    /// Hull integrity restored per unit of material
    #[serde(default = "default_repair_ratio")]
    pub hull_repair: f32,
    #[serde(default)]
    pub initial_stock: u32,
}

fn default_repair_ratio() -> f32 {
    1.0
}

impl ResourceSpec {
    pub fn new(kind: ResourceType, category: ResourceCategory) -> Self {
        Self {
            kind,
            category,
            hunger: 0.0,
            thirst: 0.0,
            temperature: 0.0,
            hull_repair: default_repair_ratio(),
            initial_stock: 0,
        }
    }

    pub fn with_recovery(mut self, vital: Vital, amount: f32) -> Self {
        match vital {
            Vital::Hunger => self.hunger = amount,
            Vital::Thirst => self.thirst = amount,
            Vital::Temperature => self.temperature = amount,
        }
        self
    }

    pub fn with_hull_repair(mut self, ratio: f32) -> Self {
        self.hull_repair = ratio;
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.initial_stock = stock;
        self
    }

    /// Amount of `vital` restored by one unit.
    pub fn recovery(&self, vital: Vital) -> f32 {
        match vital {
            Vital::Hunger => self.hunger,
            Vital::Thirst => self.thirst,
            Vital::Temperature => self.temperature,
        }
    }
}

/// Starting values and tuning for one crew member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewPreset {
    pub id: CrewId,
    pub name: String,
    #[serde(default = "default_critical_threshold")]
    pub critical_threshold: f32,
    #[serde(default = "default_poor_threshold")]
    pub poor_threshold: f32,
    #[serde(default = "Vitals::full")]
    pub vitals: Vitals,
    /// Multipliers applied to resource recovery, per vital
    #[serde(default = "default_recovery")]
    pub recovery: Vitals,
    pub decay: DecayRanges,
}

fn default_critical_threshold() -> f32 {
    20.0
}

fn default_poor_threshold() -> f32 {
    50.0
}

fn default_recovery() -> Vitals {
    Vitals::uniform(1.0)
}

impl CrewPreset {
    /// Preset with full vitals, default thresholds and the given decay.
    pub fn new(id: u32, name: impl Into<String>, decay: DecayRanges) -> Self {
        Self {
            id: CrewId(id),
            name: name.into(),
            critical_threshold: default_critical_threshold(),
            poor_threshold: default_poor_threshold(),
            vitals: Vitals::full(),
            recovery: default_recovery(),
            decay,
        }
    }

    pub fn with_vitals(mut self, vitals: Vitals) -> Self {
        self.vitals = vitals;
        self
    }

    pub fn with_recovery(mut self, recovery: Vitals) -> Self {
        self.recovery = recovery;
        self
    }

    pub fn with_thresholds(mut self, critical: f32, poor: f32) -> Self {
        self.critical_threshold = critical;
        self.poor_threshold = poor;
        self
    }
}

/// Dive haul table for the autopilot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiveConfig {
    #[serde(default)]
    pub haul: Vec<HaulEntry>,
}

/// Uniform draw of `min..=max` units of a resource per dive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HaulEntry {
    pub resource: ResourceType,
    pub min: u32,
    pub max: u32,
}

/// Read-only lookup from resource type to its metadata.
///
/// This is the single place where a resource's category is decided.
#[derive(Debug, Clone, Default)]
pub struct ResourceTable {
    specs: BTreeMap<ResourceType, ResourceSpec>,
}

impl ResourceTable {
    pub fn new(specs: impl IntoIterator<Item = ResourceSpec>) -> Self {
        Self {
            specs: specs.into_iter().map(|s| (s.kind, s)).collect(),
        }
    }

    pub fn get(&self, resource: ResourceType) -> Option<&ResourceSpec> {
        self.specs.get(&resource)
    }

    pub fn category_of(&self, resource: ResourceType) -> Option<ResourceCategory> {
        self.get(resource).map(|s| s.category)
    }

    /// Resource types belonging to `category`, in stable order.
    pub fn of_category(&self, category: ResourceCategory) -> Vec<ResourceType> {
        self.specs
            .values()
            .filter(|s| s.category == category)
            .map(|s| s.kind)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceSpec> {
        self.specs.values()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl VoyageConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from the default path, or uses defaults if not found
    pub fn load_or_default() -> Self {
        Self::from_file(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_CONFIG_PATH, e);
            Self::default()
        })
    }

    /// Serializes the configuration as pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Builds the resource metadata lookup.
    pub fn resource_table(&self) -> ResourceTable {
        ResourceTable::new(self.resources.iter().cloned())
    }

    /// Checks the cross-field rules serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.voyage.max_days == 0 {
            return Err(ConfigError::invalid("voyage.max_days must be at least 1"));
        }
        if !(0.0..=HULL_MAX).contains(&self.hull.initial_integrity) {
            return Err(ConfigError::invalid("hull.initial_integrity must be within 0-100"));
        }
        if !self.hull.daily_decay.is_finite() || self.hull.daily_decay < 0.0 {
            return Err(ConfigError::invalid("hull.daily_decay must be a non-negative number"));
        }

        let mut kinds = HashSet::new();
        for spec in &self.resources {
            if !kinds.insert(spec.kind) {
                return Err(ConfigError::invalid(format!(
                    "resource {} is listed more than once",
                    spec.kind
                )));
            }
            let recoveries = [spec.hunger, spec.thirst, spec.temperature, spec.hull_repair];
            if recoveries.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(ConfigError::invalid(format!(
                    "resource {} has a negative or non-finite recovery amount",
                    spec.kind
                )));
            }
        }

        match self.resources.iter().find(|s| s.kind == self.hull.repair_material) {
            Some(spec) if spec.category == ResourceCategory::Material => {}
            Some(spec) => {
                return Err(ConfigError::invalid(format!(
                    "hull.repair_material {} is {}, not material",
                    spec.kind, spec.category
                )))
            }
            None => {
                return Err(ConfigError::invalid(format!(
                    "hull.repair_material {} has no resource entry",
                    self.hull.repair_material
                )))
            }
        }

        let mut ids = HashSet::new();
        for preset in &self.crew {
            if !ids.insert(preset.id) {
                return Err(ConfigError::invalid(format!(
                    "crew id {} is used more than once",
                    preset.id.0
                )));
            }
            if !preset.critical_threshold.is_finite() || !preset.poor_threshold.is_finite() {
                return Err(ConfigError::invalid(format!(
                    "{}: thresholds must be finite",
                    preset.name
                )));
            }
            if preset.critical_threshold >= preset.poor_threshold {
                return Err(ConfigError::invalid(format!(
                    "{}: critical_threshold must be below poor_threshold",
                    preset.name
                )));
            }
            for vital in Vital::all() {
                let value = preset.vitals.get(vital);
                if !(VITAL_MIN..=VITAL_MAX).contains(&value) {
                    return Err(ConfigError::invalid(format!(
                        "{}: initial {} {} is outside 0-100",
                        preset.name, vital, value
                    )));
                }
                let range = preset.decay.get(vital);
                if !range.min.is_finite()
                    || !range.max.is_finite()
                    || range.min < 0.0
                    || range.min > range.max
                {
                    return Err(ConfigError::invalid(format!(
                        "{}: {} decay range {}-{} is invalid",
                        preset.name, vital, range.min, range.max
                    )));
                }
                let multiplier = preset.recovery.get(vital);
                if !multiplier.is_finite() || multiplier < 0.0 {
                    return Err(ConfigError::invalid(format!(
                        "{}: {} recovery multiplier must be a non-negative number",
                        preset.name, vital
                    )));
                }
            }
        }

        for entry in &self.dive.haul {
            if entry.min > entry.max {
                return Err(ConfigError::invalid(format!(
                    "dive haul for {} has min above max",
                    entry.resource
                )));
            }
        }

        Ok(())
    }
}

impl Default for VoyageConfig {
    fn default() -> Self {
        Self {
            voyage: VoyageSettings::default(),
            hull: HullConfig::default(),
            resources: default_resources(),
            crew: default_crew(),
            dive: default_dive(),
        }
    }
}

fn default_dive() -> DiveConfig {
    DiveConfig {
        haul: vec![
            haul_entry(ResourceType::Fish, 0, 3),
            haul_entry(ResourceType::CannedFood, 0, 1),
            haul_entry(ResourceType::FreshWater, 0, 3),
            haul_entry(ResourceType::Medicine, 0, 1),
            haul_entry(ResourceType::Plank, 0, 4),
            haul_entry(ResourceType::ScrapMetal, 0, 2),
        ],
    }
}

fn haul_entry(resource: ResourceType, min: u32, max: u32) -> HaulEntry {
    HaulEntry { resource, min, max }
}

fn default_resources() -> Vec<ResourceSpec> {
    vec![
        ResourceSpec::new(ResourceType::Fish, ResourceCategory::Food)
            .with_recovery(Vital::Hunger, 25.0)
            .with_stock(3),
        ResourceSpec::new(ResourceType::CannedFood, ResourceCategory::Food)
            .with_recovery(Vital::Hunger, 35.0)
            .with_stock(2),
        ResourceSpec::new(ResourceType::FreshWater, ResourceCategory::Water)
            .with_recovery(Vital::Thirst, 30.0)
            .with_stock(5),
        ResourceSpec::new(ResourceType::Medicine, ResourceCategory::Medicine)
            .with_recovery(Vital::Temperature, 40.0)
            .with_stock(2),
        ResourceSpec::new(ResourceType::Plank, ResourceCategory::Material)
            .with_hull_repair(1.0)
            .with_stock(10),
        ResourceSpec::new(ResourceType::ScrapMetal, ResourceCategory::Material)
            .with_hull_repair(1.5),
    ]
}

fn default_crew() -> Vec<CrewPreset> {
    let steady = DecayRanges::new(
        DecayRange::new(8.0, 14.0),
        DecayRange::new(10.0, 16.0),
        DecayRange::new(4.0, 10.0),
    );
    vec![
        CrewPreset::new(1, "Ilse", steady)
            .with_vitals(Vitals::new(85.0, 80.0, 90.0)),
        CrewPreset::new(
            2,
            "Bram",
            DecayRanges::new(
                DecayRange::new(10.0, 18.0),
                DecayRange::new(8.0, 14.0),
                DecayRange::new(3.0, 8.0),
            ),
        )
        .with_vitals(Vitals::new(90.0, 85.0, 95.0))
        .with_recovery(Vitals::new(0.9, 1.0, 1.0)),
        CrewPreset::new(
            3,
            "Tomas",
            DecayRanges::new(
                DecayRange::new(6.0, 12.0),
                DecayRange::new(10.0, 15.0),
                DecayRange::new(6.0, 12.0),
            ),
        )
        .with_vitals(Vitals::new(75.0, 80.0, 70.0))
        .with_thresholds(25.0, 55.0),
        CrewPreset::new(4, "Ada", steady)
            .with_vitals(Vitals::new(80.0, 90.0, 85.0))
            .with_recovery(Vitals::new(1.0, 1.1, 1.2)),
    ]
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    fn invalid(message: impl Into<String>) -> Self {
        ConfigError::Invalid(message.into())
    }
}
