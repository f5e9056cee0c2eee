//! Crew Identity and Status

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a crew member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrewId(pub u32);

impl fmt::Display for CrewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "crew_{:03}", self.0)
    }
}

/// Derived health status of a crew member.
///
/// Ordered from best to worst so that `max()` over a roster yields the most
/// urgent status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrewStatus {
    Healthy,
    Poor,
    Critical,
    Dead,
}

impl fmt::Display for CrewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrewStatus::Healthy => write!(f, "healthy"),
            CrewStatus::Poor => write!(f, "poor"),
            CrewStatus::Critical => write!(f, "critical"),
            CrewStatus::Dead => write!(f, "dead"),
        }
    }
}
