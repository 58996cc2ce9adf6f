//! Worker record.
//!
//! Workers offer skills and are available in a set of phases, each with a
//! per-phase load ceiling. Workers can be grouped by a free-form tag that
//! load-limit and slot-restriction rules target.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::normalize::CellValue;

/// A worker row after normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerRecord {
    /// Unique worker identifier.
    #[serde(rename = "WorkerID")]
    pub id: String,
    /// Human-readable name.
    #[serde(rename = "WorkerName")]
    pub name: String,
    /// Offered skills. Order is irrelevant for matching.
    #[serde(rename = "Skills", default)]
    pub skills: Vec<String>,
    /// Phases in which this worker can be assigned.
    #[serde(rename = "AvailableSlots", default)]
    pub available_slots: Vec<f64>,
    /// Maximum concurrent load per phase (integer >= 1).
    #[serde(rename = "MaxLoadPerPhase")]
    pub max_load_per_phase: f64,
    /// Optional group tag.
    #[serde(rename = "WorkerGroup", default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Optional qualification level (integer 1..=10).
    #[serde(
        rename = "QualificationLevel",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub qualification_level: Option<f64>,
    /// Columns that did not map to a known header.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, CellValue>,
}

impl WorkerRecord {
    /// Creates a worker with the given ID and a load ceiling of 1.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            max_load_per_phase: 1.0,
            ..Self::default()
        }
    }

    /// Sets the worker name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a skill.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.push(skill.into());
        self
    }

    /// Replaces the available phase list.
    pub fn with_slots(mut self, slots: impl IntoIterator<Item = f64>) -> Self {
        self.available_slots = slots.into_iter().collect();
        self
    }

    /// Sets the per-phase load ceiling.
    pub fn with_max_load(mut self, max_load: f64) -> Self {
        self.max_load_per_phase = max_load;
        self
    }

    /// Sets the group tag.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets the qualification level.
    pub fn with_qualification(mut self, level: f64) -> Self {
        self.qualification_level = Some(level);
        self
    }

    /// Whether this worker offers a given skill.
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    /// Whether this worker offers every skill in `required`.
    pub fn covers(&self, required: &[String]) -> bool {
        required.iter().all(|s| self.has_skill(s))
    }

    /// Whether this worker is available in `phase`.
    pub fn is_available_in(&self, phase: f64) -> bool {
        self.available_slots.iter().any(|&p| p == phase)
    }
}
