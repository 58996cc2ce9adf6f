//! Task record.
//!
//! A task is a unit of work that consumes `duration` phases and needs a
//! set of skills. Clients request tasks by id; rules target tasks by id.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::normalize::CellValue;

/// A task row after normalization.
///
/// Numeric columns are kept as `f64` so that fractional or negative cell
/// values survive normalization and can be reported by validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Unique task identifier.
    #[serde(rename = "TaskID")]
    pub id: String,
    /// Human-readable name.
    #[serde(rename = "TaskName")]
    pub name: String,
    /// Optional grouping category.
    #[serde(rename = "Category", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Phases consumed (integer >= 1).
    #[serde(rename = "Duration")]
    pub duration: f64,
    /// Skills a worker must offer to run this task.
    #[serde(rename = "RequiredSkills", default)]
    pub required_skills: Vec<String>,
    /// Phases this task would prefer to run in.
    #[serde(rename = "PreferredPhases", default)]
    pub preferred_phases: Vec<f64>,
    /// Maximum number of workers running this task at once (integer >= 1).
    #[serde(rename = "MaxConcurrent")]
    pub max_concurrent: f64,
    /// Columns that did not map to a known header.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, CellValue>,
}

impl TaskRecord {
    /// Creates a task with the given ID and defaults of `duration = 1`,
    /// `max_concurrent = 1`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            duration: 1.0,
            max_concurrent: 1.0,
            ..Self::default()
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the duration in phases.
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Adds a required skill.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.required_skills.push(skill.into());
        self
    }

    /// Replaces the preferred phase list.
    pub fn with_preferred_phases(mut self, phases: impl IntoIterator<Item = f64>) -> Self {
        self.preferred_phases = phases.into_iter().collect();
        self
    }

    /// Sets the concurrency limit.
    pub fn with_max_concurrent(mut self, max: f64) -> Self {
        self.max_concurrent = max;
        self
    }

    /// Whether this task lists `phase` among its preferred phases.
    pub fn prefers_phase(&self, phase: f64) -> bool {
        self.preferred_phases.iter().any(|&p| p == phase)
    }
}
