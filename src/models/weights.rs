//! Prioritization weights.
//!
//! Slider values (0..=100) describing how a downstream allocator should
//! trade off competing objectives. This crate only carries them; it does
//! not optimize against them.

use serde::{Deserialize, Serialize};

/// Objective weights, each in 0..=100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weights {
    pub priority_level: u8,
    pub requested_task_fulfillment: u8,
    pub fairness: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<u8>,
}

/// Named weight profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeightPreset {
    MaximizeFulfillment,
    FairDistribution,
    MinimizeTime,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            priority_level: 50,
            requested_task_fulfillment: 50,
            fairness: 50,
            cost: None,
            speed: None,
        }
    }
}

impl Weights {
    /// Weights for a named preset.
    pub fn preset(preset: WeightPreset) -> Self {
        let (priority_level, requested_task_fulfillment, fairness, cost, speed) = match preset {
            WeightPreset::MaximizeFulfillment => (70, 90, 40, 50, 40),
            WeightPreset::FairDistribution => (50, 60, 90, 50, 50),
            WeightPreset::MinimizeTime => (60, 50, 40, 50, 90),
        };
        Self {
            priority_level,
            requested_task_fulfillment,
            fairness,
            cost: Some(cost),
            speed: Some(speed),
        }
    }

    /// Copy with every weight clamped into 0..=100.
    pub fn clamped(&self) -> Self {
        let c = |v: u8| v.min(100);
        Self {
            priority_level: c(self.priority_level),
            requested_task_fulfillment: c(self.requested_task_fulfillment),
            fairness: c(self.fairness),
            cost: self.cost.map(c),
            speed: self.speed.map(c),
        }
    }
}
