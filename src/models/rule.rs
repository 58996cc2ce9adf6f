//! Allocation rules.
//!
//! A closed set of constraint kinds shared by the structured rule builder
//! and the text-rule parser. Rules carry no stored identity: diagnostics
//! address a rule by its position in the rule list.
//!
//! The serialized shape is internally tagged by `type`, e.g.
//! `{"type":"coRun","tasks":["T1","T2"]}`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Group kinds a rule can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKind {
    ClientGroup,
    WorkerGroup,
}

impl GroupKind {
    /// Case-insensitive lookup used by the text parser.
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("ClientGroup") {
            Some(Self::ClientGroup)
        } else if s.eq_ignore_ascii_case("WorkerGroup") {
            Some(Self::WorkerGroup)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientGroup => "ClientGroup",
            Self::WorkerGroup => "WorkerGroup",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A group selector: which kind of group, and its tag value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupTarget {
    pub kind: GroupKind,
    pub value: String,
}

impl GroupTarget {
    pub fn client_group(value: impl Into<String>) -> Self {
        Self {
            kind: GroupKind::ClientGroup,
            value: value.into(),
        }
    }

    pub fn worker_group(value: impl Into<String>) -> Self {
        Self {
            kind: GroupKind::WorkerGroup,
            value: value.into(),
        }
    }
}

/// Scope of a precedence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecedenceScope {
    Global,
    Specific,
}

/// An allocation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Rule {
    /// Listed tasks must all run in the same phase.
    CoRun { tasks: Vec<String> },

    /// Workers of `target` may take at most `max_slots_per_phase` slots in
    /// any phase.
    #[serde(rename_all = "camelCase")]
    LoadLimit {
        target: GroupTarget,
        max_slots_per_phase: u32,
    },

    /// `task_id` may only run in `allowed_phases`.
    #[serde(rename_all = "camelCase")]
    PhaseWindow {
        task_id: String,
        allowed_phases: Vec<f64>,
    },

    /// Members of `target` must share at least `min_common_slots` phases.
    #[serde(rename_all = "camelCase")]
    SlotRestriction {
        target: GroupTarget,
        min_common_slots: u32,
    },

    /// Records matching `regex` are handled by the named template.
    PatternMatch {
        regex: String,
        template: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        params: Option<serde_json::Map<String, serde_json::Value>>,
    },

    /// Ordering weight of this rule set relative to others.
    Precedence {
        scope: PrecedenceScope,
        priority: i64,
    },
}

impl Rule {
    /// Creates a co-run rule.
    pub fn co_run<I, S>(tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::CoRun {
            tasks: tasks.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a load-limit rule for a worker group.
    pub fn load_limit(worker_group: impl Into<String>, max_slots_per_phase: u32) -> Self {
        Self::LoadLimit {
            target: GroupTarget::worker_group(worker_group),
            max_slots_per_phase,
        }
    }

    /// Creates a phase-window rule.
    pub fn phase_window(task_id: impl Into<String>, allowed_phases: Vec<f64>) -> Self {
        Self::PhaseWindow {
            task_id: task_id.into(),
            allowed_phases,
        }
    }

    /// Creates a slot-restriction rule.
    pub fn slot_restriction(target: GroupTarget, min_common_slots: u32) -> Self {
        Self::SlotRestriction {
            target,
            min_common_slots,
        }
    }

    /// Creates a pattern-match rule without parameters.
    pub fn pattern_match(regex: impl Into<String>, template: impl Into<String>) -> Self {
        Self::PatternMatch {
            regex: regex.into(),
            template: template.into(),
            params: None,
        }
    }

    /// Creates a global precedence rule.
    pub fn global_precedence(priority: i64) -> Self {
        Self::Precedence {
            scope: PrecedenceScope::Global,
            priority,
        }
    }

    /// Wire name of the variant (`coRun`, `loadLimit`, ...).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CoRun { .. } => "coRun",
            Self::LoadLimit { .. } => "loadLimit",
            Self::PhaseWindow { .. } => "phaseWindow",
            Self::SlotRestriction { .. } => "slotRestriction",
            Self::PatternMatch { .. } => "patternMatch",
            Self::Precedence { .. } => "precedence",
        }
    }

    /// Task ids this rule refers to.
    pub fn referenced_task_ids(&self) -> Vec<&str> {
        match self {
            Self::CoRun { tasks } => tasks.iter().map(String::as_str).collect(),
            Self::PhaseWindow { task_id, .. } => vec![task_id.as_str()],
            Self::LoadLimit { .. }
            | Self::SlotRestriction { .. }
            | Self::PatternMatch { .. }
            | Self::Precedence { .. } => Vec::new(),
        }
    }

    /// Group this rule targets, if any.
    pub fn group_target(&self) -> Option<&GroupTarget> {
        match self {
            Self::LoadLimit { target, .. } | Self::SlotRestriction { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Positional id used to address the rule at `index` in diagnostics.
    pub fn validation_id(index: usize) -> String {
        format!("rule-{index}")
    }
}
