//! Validation findings.
//!
//! A diagnostic is derived output: it is recomputed on every validation
//! pass and never stored.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Collection a diagnostic is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Clients,
    Workers,
    Tasks,
    Rules,
    Global,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Workers => "workers",
            Self::Tasks => "tasks",
            Self::Rules => "rules",
            Self::Global => "global",
        }
    }

    /// Parses a lowercase entity name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "clients" => Some(Self::Clients),
            "workers" => Some(Self::Workers),
            "tasks" => Some(Self::Tasks),
            "rules" => Some(Self::Rules),
            "global" => Some(Self::Global),
            _ => None,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How serious a finding is.
///
/// `Error` should block export; `Warning` is advisory. The engine never
/// emits `Info` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Record id, rule id (`rule-<n>`), or synthetic id (`phase-<n>`).
    pub id: String,
    pub entity: Entity,
    /// Column or rule field the finding is attached to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    /// Creates an error diagnostic without a field.
    pub fn error(entity: Entity, id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entity,
            field: None,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Creates a warning diagnostic without a field.
    pub fn warning(entity: Entity, id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(entity, id, message)
        }
    }

    /// Attaches the diagnostic to a field.
    pub fn on_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Index key: `entity:id:field`, or `entity:id` without a field.
    pub fn key(&self) -> String {
        diagnostic_key(self.entity, &self.id, self.field.as_deref())
    }
}

/// Builds the lookup key shared by [`Diagnostic::key`] and the index.
pub fn diagnostic_key(entity: Entity, id: &str, field: Option<&str>) -> String {
    match field {
        Some(f) if !f.is_empty() => format!("{entity}:{id}:{f}"),
        _ => format!("{entity}:{id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_constructors() {
        let d = Diagnostic::error(Entity::Tasks, "T9", "bad").on_field("Duration");
        assert!(d.is_error());
        assert_eq!(d.field.as_deref(), Some("Duration"));

        let w = Diagnostic::warning(Entity::Global, "phase-2", "over");
        assert_eq!(w.severity, Severity::Warning);
        assert!(w.field.is_none());
    }

    #[test]
    fn test_key_format() {
        let d = Diagnostic::error(Entity::Tasks, "T9", "bad").on_field("Duration");
        assert_eq!(d.key(), "tasks:T9:Duration");
        let d = Diagnostic::error(Entity::Clients, "C1", "dup");
        assert_eq!(d.key(), "clients:C1");
    }

    #[test]
    fn test_wire_shape() {
        let d = Diagnostic::warning(Entity::Workers, "W1", "m").on_field("MaxLoadPerPhase");
        assert_eq!(
            serde_json::to_value(&d).unwrap(),
            json!({
                "id": "W1",
                "entity": "workers",
                "field": "MaxLoadPerPhase",
                "message": "m",
                "severity": "warning"
            })
        );
    }

    #[test]
    fn test_entity_parse() {
        assert_eq!(Entity::parse("rules"), Some(Entity::Rules));
        assert_eq!(Entity::parse("Rules"), None);
    }
}
