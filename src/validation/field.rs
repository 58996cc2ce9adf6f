//! Single-cell checks for in-place edits.
//!
//! These run before an edited value is committed, so there is no record id
//! yet; findings are addressed as `temp`.

use super::{is_integer, is_positive_integer, IntRange};
use crate::models::columns::*;
use crate::models::{Diagnostic, Entity};
use crate::normalize::{parse_number, parse_number_list_str, CellValue};

const TEMP_ID: &str = "temp";

/// Numeric reading of an edited cell.
enum Edited {
    Blank,
    Number(f64),
    Invalid,
}

fn edited_number(value: &CellValue) -> Edited {
    match value {
        CellValue::Null => Edited::Blank,
        CellValue::Text(s) if s.trim().is_empty() => Edited::Blank,
        CellValue::Text(s) => parse_number(s).map_or(Edited::Invalid, Edited::Number),
        CellValue::Number(n) => Edited::Number(*n),
        CellValue::Bool(b) => Edited::Number(if *b { 1.0 } else { 0.0 }),
        CellValue::List(_) => Edited::Invalid,
    }
}

fn at_least_one(value: &CellValue) -> bool {
    match edited_number(value) {
        Edited::Number(n) => is_integer(n) && n >= 1.0,
        Edited::Blank => true,
        Edited::Invalid => false,
    }
}

fn slots_valid(value: &CellValue) -> bool {
    match value {
        CellValue::Null => true,
        CellValue::Number(n) => is_positive_integer(*n),
        CellValue::Text(s) if s.trim().is_empty() => true,
        CellValue::Text(s) => {
            let phases = parse_number_list_str(s);
            !phases.is_empty() && phases.into_iter().all(is_positive_integer)
        }
        CellValue::List(items) => items
            .iter()
            .all(|c| matches!(c, CellValue::Number(n) if is_positive_integer(*n))),
        CellValue::Bool(_) => false,
    }
}

pub(super) fn check_field(
    entity: Entity,
    field: &str,
    value: &CellValue,
    priority: IntRange,
) -> Vec<Diagnostic> {
    let message = match (entity, field) {
        (Entity::Clients, PRIORITY_LEVEL) => {
            let ok = match edited_number(value) {
                Edited::Number(n) => priority.contains(n),
                Edited::Blank => true,
                Edited::Invalid => false,
            };
            (!ok).then(|| {
                format!(
                    "PriorityLevel must be integer between {}-{}",
                    priority.min, priority.max
                )
            })
        }
        (Entity::Clients, ATTRIBUTES_JSON) => match value {
            CellValue::Text(s) if !s.trim().is_empty() => {
                serde_json::from_str::<serde_json::Value>(s)
                    .is_err()
                    .then(|| "AttributesJSON contains invalid JSON".to_string())
            }
            _ => None,
        },
        (Entity::Workers, MAX_LOAD_PER_PHASE) => (!at_least_one(value))
            .then(|| "MaxLoadPerPhase must be integer >= 1".to_string()),
        (Entity::Workers, AVAILABLE_SLOTS) => (!slots_valid(value))
            .then(|| "AvailableSlots must be array of positive integers".to_string()),
        (Entity::Tasks, DURATION) => {
            (!at_least_one(value)).then(|| "Duration must be integer >= 1".to_string())
        }
        (Entity::Tasks, MAX_CONCURRENT) => {
            (!at_least_one(value)).then(|| "MaxConcurrent must be integer >= 1".to_string())
        }
        _ => None,
    };

    message
        .map(|m| Diagnostic::error(entity, TEMP_ID, m).on_field(field))
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationConfig;
    use pretty_assertions::assert_eq;

    fn check(entity: Entity, field: &str, value: impl Into<CellValue>) -> Vec<Diagnostic> {
        check_field(entity, field, &value.into(), ValidationConfig::default().priority)
    }

    #[test]
    fn test_priority_edit() {
        assert!(check(Entity::Clients, PRIORITY_LEVEL, 3.0).is_empty());
        assert!(check(Entity::Clients, PRIORITY_LEVEL, "4").is_empty());
        let out = check(Entity::Clients, PRIORITY_LEVEL, 6.0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].key(), "clients:temp:PriorityLevel");
        assert_eq!(check(Entity::Clients, PRIORITY_LEVEL, "high").len(), 1);
        assert!(check(Entity::Clients, PRIORITY_LEVEL, CellValue::Null).is_empty());
    }

    #[test]
    fn test_attributes_edit() {
        assert!(check(Entity::Clients, ATTRIBUTES_JSON, r#"{"vip":true}"#).is_empty());
        assert_eq!(check(Entity::Clients, ATTRIBUTES_JSON, "{vip}").len(), 1);
        assert!(check(Entity::Clients, ATTRIBUTES_JSON, "").is_empty());
    }

    #[test]
    fn test_worker_edits() {
        assert_eq!(check(Entity::Workers, MAX_LOAD_PER_PHASE, 0.0).len(), 1);
        assert!(check(Entity::Workers, MAX_LOAD_PER_PHASE, 2.0).is_empty());
        assert!(check(Entity::Workers, AVAILABLE_SLOTS, "1-3").is_empty());
        assert_eq!(check(Entity::Workers, AVAILABLE_SLOTS, "1, 2.5").len(), 1);
        let list = CellValue::List(vec![CellValue::Number(1.0), CellValue::Number(-2.0)]);
        assert_eq!(check(Entity::Workers, AVAILABLE_SLOTS, list).len(), 1);
    }

    #[test]
    fn test_task_edits() {
        assert_eq!(check(Entity::Tasks, DURATION, 1.5).len(), 1);
        assert_eq!(check(Entity::Tasks, MAX_CONCURRENT, "abc").len(), 1);
        assert!(check(Entity::Tasks, DURATION, 2.0).is_empty());
    }

    #[test]
    fn test_non_text_cells_read_as_numbers() {
        let list = CellValue::List(vec![CellValue::Number(2.0)]);
        assert_eq!(check(Entity::Tasks, DURATION, list).len(), 1);
        assert!(check(Entity::Tasks, MAX_CONCURRENT, CellValue::Bool(true)).is_empty());
        assert_eq!(check(Entity::Tasks, MAX_CONCURRENT, CellValue::Bool(false)).len(), 1);
        assert!(check(Entity::Clients, PRIORITY_LEVEL, "   ").is_empty());
        assert!(check(Entity::Workers, MAX_LOAD_PER_PHASE, CellValue::Null).is_empty());
    }

    #[test]
    fn test_unchecked_fields_are_ignored() {
        assert!(check(Entity::Tasks, TASK_NAME, "").is_empty());
        assert!(check(Entity::Rules, DURATION, 0.0).is_empty());
        assert!(check(Entity::Global, "Phase", "x").is_empty());
    }
}
