//! Per-record structural checks: required fields, duplicate ids, list
//! shapes, numeric ranges, and embedded JSON.

use std::collections::HashMap;

use super::{is_integer, is_positive_integer, row_id, ValidationConfig};
use crate::models::columns::*;
use crate::models::{Datasets, Diagnostic, Entity};

fn missing(entity: Entity, id: &str, field: &str) -> Diagnostic {
    Diagnostic::error(entity, id, format!("Missing required {field}")).on_field(field)
}

/// Check 1: id, name, and numeric/list columns that must be present.
pub(super) fn check_required(d: &Datasets, out: &mut Vec<Diagnostic>) {
    for (i, c) in d.clients.iter().enumerate() {
        let id = row_id(&c.id, i);
        if c.id.is_empty() {
            out.push(missing(Entity::Clients, &id, CLIENT_ID));
        }
        if c.name.is_empty() {
            out.push(missing(Entity::Clients, &id, CLIENT_NAME));
        }
        if !c.priority_level.is_finite() {
            out.push(missing(Entity::Clients, &id, PRIORITY_LEVEL));
        }
    }

    for (i, w) in d.workers.iter().enumerate() {
        let id = row_id(&w.id, i);
        if w.id.is_empty() {
            out.push(missing(Entity::Workers, &id, WORKER_ID));
        }
        if w.name.is_empty() {
            out.push(missing(Entity::Workers, &id, WORKER_NAME));
        }
        if w.skills.is_empty() {
            out.push(missing(Entity::Workers, &id, SKILLS));
        }
        if w.available_slots.is_empty() {
            out.push(missing(Entity::Workers, &id, AVAILABLE_SLOTS));
        }
        if !w.max_load_per_phase.is_finite() {
            out.push(missing(Entity::Workers, &id, MAX_LOAD_PER_PHASE));
        }
    }

    for (i, t) in d.tasks.iter().enumerate() {
        let id = row_id(&t.id, i);
        if t.id.is_empty() {
            out.push(missing(Entity::Tasks, &id, TASK_ID));
        }
        if t.name.is_empty() {
            out.push(missing(Entity::Tasks, &id, TASK_NAME));
        }
        if !t.duration.is_finite() {
            out.push(missing(Entity::Tasks, &id, DURATION));
        }
        if t.required_skills.is_empty() {
            out.push(missing(Entity::Tasks, &id, REQUIRED_SKILLS));
        }
        if !t.max_concurrent.is_finite() {
            out.push(missing(Entity::Tasks, &id, MAX_CONCURRENT));
        }
    }
}

/// Check 2: one error per id that occurs more than once, in order of
/// first appearance. Empty ids are left to the required-field check.
pub(super) fn check_duplicates(d: &Datasets, out: &mut Vec<Diagnostic>) {
    duplicates(d.clients.iter().map(|c| c.id.as_str()), Entity::Clients, out);
    duplicates(d.workers.iter().map(|w| w.id.as_str()), Entity::Workers, out);
    duplicates(d.tasks.iter().map(|t| t.id.as_str()), Entity::Tasks, out);
}

fn duplicates<'a>(ids: impl Iterator<Item = &'a str>, entity: Entity, out: &mut Vec<Diagnostic>) {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for id in ids.filter(|id| !id.is_empty()) {
        let count = counts.entry(id).or_insert(0);
        if *count == 0 {
            order.push(id);
        }
        *count += 1;
    }
    for id in order {
        let count = counts[id];
        if count > 1 {
            out.push(Diagnostic::error(
                entity,
                id,
                format!("Duplicate ID found {count} times"),
            ));
        }
    }
}

/// Check 3: list entries of the wrong shape.
pub(super) fn check_list_shapes(d: &Datasets, out: &mut Vec<Diagnostic>) {
    for (i, w) in d.workers.iter().enumerate() {
        if !w.available_slots.iter().all(|&p| is_positive_integer(p)) {
            out.push(
                Diagnostic::error(
                    Entity::Workers,
                    row_id(&w.id, i),
                    "AvailableSlots must be array of positive integers",
                )
                .on_field(AVAILABLE_SLOTS),
            );
        }
    }

    for (i, t) in d.tasks.iter().enumerate() {
        if t.required_skills.iter().any(|s| s.trim().is_empty()) {
            out.push(
                Diagnostic::error(
                    Entity::Tasks,
                    row_id(&t.id, i),
                    "RequiredSkills must be array of non-empty strings",
                )
                .on_field(REQUIRED_SKILLS),
            );
        }
        if !t.preferred_phases.iter().all(|&p| is_positive_integer(p)) {
            out.push(
                Diagnostic::error(
                    Entity::Tasks,
                    row_id(&t.id, i),
                    "PreferredPhases must be array of positive integers",
                )
                .on_field(PREFERRED_PHASES),
            );
        }
    }
}

/// Check 4: numeric columns outside their domain or not integral.
///
/// Non-finite values were already reported as missing and are skipped.
pub(super) fn check_ranges(d: &Datasets, cfg: &ValidationConfig, out: &mut Vec<Diagnostic>) {
    let priority = cfg.priority;
    for (i, c) in d.clients.iter().enumerate() {
        let v = c.priority_level;
        if v.is_finite() && !priority.contains(v) {
            out.push(
                Diagnostic::error(
                    Entity::Clients,
                    row_id(&c.id, i),
                    format!(
                        "PriorityLevel must be integer between {}-{}",
                        priority.min, priority.max
                    ),
                )
                .on_field(PRIORITY_LEVEL),
            );
        }
    }

    for (i, t) in d.tasks.iter().enumerate() {
        if t.duration.is_finite() && !(is_integer(t.duration) && t.duration >= 1.0) {
            out.push(
                Diagnostic::error(
                    Entity::Tasks,
                    row_id(&t.id, i),
                    "Duration must be integer >= 1",
                )
                .on_field(DURATION),
            );
        }
        if t.max_concurrent.is_finite() && !is_positive_integer(t.max_concurrent) {
            out.push(
                Diagnostic::error(
                    Entity::Tasks,
                    row_id(&t.id, i),
                    "MaxConcurrent must be integer >= 1",
                )
                .on_field(MAX_CONCURRENT),
            );
        }
    }

    let qualification = cfg.qualification;
    for (i, w) in d.workers.iter().enumerate() {
        if w.max_load_per_phase.is_finite() && !is_positive_integer(w.max_load_per_phase) {
            out.push(
                Diagnostic::error(
                    Entity::Workers,
                    row_id(&w.id, i),
                    "MaxLoadPerPhase must be integer >= 1",
                )
                .on_field(MAX_LOAD_PER_PHASE),
            );
        }
        if let Some(level) = w.qualification_level {
            if !qualification.contains(level) {
                out.push(
                    Diagnostic::error(
                        Entity::Workers,
                        row_id(&w.id, i),
                        format!(
                            "QualificationLevel must be integer between {}-{}",
                            qualification.min, qualification.max
                        ),
                    )
                    .on_field(QUALIFICATION_LEVEL),
                );
            }
        }
    }
}

/// Check 5: attribute text that is present but not valid JSON.
pub(super) fn check_attributes_json(d: &Datasets, out: &mut Vec<Diagnostic>) {
    for (i, c) in d.clients.iter().enumerate() {
        let Some(raw) = c.attributes_raw.as_deref() else {
            continue;
        };
        if raw.trim().is_empty() {
            continue;
        }
        if serde_json::from_str::<serde_json::Value>(raw).is_err() {
            out.push(
                Diagnostic::error(
                    Entity::Clients,
                    row_id(&c.id, i),
                    "AttributesJSON contains invalid JSON",
                )
                .on_field(ATTRIBUTES_JSON),
            );
        }
    }
}
