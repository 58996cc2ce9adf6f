//! Check 6: dangling references from clients and rules.

use std::collections::HashSet;

use super::row_id;
use crate::models::columns::REQUESTED_TASK_IDS;
use crate::models::{Datasets, Diagnostic, Entity, GroupKind, Rule};

pub(super) fn check_references(d: &Datasets, rules: &[Rule], out: &mut Vec<Diagnostic>) {
    let task_ids: HashSet<&str> = d.tasks.iter().map(|t| t.id.as_str()).collect();

    for (i, c) in d.clients.iter().enumerate() {
        for tid in &c.requested_task_ids {
            if !tid.is_empty() && !task_ids.contains(tid.as_str()) {
                out.push(
                    Diagnostic::error(
                        Entity::Clients,
                        row_id(&c.id, i),
                        format!("Unknown TaskID reference: {tid}"),
                    )
                    .on_field(REQUESTED_TASK_IDS),
                );
            }
        }
    }

    let worker_groups = d.worker_groups();
    let client_groups = d.client_groups();

    for (index, rule) in rules.iter().enumerate() {
        let rule_id = Rule::validation_id(index);
        match rule {
            Rule::PhaseWindow { task_id, .. } => {
                if !task_id.is_empty() && !task_ids.contains(task_id.as_str()) {
                    out.push(
                        Diagnostic::error(
                            Entity::Rules,
                            &rule_id,
                            format!("Phase window rule references unknown TaskID: {task_id}"),
                        )
                        .on_field("taskId"),
                    );
                }
            }
            Rule::CoRun { tasks } => {
                for tid in tasks {
                    if !task_ids.contains(tid.as_str()) {
                        out.push(
                            Diagnostic::error(
                                Entity::Rules,
                                &rule_id,
                                format!("Co-run rule references unknown TaskID: {tid}"),
                            )
                            .on_field("tasks"),
                        );
                    }
                }
            }
            Rule::LoadLimit { target, .. } | Rule::SlotRestriction { target, .. } => {
                let known = match target.kind {
                    GroupKind::WorkerGroup => &worker_groups,
                    GroupKind::ClientGroup => &client_groups,
                };
                if !known.contains(target.value.as_str()) {
                    let label = if matches!(rule, Rule::LoadLimit { .. }) {
                        "Load-limit"
                    } else {
                        "Slot-restriction"
                    };
                    out.push(
                        Diagnostic::error(
                            Entity::Rules,
                            &rule_id,
                            format!(
                                "{label} rule references unknown {}: {}",
                                target.kind, target.value
                            ),
                        )
                        .on_field("target"),
                    );
                }
            }
            Rule::PatternMatch { .. } | Rule::Precedence { .. } => {}
        }
    }
}
