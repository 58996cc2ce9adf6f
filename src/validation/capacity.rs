//! Checks 8-12: rules against data, and supply against demand.
//!
//! Everything here except skill coverage is advisory. A zero or non-finite
//! load, duration, or concurrency value is treated as absent; those values
//! were already reported by the structural checks.

use std::collections::HashSet;

use super::row_id;
use crate::models::columns::{MAX_CONCURRENT, MAX_LOAD_PER_PHASE, REQUIRED_SKILLS};
use crate::models::{Datasets, Diagnostic, Entity, Rule};

fn usable(v: f64) -> bool {
    v.is_finite() && v != 0.0
}

/// Check 8: phase windows that share no phase with the task's preferences.
pub(super) fn check_phase_windows(d: &Datasets, rules: &[Rule], out: &mut Vec<Diagnostic>) {
    for rule in rules {
        let Rule::PhaseWindow {
            task_id,
            allowed_phases,
        } = rule
        else {
            continue;
        };
        let Some(task) = d.task(task_id) else {
            continue;
        };
        if !allowed_phases.iter().any(|&p| task.prefers_phase(p)) {
            out.push(
                Diagnostic::warning(
                    Entity::Rules,
                    task_id,
                    "Phase window rule has no overlap with task's PreferredPhases",
                )
                .on_field("phaseWindow"),
            );
        }
    }
}

/// Check 9: a per-phase load ceiling above the number of phases available.
pub(super) fn check_worker_overload(d: &Datasets, out: &mut Vec<Diagnostic>) {
    for (i, w) in d.workers.iter().enumerate() {
        let slots = w.available_slots.len();
        if usable(w.max_load_per_phase) && w.max_load_per_phase > slots as f64 {
            out.push(
                Diagnostic::warning(
                    Entity::Workers,
                    row_id(&w.id, i),
                    format!(
                        "MaxLoadPerPhase ({}) exceeds available slots ({slots})",
                        w.max_load_per_phase
                    ),
                )
                .on_field(MAX_LOAD_PER_PHASE),
            );
        }
    }
}

/// Per-phase demand and capacity, for every phase some worker offers.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseLoad {
    pub phase: f64,
    /// Sum of durations of tasks preferring this phase.
    pub demand: f64,
    /// Sum of load ceilings of workers available in this phase.
    pub capacity: f64,
}

impl PhaseLoad {
    pub fn is_saturated(&self) -> bool {
        self.demand > self.capacity
    }
}

/// Demand and capacity per worker phase, in order of first appearance.
///
/// Phases only tasks mention are left out: with no worker there, no
/// capacity figure is meaningful.
pub fn phase_loads(d: &Datasets) -> Vec<PhaseLoad> {
    let mut seen = HashSet::new();
    let mut loads: Vec<PhaseLoad> = d
        .workers
        .iter()
        .flat_map(|w| w.available_slots.iter().copied())
        .filter(|p| seen.insert(p.to_bits()))
        .map(|phase| PhaseLoad {
            phase,
            demand: 0.0,
            capacity: 0.0,
        })
        .collect();

    for load in &mut loads {
        load.capacity = d
            .workers
            .iter()
            .filter(|w| usable(w.max_load_per_phase) && w.is_available_in(load.phase))
            .map(|w| w.max_load_per_phase)
            .sum();
        load.demand = d
            .tasks
            .iter()
            .filter(|t| usable(t.duration) && t.prefers_phase(load.phase))
            .map(|t| t.duration)
            .sum();
    }
    loads
}

/// Check 10: phases where preferred demand exceeds worker capacity.
pub(super) fn check_phase_saturation(d: &Datasets, out: &mut Vec<Diagnostic>) {
    for load in phase_loads(d).into_iter().filter(PhaseLoad::is_saturated) {
        out.push(
            Diagnostic::warning(
                Entity::Global,
                format!("phase-{}", load.phase),
                format!(
                    "Phase {}: total task demand ({}) exceeds worker capacity ({})",
                    load.phase, load.demand, load.capacity
                ),
            )
            .on_field("Phase"),
        );
    }
}

/// Check 11: required skills no worker offers. One error per task and skill.
pub(super) fn check_skill_coverage(d: &Datasets, out: &mut Vec<Diagnostic>) {
    let offered: HashSet<&str> = d
        .workers
        .iter()
        .flat_map(|w| w.skills.iter().map(String::as_str))
        .collect();

    for (i, t) in d.tasks.iter().enumerate() {
        for skill in &t.required_skills {
            if skill.trim().is_empty() || offered.contains(skill.as_str()) {
                continue;
            }
            out.push(
                Diagnostic::error(
                    Entity::Tasks,
                    row_id(&t.id, i),
                    format!("No workers have required skill: {skill}"),
                )
                .on_field(REQUIRED_SKILLS),
            );
        }
    }
}

/// Check 12: fewer fully-qualified workers than the task's concurrency.
pub(super) fn check_concurrency(d: &Datasets, out: &mut Vec<Diagnostic>) {
    for (i, t) in d.tasks.iter().enumerate() {
        if !usable(t.max_concurrent) {
            continue;
        }
        let qualified = d
            .workers
            .iter()
            .filter(|w| w.covers(&t.required_skills))
            .count();
        if (qualified as f64) < t.max_concurrent {
            out.push(
                Diagnostic::warning(
                    Entity::Tasks,
                    row_id(&t.id, i),
                    format!(
                        "MaxConcurrent ({}) exceeds qualified workers ({qualified})",
                        t.max_concurrent
                    ),
                )
                .on_field(MAX_CONCURRENT),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Severity, TaskRecord, WorkerRecord};
    use pretty_assertions::assert_eq;

    fn run(d: &Datasets, f: impl Fn(&Datasets, &mut Vec<Diagnostic>)) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        f(d, &mut out);
        out
    }

    #[test]
    fn test_phase_window_without_overlap() {
        let d = Datasets::new()
            .with_task(TaskRecord::new("T1").with_preferred_phases([1.0, 2.0]))
            .with_task(TaskRecord::new("T2").with_preferred_phases([3.0]));
        let rules = vec![
            Rule::phase_window("T1", vec![4.0, 5.0]),
            Rule::phase_window("T2", vec![3.0]),
            Rule::phase_window("T9", vec![1.0]),
        ];
        let mut out = Vec::new();
        check_phase_windows(&d, &rules, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].key(), "rules:T1:phaseWindow");
        assert_eq!(out[0].severity, Severity::Warning);
    }

    #[test]
    fn test_worker_overload() {
        let d = Datasets::new()
            .with_worker(WorkerRecord::new("W1").with_slots([1.0, 2.0]).with_max_load(3.0))
            .with_worker(WorkerRecord::new("W2").with_slots([1.0, 2.0]).with_max_load(2.0))
            .with_worker(WorkerRecord::new("W3").with_max_load(f64::NAN));
        let out = run(&d, check_worker_overload);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "W1");
        assert_eq!(out[0].message, "MaxLoadPerPhase (3) exceeds available slots (2)");
    }

    #[test]
    fn test_phase_loads_and_saturation() {
        let d = Datasets::new()
            .with_worker(WorkerRecord::new("W1").with_slots([2.0, 1.0]).with_max_load(1.0))
            .with_worker(WorkerRecord::new("W2").with_slots([1.0]).with_max_load(2.0))
            .with_task(
                TaskRecord::new("T1")
                    .with_duration(2.0)
                    .with_preferred_phases([1.0, 2.0, 7.0]),
            )
            .with_task(TaskRecord::new("T2").with_duration(2.0).with_preferred_phases([1.0]));

        let loads = phase_loads(&d);
        assert_eq!(
            loads,
            vec![
                PhaseLoad { phase: 2.0, demand: 2.0, capacity: 1.0 },
                PhaseLoad { phase: 1.0, demand: 4.0, capacity: 3.0 },
            ]
        );

        let out = run(&d, check_phase_saturation);
        let ids: Vec<_> = out.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["phase-2", "phase-1"]);
        assert_eq!(
            out[1].message,
            "Phase 1: total task demand (4) exceeds worker capacity (3)"
        );
        assert_eq!(out[1].entity, Entity::Global);
        assert_eq!(out[1].field.as_deref(), Some("Phase"));
    }

    #[test]
    fn test_skill_coverage_one_error_per_missing_skill() {
        let d = Datasets::new()
            .with_worker(WorkerRecord::new("W1").with_skill("coding"))
            .with_task(TaskRecord::new("T1").with_skill("coding").with_skill("welding"));
        let out = run(&d, check_skill_coverage);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].key(), "tasks:T1:RequiredSkills");
        assert_eq!(out[0].message, "No workers have required skill: welding");
        assert!(out[0].is_error());
    }

    #[test]
    fn test_concurrency_needs_fully_qualified_workers() {
        let d = Datasets::new()
            .with_worker(WorkerRecord::new("W1").with_skill("a").with_skill("b"))
            .with_worker(WorkerRecord::new("W2").with_skill("a"))
            .with_task(
                TaskRecord::new("T1")
                    .with_skill("a")
                    .with_skill("b")
                    .with_max_concurrent(2.0),
            )
            .with_task(TaskRecord::new("T2").with_skill("a").with_max_concurrent(2.0));
        let out = run(&d, check_concurrency);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "T1");
        assert_eq!(out[0].message, "MaxConcurrent (2) exceeds qualified workers (1)");
    }
}
