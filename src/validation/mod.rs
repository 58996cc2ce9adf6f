//! Validation of the loaded datasets and rule list.
//!
//! Runs twelve independent checks in a fixed order and returns every
//! finding. Nothing here fails fast or panics: malformed input is reported
//! as a [`Diagnostic`], and the checks after it still run.
//!
//! Checks, in output order:
//! 1. Required fields present
//! 2. Duplicate ids per collection
//! 3. List entry shapes
//! 4. Numeric ranges (integer-only)
//! 5. Embedded attribute JSON
//! 6. Dangling task/group references
//! 7. Co-run cycles (first cycle only)
//! 8. Phase windows disjoint from preferences (warning)
//! 9. Load ceilings above available phases (warning)
//! 10. Phase demand above capacity (warning)
//! 11. Required skills nobody offers
//! 12. Concurrency above qualified workers (warning)

mod capacity;
mod cycles;
mod field;
mod references;
mod structure;

pub use capacity::{phase_loads, PhaseLoad};
pub use cycles::find_co_run_cycle;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DecodeError;
use crate::models::{Datasets, Diagnostic, Entity, Rule, Severity};
use crate::normalize::CellValue;

/// Inclusive integer domain for a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Whether `v` is an integer inside the range.
    pub fn contains(&self, v: f64) -> bool {
        is_integer(v) && v >= self.min as f64 && v <= self.max as f64
    }
}

/// Tunable parts of a validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationConfig {
    /// Allowed client priority levels.
    pub priority: IntRange,
    /// Allowed worker qualification levels.
    pub qualification: IntRange,
    /// Run the advisory (warning) checks 8, 9, 10 and 12.
    pub advisories: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            priority: IntRange::new(1, 5),
            qualification: IntRange::new(1, 10),
            advisories: true,
        }
    }
}

impl ValidationConfig {
    /// Decodes a config; omitted keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(text).map_err(|e| DecodeError::json("validation config", e))
    }
}

/// Validation engine.
///
/// # Example
/// ```
/// use u_alloc_check::models::{ClientRecord, Datasets};
/// use u_alloc_check::validation::Validator;
///
/// let data = Datasets::new()
///     .with_client(ClientRecord::new("C1").with_name("Acme").with_priority(6.0));
/// let found = Validator::new().validate(&data, &[]);
/// assert_eq!(found[0].message, "PriorityLevel must be integer between 1-5");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Runs every check and returns all findings in check order.
    pub fn validate(&self, datasets: &Datasets, rules: &[Rule]) -> Vec<Diagnostic> {
        let cfg = &self.config;
        let mut out = Vec::new();

        structure::check_required(datasets, &mut out);
        structure::check_duplicates(datasets, &mut out);
        structure::check_list_shapes(datasets, &mut out);
        structure::check_ranges(datasets, cfg, &mut out);
        structure::check_attributes_json(datasets, &mut out);
        references::check_references(datasets, rules, &mut out);
        cycles::check_co_run_cycles(rules, &mut out);
        if cfg.advisories {
            capacity::check_phase_windows(datasets, rules, &mut out);
            capacity::check_worker_overload(datasets, &mut out);
            capacity::check_phase_saturation(datasets, &mut out);
        }
        capacity::check_skill_coverage(datasets, &mut out);
        if cfg.advisories {
            capacity::check_concurrency(datasets, &mut out);
        }

        debug!(
            clients = datasets.clients.len(),
            workers = datasets.workers.len(),
            tasks = datasets.tasks.len(),
            rules = rules.len(),
            errors = count(&out, Severity::Error),
            warnings = count(&out, Severity::Warning),
            "validation pass complete"
        );
        out
    }

    /// Checks a single edited cell before it is committed.
    pub fn validate_field(
        &self,
        entity: Entity,
        field: &str,
        value: &CellValue,
    ) -> Vec<Diagnostic> {
        field::check_field(entity, field, value, self.config.priority)
    }
}

/// Validates with the default configuration.
pub fn validate(datasets: &Datasets, rules: &[Rule]) -> Vec<Diagnostic> {
    Validator::new().validate(datasets, rules)
}

/// Checks one edited cell with the default configuration.
pub fn validate_field(entity: Entity, field: &str, value: &CellValue) -> Vec<Diagnostic> {
    Validator::new().validate_field(entity, field, value)
}

/// Whether any finding should block export.
pub fn has_blocking_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

fn count(diagnostics: &[Diagnostic], severity: Severity) -> usize {
    diagnostics.iter().filter(|d| d.severity == severity).count()
}

/// Id a record is reported under: its own id, or `row-<n>` (1-based) when
/// the id is empty.
pub(crate) fn row_id(id: &str, index: usize) -> String {
    if id.is_empty() {
        format!("row-{}", index + 1)
    } else {
        id.to_string()
    }
}

pub(crate) fn is_integer(v: f64) -> bool {
    v.is_finite() && v.fract() == 0.0
}

pub(crate) fn is_positive_integer(v: f64) -> bool {
    is_integer(v) && v >= 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClientRecord, TaskRecord, WorkerRecord};
    use pretty_assertions::assert_eq;

    /// A clean dataset: no check fires.
    fn clean() -> Datasets {
        Datasets::new()
            .with_client(
                ClientRecord::new("C1")
                    .with_name("Acme")
                    .with_priority(3.0)
                    .with_request("T1")
                    .with_group("VIP"),
            )
            .with_worker(
                WorkerRecord::new("W1")
                    .with_name("Ada")
                    .with_skill("coding")
                    .with_slots([1.0, 2.0])
                    .with_max_load(2.0)
                    .with_group("GroupA"),
            )
            .with_task(
                TaskRecord::new("T1")
                    .with_name("Build")
                    .with_skill("coding")
                    .with_preferred_phases([1.0]),
            )
            .with_task(
                TaskRecord::new("T2")
                    .with_name("Test")
                    .with_skill("coding")
                    .with_preferred_phases([2.0]),
            )
    }

    #[test]
    fn test_clean_data_has_no_findings() {
        let rules = vec![Rule::co_run(["T1", "T2"]), Rule::load_limit("GroupA", 2)];
        assert_eq!(validate(&clean(), &rules), Vec::<Diagnostic>::new());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let mut d = clean();
        d.clients.push(ClientRecord::new("C1").with_priority(9.0));
        d.tasks.push(TaskRecord::new("T3").with_skill("welding").with_duration(-2.0));
        let rules = vec![
            Rule::co_run(["T1", "T2"]),
            Rule::co_run(["T2", "T3"]),
            Rule::co_run(["T3", "T1"]),
        ];
        let first = validate(&d, &rules);
        assert!(!first.is_empty());
        assert_eq!(validate(&d, &rules), first);
    }

    #[test]
    fn test_totality_on_hostile_values() {
        let d = Datasets::new()
            .with_client(ClientRecord::new("").with_priority(f64::NAN))
            .with_worker(
                WorkerRecord::new("")
                    .with_slots([-1.0, f64::INFINITY, 0.5])
                    .with_max_load(-3.0)
                    .with_qualification(f64::NEG_INFINITY),
            )
            .with_task(
                TaskRecord::new("")
                    .with_duration(f64::NAN)
                    .with_max_concurrent(1e300)
                    .with_preferred_phases([f64::NAN, -4.0]),
            );
        let rules = vec![
            Rule::co_run(Vec::<String>::new()),
            Rule::phase_window("", Vec::new()),
            Rule::load_limit("", 0),
        ];
        let out = validate(&d, &rules);
        assert!(has_blocking_errors(&out));
        assert!(out.iter().all(|e| !e.id.is_empty() || e.entity == Entity::Rules));
    }

    #[test]
    fn test_duplicate_client_reported_once() {
        let mut d = clean();
        d.clients.push(d.clients[0].clone());
        let dups: Vec<_> = validate(&d, &[])
            .into_iter()
            .filter(|e| e.message.starts_with("Duplicate"))
            .collect();
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].entity, Entity::Clients);
        assert_eq!(dups[0].id, "C1");
        assert_eq!(dups[0].severity, Severity::Error);
        assert!(dups[0].message.contains('2'));
    }

    #[test]
    fn test_priority_range() {
        let mut d = clean();
        d.clients[0].priority_level = 6.0;
        let out = validate(&d, &[]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].field.as_deref(), Some("PriorityLevel"));

        d.clients[0].priority_level = 3.0;
        assert!(validate(&d, &[]).is_empty());
    }

    #[test]
    fn test_welding_has_no_worker() {
        let mut d = clean();
        d.tasks[1].required_skills.push("welding".into());
        let out: Vec<_> = validate(&d, &[])
            .into_iter()
            .filter(Diagnostic::is_error)
            .collect();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].field.as_deref(), Some("RequiredSkills"));
        assert_eq!(out[0].id, "T2");
    }

    #[test]
    fn test_cycle_through_three_rules() {
        let mut d = clean();
        d.tasks.push(
            TaskRecord::new("T3")
                .with_name("Ship")
                .with_skill("coding")
                .with_preferred_phases([1.0]),
        );
        let ring = vec![
            Rule::co_run(["T1", "T2"]),
            Rule::co_run(["T2", "T3"]),
            Rule::co_run(["T3", "T1"]),
        ];
        let out = validate(&d, &ring);
        let cycles: Vec<_> = out.iter().filter(|e| e.entity == Entity::Rules).collect();
        assert_eq!(cycles.len(), 1);
        assert!(cycles[0].is_error());
        for t in ["T1", "T2", "T3"] {
            assert!(cycles[0].message.contains(t));
        }

        for skip in 0..ring.len() {
            let mut rules = ring.clone();
            rules.remove(skip);
            assert!(validate(&d, &rules).iter().all(|e| e.entity != Entity::Rules));
        }
    }

    #[test]
    fn test_check_order() {
        let d = Datasets::new()
            .with_worker(
                WorkerRecord::new("W1")
                    .with_name("Ada")
                    .with_skill("coding")
                    .with_slots([1.0])
                    .with_max_load(3.0),
            )
            .with_task(
                TaskRecord::new("T1")
                    .with_name("Build")
                    .with_skill("welding")
                    .with_duration(5.0)
                    .with_preferred_phases([1.0]),
            );
        let fields: Vec<_> = validate(&d, &[])
            .into_iter()
            .map(|e| e.field.unwrap_or_default())
            .collect();
        assert_eq!(
            fields,
            vec!["MaxLoadPerPhase", "Phase", "RequiredSkills", "MaxConcurrent"]
        );
    }

    #[test]
    fn test_advisories_can_be_disabled() {
        let cfg = ValidationConfig {
            advisories: false,
            ..ValidationConfig::default()
        };
        let mut d = clean();
        d.workers[0].max_load_per_phase = 9.0;
        assert_eq!(validate(&d, &[]).len(), 1);
        assert!(Validator::new().with_config(cfg).validate(&d, &[]).is_empty());
    }

    #[test]
    fn test_config_from_json() {
        let cfg = ValidationConfig::from_json(r#"{"priority":{"min":1,"max":3}}"#).unwrap();
        assert_eq!(cfg.priority, IntRange::new(1, 3));
        assert_eq!(cfg.qualification, IntRange::new(1, 10));
        assert!(cfg.advisories);

        let mut d = clean();
        d.clients[0].priority_level = 4.0;
        let out = Validator::new().with_config(cfg).validate(&d, &[]);
        assert_eq!(out[0].message, "PriorityLevel must be integer between 1-3");

        assert!(ValidationConfig::from_json("{oops").is_err());
    }

    #[test]
    fn test_validate_field_uses_temp_id() {
        let out = validate_field(Entity::Tasks, "Duration", &CellValue::Number(0.0));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "temp");
    }

    #[test]
    fn test_row_id_fallback() {
        assert_eq!(row_id("", 0), "row-1");
        assert_eq!(row_id("W7", 3), "W7");
    }
}
