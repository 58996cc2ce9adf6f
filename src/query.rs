//! Plain-language record search.
//!
//! Recognizes a handful of filter phrases in a query and applies every one
//! that fits the searched collection. Phrases for another collection are
//! ignored, and a query with no recognized phrase matches everything.
//!
//! - tasks: `duration > n`, `duration < n`, `preferred phases include n`
//! - clients: `priority n` (also `priority level >= n`; keeps `>= n`)
//! - workers: `skill <name>` or `skills <name>`

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::models::Datasets;
use crate::normalize::RecordKind;
use crate::validation::row_id;

static DURATION_GT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"duration\s*>\s*(\d+)").unwrap());
static DURATION_LT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"duration\s*<\s*(\d+)").unwrap());
static PHASE_INCLUDES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"preferred\s*phases?.*?(?:include|has|having).*?(\d+)").unwrap()
});
static PRIORITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"priority\s*(?:level)?\s*(?:=|is|>=|>|<=|<)?\s*(\d+)").unwrap()
});
static SKILL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"skills?\s+(\w+)").unwrap());

fn capture_number(re: &Regex, q: &str) -> Option<f64> {
    re.captures(q)?.get(1)?.as_str().parse().ok()
}

/// Filters recognized in a query. Absent filters do not restrict.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordQuery {
    pub duration_above: Option<f64>,
    pub duration_below: Option<f64>,
    pub preferred_phase: Option<f64>,
    pub min_priority: Option<f64>,
    /// Lowercased skill name.
    pub skill: Option<String>,
}

impl RecordQuery {
    /// Extracts filters from free text. Matching is case-insensitive.
    pub fn parse(text: &str) -> Self {
        let q = text.to_lowercase();
        Self {
            duration_above: capture_number(&DURATION_GT_RE, &q),
            duration_below: capture_number(&DURATION_LT_RE, &q),
            preferred_phase: capture_number(&PHASE_INCLUDES_RE, &q),
            min_priority: capture_number(&PRIORITY_RE, &q),
            skill: SKILL_RE
                .captures(&q)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string()),
        }
    }

    /// Ids of the records in `target` that pass every applicable filter,
    /// in record order.
    pub fn matching_ids(&self, datasets: &Datasets, target: RecordKind) -> Vec<String> {
        match target {
            RecordKind::Tasks => datasets
                .tasks
                .iter()
                .enumerate()
                .filter(|(_, t)| self.duration_above.map_or(true, |n| t.duration > n))
                .filter(|(_, t)| self.duration_below.map_or(true, |n| t.duration < n))
                .filter(|(_, t)| self.preferred_phase.map_or(true, |p| t.prefers_phase(p)))
                .map(|(i, t)| row_id(&t.id, i))
                .collect(),
            RecordKind::Clients => datasets
                .clients
                .iter()
                .enumerate()
                .filter(|(_, c)| self.min_priority.map_or(true, |n| c.priority_level >= n))
                .map(|(i, c)| row_id(&c.id, i))
                .collect(),
            RecordKind::Workers => datasets
                .workers
                .iter()
                .enumerate()
                .filter(|(_, w)| {
                    self.skill.as_deref().map_or(true, |s| {
                        w.skills.iter().any(|have| have.to_lowercase() == s)
                    })
                })
                .map(|(i, w)| row_id(&w.id, i))
                .collect(),
        }
    }
}

/// Runs a plain-language query against one collection.
pub fn query_records(datasets: &Datasets, target: RecordKind, text: &str) -> Vec<String> {
    let query = RecordQuery::parse(text);
    let ids = query.matching_ids(datasets, target);
    debug!(?target, ?query, hits = ids.len(), "record query");
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClientRecord, TaskRecord, WorkerRecord};
    use pretty_assertions::assert_eq;

    fn data() -> Datasets {
        Datasets::new()
            .with_task(TaskRecord::new("T1").with_duration(1.0).with_preferred_phases([1.0, 2.0]))
            .with_task(TaskRecord::new("T2").with_duration(3.0).with_preferred_phases([2.0]))
            .with_task(TaskRecord::new("T3").with_duration(5.0).with_preferred_phases([4.0]))
            .with_client(ClientRecord::new("C1").with_priority(2.0))
            .with_client(ClientRecord::new("C2").with_priority(4.0))
            .with_worker(WorkerRecord::new("W1").with_skill("Coding"))
            .with_worker(WorkerRecord::new("W2").with_skill("welding"))
    }

    #[test]
    fn test_patterns_compile() {
        for re in [
            &DURATION_GT_RE,
            &DURATION_LT_RE,
            &PHASE_INCLUDES_RE,
            &PRIORITY_RE,
            &SKILL_RE,
        ] {
            assert!(!LazyLock::force(re).is_match(""));
        }
    }

    #[test]
    fn test_task_filters_combine() {
        let d = data();
        assert_eq!(
            query_records(&d, RecordKind::Tasks, "tasks duration > 1 and preferred phases include 2"),
            vec!["T2"]
        );
        assert_eq!(
            query_records(&d, RecordKind::Tasks, "Duration < 5"),
            vec!["T1", "T2"]
        );
    }

    #[test]
    fn test_priority_keeps_at_least() {
        assert_eq!(
            query_records(&data(), RecordKind::Clients, "priority level >= 3"),
            vec!["C2"]
        );
        assert_eq!(
            query_records(&data(), RecordKind::Clients, "Priority is 1"),
            vec!["C1", "C2"]
        );
    }

    #[test]
    fn test_skill_is_case_insensitive() {
        assert_eq!(
            query_records(&data(), RecordKind::Workers, "with skill coding"),
            vec!["W1"]
        );
    }

    #[test]
    fn test_plural_skills_phrase() {
        assert_eq!(
            query_records(&data(), RecordKind::Workers, "workers with skills welding"),
            vec!["W2"]
        );
        assert_eq!(
            RecordQuery::parse("Skills Welding").skill.as_deref(),
            Some("welding")
        );
    }

    #[test]
    fn test_foreign_or_unknown_filters_match_all() {
        let d = data();
        assert_eq!(
            query_records(&d, RecordKind::Workers, "duration > 100"),
            vec!["W1", "W2"]
        );
        assert_eq!(query_records(&d, RecordKind::Tasks, "anything").len(), 3);
    }

    #[test]
    fn test_parse_extracts_filters() {
        let q = RecordQuery::parse("Skill Welding, priority 2");
        assert_eq!(q.skill.as_deref(), Some("welding"));
        assert_eq!(q.min_priority, Some(2.0));
        assert_eq!(q.duration_above, None);
    }
}
