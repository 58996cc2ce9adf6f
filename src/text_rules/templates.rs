//! Built-in sentence templates.
//!
//! Listed in the order the parser tries them:
//!
//! - **CoRun**: "T1 and T2 run together"
//! - **LoadLimit**: "limit WorkerGroup GroupA to 3"
//! - **SlotRestriction**: "ClientGroup VIP needs at least 2 common slots"
//! - **PhaseWindow**: "T4 only in phases 1-3"
//! - **Precedence**: "global precedence 5"
//! - **PatternMatch**: "pattern /^T1/ -> template urgent params {...}"

use std::sync::LazyLock;

use regex::Regex;

use super::{ParseContext, StatementTemplate, TemplateMatch};
use crate::models::{GroupKind, GroupTarget, Rule};
use crate::normalize::parse_number_list_str;

static CO_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(co[-\s]?run|together|concurrently)\b").unwrap());

static LOAD_LIMIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:limit|max)\s+WorkerGroup\s+([A-Za-z0-9_-]+)\s*(?:to|=)?\s*(\d+)").unwrap()
});

static SLOT_GROUP_FIRST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(ClientGroup|WorkerGroup)\s+([A-Za-z0-9_-]+).*?(?:min(?:imum)?|at\s+least)\s*(\d+)\s*common\s+slots?").unwrap()
});

static SLOT_COUNT_FIRST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:require|needs?)\s*(?:at\s+least\s*)?(\d+)\s*common\s+slots?.*\b(ClientGroup|WorkerGroup)\s+([A-Za-z0-9_-]+)").unwrap()
});

static PHASES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:only\s+in\s+phases|allowed\s+phases|phases)\s+([^.;]+)").unwrap()
});

static PRECEDENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bglobal\s+precedence\s+(\d+)").unwrap());

static PATTERN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)pattern\s+/(.+?)/\s*->\s*template\s+([A-Za-z0-9_-]+)(?:\s*params\s*(\{[\s\S]*\}))?").unwrap()
});

/// Co-run: a co-run keyword plus at least two known task ids.
#[derive(Debug, Clone, Copy)]
pub struct CoRun;

impl StatementTemplate for CoRun {
    fn name(&self) -> &'static str {
        "coRun"
    }

    fn try_match(&self, statement: &str, ctx: &ParseContext) -> Option<TemplateMatch> {
        if !CO_RUN_RE.is_match(statement) {
            return None;
        }
        let tasks = ctx.mentioned_tasks(statement);
        Some(if tasks.len() >= 2 {
            TemplateMatch::emit(Rule::co_run(tasks))
        } else {
            TemplateMatch::reject(format!(
                "Co-run statement skipped (need >=2 known TaskIDs): \"{statement}\""
            ))
        })
    }
}

fn unknown_group_note(kind: GroupKind, value: &str) -> String {
    format!("Unknown {kind} \"{value}\" referenced.")
}

/// Load limit on a worker group.
#[derive(Debug, Clone, Copy)]
pub struct LoadLimit;

impl StatementTemplate for LoadLimit {
    fn name(&self) -> &'static str {
        "loadLimit"
    }

    fn try_match(&self, statement: &str, ctx: &ParseContext) -> Option<TemplateMatch> {
        let caps = LOAD_LIMIT_RE.captures(statement)?;
        let group = &caps[1];

        let mut m = match caps[2].parse::<u32>() {
            Ok(n) if n > 0 => TemplateMatch::emit(Rule::load_limit(group, n)),
            _ => TemplateMatch::reject(format!("Invalid number in load-limit: \"{statement}\"")),
        };
        if !ctx.knows_group(GroupKind::WorkerGroup, group) {
            m.notes
                .insert(0, unknown_group_note(GroupKind::WorkerGroup, group));
        }
        Some(m)
    }
}

/// Minimum common slots for a client or worker group, in either word order.
#[derive(Debug, Clone, Copy)]
pub struct SlotRestriction;

impl StatementTemplate for SlotRestriction {
    fn name(&self) -> &'static str {
        "slotRestriction"
    }

    fn try_match(&self, statement: &str, ctx: &ParseContext) -> Option<TemplateMatch> {
        let (kind, group, count) = if let Some(c) = SLOT_GROUP_FIRST_RE.captures(statement) {
            let (k, g, n) = (c.get(1)?, c.get(2)?, c.get(3)?);
            (k.as_str(), g.as_str(), n.as_str())
        } else {
            let c = SLOT_COUNT_FIRST_RE.captures(statement)?;
            let (n, k, g) = (c.get(1)?, c.get(2)?, c.get(3)?);
            (k.as_str(), g.as_str(), n.as_str())
        };
        let kind = GroupKind::parse(kind)?;

        let mut m = match count.parse::<u32>() {
            Ok(n) => TemplateMatch::emit(Rule::slot_restriction(
                GroupTarget {
                    kind,
                    value: group.to_string(),
                },
                n,
            )),
            Err(_) => {
                TemplateMatch::reject(format!("Invalid number in slot-restriction: \"{statement}\""))
            }
        };
        if !ctx.knows_group(kind, group) {
            m.notes.insert(0, unknown_group_note(kind, group));
        }
        Some(m)
    }
}

/// Allowed phases for the first known task mentioned.
///
/// A statement naming a task but no phase expression is left for the
/// templates after this one.
#[derive(Debug, Clone, Copy)]
pub struct PhaseWindow;

impl StatementTemplate for PhaseWindow {
    fn name(&self) -> &'static str {
        "phaseWindow"
    }

    fn try_match(&self, statement: &str, ctx: &ParseContext) -> Option<TemplateMatch> {
        let task = ctx.first_mentioned_task(statement)?;
        let caps = PHASES_RE.captures(statement)?;

        let mut phases = parse_number_list_str(&caps[1]);
        phases.sort_by(f64::total_cmp);
        phases.dedup();

        Some(if phases.is_empty() {
            TemplateMatch::reject(format!("No phases parsed for: \"{statement}\""))
        } else {
            TemplateMatch::emit(Rule::phase_window(task, phases))
        })
    }
}

/// Global precedence level.
#[derive(Debug, Clone, Copy)]
pub struct Precedence;

impl StatementTemplate for Precedence {
    fn name(&self) -> &'static str {
        "precedence"
    }

    fn try_match(&self, statement: &str, _ctx: &ParseContext) -> Option<TemplateMatch> {
        let caps = PRECEDENCE_RE.captures(statement)?;
        Some(match caps[1].parse::<i64>() {
            Ok(n) => TemplateMatch::emit(Rule::global_precedence(n)),
            Err(_) => TemplateMatch::reject(format!("Invalid precedence number: \"{statement}\"")),
        })
    }
}

/// Regex-to-template binding with optional JSON parameters.
///
/// Bad parameters are noted and dropped; the rule is still produced.
#[derive(Debug, Clone, Copy)]
pub struct PatternMatch;

impl StatementTemplate for PatternMatch {
    fn name(&self) -> &'static str {
        "patternMatch"
    }

    fn try_match(&self, statement: &str, _ctx: &ParseContext) -> Option<TemplateMatch> {
        let caps = PATTERN_RE.captures(statement)?;
        let mut rule = Rule::pattern_match(format!("/{}/", &caps[1]), &caps[2]);
        let mut notes = Vec::new();

        if let Some(raw) = caps.get(3) {
            match serde_json::from_str(raw.as_str()) {
                Ok(serde_json::Value::Object(map)) => {
                    if let Rule::PatternMatch { params, .. } = &mut rule {
                        *params = Some(map);
                    }
                }
                _ => notes.push(format!("Invalid JSON params in pattern: \"{statement}\"")),
            }
        }
        Some(TemplateMatch {
            rule: Some(rule),
            notes,
        })
    }
}
