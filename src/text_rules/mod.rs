//! Text-to-rule parsing.
//!
//! Splits free text into statements and offers each statement to a fixed,
//! ordered list of sentence templates. The first template that claims a
//! statement consumes it, so a statement yields at most one rule. Anything
//! the parser cannot use is reported as a human-readable note rather than
//! an error.
//!
//! # Usage
//!
//! ```
//! use u_alloc_check::models::{Datasets, Rule, TaskRecord};
//! use u_alloc_check::text_rules::parse_rules_text;
//!
//! let data = Datasets::new()
//!     .with_task(TaskRecord::new("T1"))
//!     .with_task(TaskRecord::new("T2"));
//! let out = parse_rules_text("T1 and T2 run together.", &data);
//! assert_eq!(out.rules, vec![Rule::co_run(["T1", "T2"])]);
//! assert!(out.notes.is_empty());
//! ```

mod context;
mod statements;
pub mod templates;

pub use context::ParseContext;
pub use statements::{mentions_id, split_statements};

use std::fmt::Debug;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::models::{Datasets, Rule};

/// What a template made of a statement it claimed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateMatch {
    /// The rule produced, or `None` when the statement was rejected.
    pub rule: Option<Rule>,
    /// Advisory and rejection notes, in the order they arose.
    pub notes: Vec<String>,
}

impl TemplateMatch {
    pub fn emit(rule: Rule) -> Self {
        Self {
            rule: Some(rule),
            notes: Vec::new(),
        }
    }

    pub fn reject(note: impl Into<String>) -> Self {
        Self {
            rule: None,
            notes: vec![note.into()],
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

/// A sentence template.
///
/// Returning `None` passes the statement to the next template; returning
/// `Some` consumes it, whether or not a rule was produced.
pub trait StatementTemplate: Send + Sync + Debug {
    /// Template name, matching the rule kind it produces.
    fn name(&self) -> &'static str;

    fn try_match(&self, statement: &str, ctx: &ParseContext) -> Option<TemplateMatch>;
}

/// Rules and notes produced from one block of text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    pub rules: Vec<Rule>,
    pub notes: Vec<String>,
}

/// Ordered template chain.
#[derive(Clone)]
pub struct RuleTextParser {
    templates: Vec<Arc<dyn StatementTemplate>>,
}

impl RuleTextParser {
    /// Parser with the built-in templates in their standard order: co-run,
    /// load limit, slot restriction, phase window, precedence, pattern.
    pub fn new() -> Self {
        Self::empty()
            .with_template(templates::CoRun)
            .with_template(templates::LoadLimit)
            .with_template(templates::SlotRestriction)
            .with_template(templates::PhaseWindow)
            .with_template(templates::Precedence)
            .with_template(templates::PatternMatch)
    }

    /// Parser with no templates; every statement is unrecognized.
    pub fn empty() -> Self {
        Self {
            templates: Vec::new(),
        }
    }

    /// Appends a template after the existing ones.
    pub fn with_template<T: StatementTemplate + 'static>(mut self, template: T) -> Self {
        self.templates.push(Arc::new(template));
        self
    }

    /// Template names in matching order.
    pub fn template_names(&self) -> Vec<&'static str> {
        self.templates.iter().map(|t| t.name()).collect()
    }

    /// Parses `text` against the known ids in `ctx`.
    pub fn parse(&self, text: &str, ctx: &ParseContext) -> ParseOutcome {
        let mut out = ParseOutcome::default();

        for statement in split_statements(text) {
            let claimed = self
                .templates
                .iter()
                .find_map(|t| t.try_match(statement, ctx).map(|m| (t.name(), m)));

            match claimed {
                Some((name, m)) => {
                    if m.rule.is_none() {
                        trace!(template = name, statement, "statement rejected");
                    }
                    out.rules.extend(m.rule);
                    out.notes.extend(m.notes);
                }
                None => {
                    trace!(statement, "statement unrecognized");
                    out.notes
                        .push(format!("Unrecognized statement: \"{statement}\""));
                }
            }
        }

        debug!(
            rules = out.rules.len(),
            notes = out.notes.len(),
            "parsed rule text"
        );
        out
    }
}

impl Default for RuleTextParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for RuleTextParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleTextParser")
            .field("templates", &self.template_names())
            .finish()
    }
}

/// Parses rule text with the standard templates against loaded records.
pub fn parse_rules_text(text: &str, datasets: &Datasets) -> ParseOutcome {
    RuleTextParser::new().parse(text, &ParseContext::from_datasets(datasets))
}
