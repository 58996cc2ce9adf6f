//! Allocation domain models.
//!
//! Record types for the three spreadsheets an operator imports, the rule
//! vocabulary, and the diagnostics produced by validation.
//!
//! | Sheet | Record | Key column |
//! |-------|--------|------------|
//! | clients | `ClientRecord` | `ClientID` |
//! | workers | `WorkerRecord` | `WorkerID` |
//! | tasks | `TaskRecord` | `TaskID` |

mod client;
pub mod columns;
mod dataset;
mod diagnostic;
mod package;
mod rule;
mod task;
mod weights;
mod worker;

pub use client::ClientRecord;
pub use dataset::Datasets;
pub use diagnostic::{diagnostic_key, Diagnostic, Entity, Severity};
pub use package::RulePackage;
pub use rule::{GroupKind, GroupTarget, PrecedenceScope, Rule};
pub use task::TaskRecord;
pub use weights::{WeightPreset, Weights};
pub use worker::WorkerRecord;
