//! Allocation data checking for client/worker/task datasets.
//!
//! Takes spreadsheet-shaped records and a list of allocation rules, and
//! reports everything that would make an allocation impossible or suspect.
//! Rules can also be written as short sentences and parsed into typed
//! values. The crate performs no allocation itself and holds no state:
//! every entry point is a pure function of its arguments.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ClientRecord`, `WorkerRecord`, `TaskRecord`,
//!   `Datasets`, `Rule`, `Diagnostic`, `Weights`, `RulePackage`
//! - **`normalize`**: Loose cell values to typed records (header synonyms,
//!   list/range/JSON coercion)
//! - **`validation`**: Twelve ordered consistency checks, including co-run
//!   cycle detection and capacity advisories
//! - **`index`**: Diagnostic lookup by `entity:id:field`
//! - **`text_rules`**: Sentence-template rule parser
//! - **`query`**: Plain-language record search
//!
//! # Example
//!
//! ```
//! use u_alloc_check::models::{Datasets, TaskRecord, WorkerRecord};
//! use u_alloc_check::{parse_rules_text, validate, DiagnosticIndex};
//!
//! let data = Datasets::new()
//!     .with_worker(
//!         WorkerRecord::new("W1")
//!             .with_name("Ada")
//!             .with_skill("coding")
//!             .with_slots([1.0, 2.0]),
//!     )
//!     .with_task(TaskRecord::new("T1").with_name("Build").with_skill("welding"))
//!     .with_task(TaskRecord::new("T2").with_name("Test").with_skill("coding"));
//!
//! let parsed = parse_rules_text("T1 and T2 run together.", &data);
//! let found = validate(&data, &parsed.rules);
//! let index = DiagnosticIndex::build(&found);
//! assert_eq!(index.get("tasks:T1:RequiredSkills").len(), 1);
//! ```

pub mod error;
pub mod index;
pub mod models;
pub mod normalize;
pub mod query;
pub mod text_rules;
pub mod validation;

pub use error::DecodeError;
pub use index::DiagnosticIndex;
pub use query::query_records;
pub use text_rules::{parse_rules_text, ParseOutcome};
pub use validation::{has_blocking_errors, validate, validate_field, ValidationConfig, Validator};
