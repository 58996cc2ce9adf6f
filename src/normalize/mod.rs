//! Row normalization.
//!
//! Turns decoded spreadsheet rows (free-form headers, string/number cells)
//! into typed records. Normalization never fails: an unreadable cell
//! becomes an empty or zero value, and validation reports it.

mod cell;
mod coerce;
mod headers;

pub use cell::{CellValue, RawRow};
pub use coerce::{
    coerce_number, coerce_optional_number, coerce_optional_string, coerce_string, parse_json,
    parse_list, parse_list_str, parse_number, parse_number_list, parse_number_list_str,
    MAX_RANGE_SPAN,
};
pub use headers::{
    canonical_header, map_headers, normalize_header, CLIENT_HEADERS, TASK_HEADERS,
    WORKER_HEADERS,
};

use headers::take;
use tracing::debug;

use crate::models::columns::*;
use crate::models::{ClientRecord, Datasets, TaskRecord, WorkerRecord};

/// Which sheet a batch of rows came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Clients,
    Workers,
    Tasks,
}

/// Normalizes client rows.
pub fn to_clients(rows: &[RawRow]) -> Vec<ClientRecord> {
    debug!(rows = rows.len(), "normalizing client rows");
    rows.iter()
        .map(|raw| {
            let mut r = map_headers(raw, CLIENT_HEADERS);
            let attributes_cell = take(&mut r, ATTRIBUTES_JSON);
            ClientRecord {
                id: coerce_string(&take(&mut r, CLIENT_ID)),
                name: coerce_string(&take(&mut r, CLIENT_NAME)),
                priority_level: coerce_number(&take(&mut r, PRIORITY_LEVEL)),
                requested_task_ids: parse_list(&take(&mut r, REQUESTED_TASK_IDS)),
                group: coerce_optional_string(&take(&mut r, GROUP_TAG)),
                attributes: parse_json(&attributes_cell),
                attributes_raw: coerce_optional_string(&attributes_cell),
                extra: r,
            }
        })
        .collect()
}

/// Normalizes worker rows.
pub fn to_workers(rows: &[RawRow]) -> Vec<WorkerRecord> {
    debug!(rows = rows.len(), "normalizing worker rows");
    rows.iter()
        .map(|raw| {
            let mut r = map_headers(raw, WORKER_HEADERS);
            WorkerRecord {
                id: coerce_string(&take(&mut r, WORKER_ID)),
                name: coerce_string(&take(&mut r, WORKER_NAME)),
                skills: parse_list(&take(&mut r, SKILLS)),
                available_slots: parse_number_list(&take(&mut r, AVAILABLE_SLOTS)),
                max_load_per_phase: coerce_number(&take(&mut r, MAX_LOAD_PER_PHASE)),
                group: coerce_optional_string(&take(&mut r, WORKER_GROUP)),
                qualification_level: coerce_optional_number(&take(&mut r, QUALIFICATION_LEVEL)),
                extra: r,
            }
        })
        .collect()
}

/// Normalizes task rows.
pub fn to_tasks(rows: &[RawRow]) -> Vec<TaskRecord> {
    debug!(rows = rows.len(), "normalizing task rows");
    rows.iter()
        .map(|raw| {
            let mut r = map_headers(raw, TASK_HEADERS);
            TaskRecord {
                id: coerce_string(&take(&mut r, TASK_ID)),
                name: coerce_string(&take(&mut r, TASK_NAME)),
                category: coerce_optional_string(&take(&mut r, CATEGORY)),
                duration: coerce_number(&take(&mut r, DURATION)),
                required_skills: parse_list(&take(&mut r, REQUIRED_SKILLS)),
                preferred_phases: parse_number_list(&take(&mut r, PREFERRED_PHASES)),
                max_concurrent: coerce_number(&take(&mut r, MAX_CONCURRENT)),
                extra: r,
            }
        })
        .collect()
}

/// Normalizes `rows` as `kind` and replaces that collection in `datasets`.
pub fn load_into(datasets: &mut Datasets, kind: RecordKind, rows: &[RawRow]) {
    match kind {
        RecordKind::Clients => datasets.clients = to_clients(rows),
        RecordKind::Workers => datasets.workers = to_workers(rows),
        RecordKind::Tasks => datasets.tasks = to_tasks(rows),
    }
}
