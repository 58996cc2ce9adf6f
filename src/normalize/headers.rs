//! Header synonym tables.
//!
//! Incoming headers are compared after lower-casing and removing all
//! whitespace, so `Client ID`, `clientid` and `CLIENTID` all map to
//! `ClientID`.

use crate::models::columns::*;

use super::{CellValue, RawRow};

/// (normalized header, canonical column) pairs for the clients sheet.
pub const CLIENT_HEADERS: &[(&str, &str)] = &[
    ("clientid", CLIENT_ID),
    ("client_id", CLIENT_ID),
    ("clientname", CLIENT_NAME),
    ("client_name", CLIENT_NAME),
    ("prioritylevel", PRIORITY_LEVEL),
    ("priority", PRIORITY_LEVEL),
    ("requestedtaskids", REQUESTED_TASK_IDS),
    ("requestedtasks", REQUESTED_TASK_IDS),
    ("grouptag", GROUP_TAG),
    ("clientgroup", GROUP_TAG),
    ("attributesjson", ATTRIBUTES_JSON),
    ("attributes", ATTRIBUTES_JSON),
];

/// (normalized header, canonical column) pairs for the workers sheet.
pub const WORKER_HEADERS: &[(&str, &str)] = &[
    ("workerid", WORKER_ID),
    ("worker_id", WORKER_ID),
    ("workername", WORKER_NAME),
    ("worker_name", WORKER_NAME),
    ("skills", SKILLS),
    ("availableslots", AVAILABLE_SLOTS),
    ("availablephases", AVAILABLE_SLOTS),
    ("maxloadperphase", MAX_LOAD_PER_PHASE),
    ("workergroup", WORKER_GROUP),
    ("group", WORKER_GROUP),
    ("qualificationlevel", QUALIFICATION_LEVEL),
];

/// (normalized header, canonical column) pairs for the tasks sheet.
pub const TASK_HEADERS: &[(&str, &str)] = &[
    ("taskid", TASK_ID),
    ("task_id", TASK_ID),
    ("taskname", TASK_NAME),
    ("task_name", TASK_NAME),
    ("category", CATEGORY),
    ("duration", DURATION),
    ("requiredskills", REQUIRED_SKILLS),
    ("preferredphases", PREFERRED_PHASES),
    ("maxconcurrent", MAX_CONCURRENT),
];

/// Lower-cases a header and strips all whitespace.
pub fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Looks up the canonical column for a raw header.
pub fn canonical_header(header: &str, table: &[(&str, &'static str)]) -> Option<&'static str> {
    let key = normalize_header(header);
    table
        .iter()
        .find(|(synonym, _)| *synonym == key)
        .map(|(_, canonical)| *canonical)
}

/// Renames known headers to their canonical column; unknown headers are
/// kept verbatim.
pub fn map_headers(row: &RawRow, table: &[(&str, &'static str)]) -> RawRow {
    let mut out = RawRow::new();
    for (key, value) in row {
        let mapped = canonical_header(key, table)
            .map(str::to_string)
            .unwrap_or_else(|| key.clone());
        out.insert(mapped, value.clone());
    }
    out
}

/// Removes and returns a canonical column, `Null` when missing.
pub(crate) fn take(row: &mut RawRow, column: &str) -> CellValue {
    row.remove(column).unwrap_or_default()
}
