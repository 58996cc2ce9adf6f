//! Client record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::normalize::CellValue;

/// A client row after normalization.
///
/// `attributes` holds the decoded form of the `AttributesJSON` column and
/// `attributes_raw` the cell text it came from, so that an unparsable cell
/// can still be reported after normalization turned it into `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    /// Unique client identifier.
    #[serde(rename = "ClientID")]
    pub id: String,
    /// Human-readable name.
    #[serde(rename = "ClientName")]
    pub name: String,
    /// Priority, integer 1..=5.
    #[serde(rename = "PriorityLevel")]
    pub priority_level: f64,
    /// Requested task ids, in sheet order.
    #[serde(rename = "RequestedTaskIDs", default)]
    pub requested_task_ids: Vec<String>,
    /// Optional client group tag.
    #[serde(rename = "GroupTag", default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Decoded attributes. `None` when absent or unparsable.
    #[serde(rename = "AttributesJSON", default)]
    pub attributes: Option<serde_json::Value>,
    #[serde(skip)]
    pub attributes_raw: Option<String>,
    /// Columns that did not map to a known header.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, CellValue>,
}

impl ClientRecord {
    /// Creates a client with the given ID and priority 1.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            priority_level: 1.0,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority_level = priority;
        self
    }

    /// Adds a requested task id.
    pub fn with_request(mut self, task_id: impl Into<String>) -> Self {
        self.requested_task_ids.push(task_id.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets the attribute text, decoding it when it is valid JSON.
    pub fn with_attributes_json(mut self, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        self.attributes = serde_json::from_str(&raw).ok();
        self.attributes_raw = Some(raw);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let c = ClientRecord::new("C1")
            .with_name("Acme")
            .with_priority(3.0)
            .with_request("T1")
            .with_request("T2")
            .with_group("VIP");

        assert_eq!(c.id, "C1");
        assert_eq!(c.priority_level, 3.0);
        assert_eq!(c.requested_task_ids, vec!["T1", "T2"]);
        assert_eq!(c.group.as_deref(), Some("VIP"));
    }

    #[test]
    fn test_attributes_json_invalid_keeps_raw() {
        let c = ClientRecord::new("C1").with_attributes_json("{not json");
        assert!(c.attributes.is_none());
        assert_eq!(c.attributes_raw.as_deref(), Some("{not json"));

        let c = ClientRecord::new("C1").with_attributes_json(r#"{"tier":"gold"}"#);
        assert_eq!(c.attributes.unwrap()["tier"], "gold");
    }
}
