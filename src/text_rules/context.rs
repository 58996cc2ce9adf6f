//! Known identifiers a statement is matched against.

use std::collections::HashSet;

use super::statements::mentions_id;
use crate::models::{Datasets, GroupKind};

/// Task ids and group tags known at parse time.
///
/// Task ids keep dataset order so that mentions are reported in the order
/// the tasks were loaded, not the order they appear in the text.
#[derive(Debug, Clone, Default)]
pub struct ParseContext {
    task_ids: Vec<String>,
    worker_groups: HashSet<String>,
    client_groups: HashSet<String>,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects ids and group tags from loaded records.
    pub fn from_datasets(datasets: &Datasets) -> Self {
        Self {
            task_ids: datasets.task_ids().into_iter().map(String::from).collect(),
            worker_groups: datasets.worker_groups().into_iter().map(String::from).collect(),
            client_groups: datasets.client_groups().into_iter().map(String::from).collect(),
        }
    }

    pub fn with_task_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if !id.is_empty() && !self.task_ids.contains(&id) {
            self.task_ids.push(id);
        }
        self
    }

    pub fn with_worker_group(mut self, group: impl Into<String>) -> Self {
        self.worker_groups.insert(group.into());
        self
    }

    pub fn with_client_group(mut self, group: impl Into<String>) -> Self {
        self.client_groups.insert(group.into());
        self
    }

    pub fn task_ids(&self) -> &[String] {
        &self.task_ids
    }

    /// Whether a group tag of the given kind exists.
    pub fn knows_group(&self, kind: GroupKind, value: &str) -> bool {
        match kind {
            GroupKind::WorkerGroup => self.worker_groups.contains(value),
            GroupKind::ClientGroup => self.client_groups.contains(value),
        }
    }

    /// Known task ids mentioned in `statement`, in dataset order.
    pub fn mentioned_tasks<'a>(&'a self, statement: &str) -> Vec<&'a str> {
        self.task_ids
            .iter()
            .filter(|id| mentions_id(statement, id))
            .map(String::as_str)
            .collect()
    }

    /// First known task id mentioned in `statement`, in dataset order.
    pub fn first_mentioned_task<'a>(&'a self, statement: &str) -> Option<&'a str> {
        self.task_ids
            .iter()
            .find(|id| mentions_id(statement, id))
            .map(String::as_str)
    }
}

impl From<&Datasets> for ParseContext {
    fn from(datasets: &Datasets) -> Self {
        Self::from_datasets(datasets)
    }
}
