//! The three record collections validated together.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{ClientRecord, TaskRecord, WorkerRecord};

/// Clients, workers, and tasks as currently loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Datasets {
    #[serde(default)]
    pub clients: Vec<ClientRecord>,
    #[serde(default)]
    pub workers: Vec<WorkerRecord>,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

impl Datasets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(mut self, client: ClientRecord) -> Self {
        self.clients.push(client);
        self
    }

    pub fn with_worker(mut self, worker: WorkerRecord) -> Self {
        self.workers.push(worker);
        self
    }

    pub fn with_task(mut self, task: TaskRecord) -> Self {
        self.tasks.push(task);
        self
    }

    /// Task ids in record order, duplicates and empty ids removed.
    pub fn task_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.tasks
            .iter()
            .map(|t| t.id.as_str())
            .filter(|id| !id.is_empty() && seen.insert(*id))
            .collect()
    }

    /// Distinct non-empty worker group tags.
    pub fn worker_groups(&self) -> HashSet<&str> {
        self.workers
            .iter()
            .filter_map(|w| w.group.as_deref())
            .filter(|g| !g.is_empty())
            .collect()
    }

    /// Distinct non-empty client group tags.
    pub fn client_groups(&self) -> HashSet<&str> {
        self.clients
            .iter()
            .filter_map(|c| c.group.as_deref())
            .filter(|g| !g.is_empty())
            .collect()
    }

    /// First task with the given id.
    pub fn task(&self, id: &str) -> Option<&TaskRecord> {
        self.tasks.iter().find(|t| t.id == id)
    }
}
