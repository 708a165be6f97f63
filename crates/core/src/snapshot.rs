//! Snapshot model - the full persisted state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::TaskId;
use crate::sphere::{default_spheres, Sphere, SphereId};
use crate::task::Task;

/// Complete application state as it is saved and exported.
///
/// Layout:
/// ```text
/// { "spheres": { "<id>": { name, progress, color, tasks } },
///   "tasks": [ { id, text, sphere, done, date } ],
///   "lastTaskId": int }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Spheres keyed by id
    pub spheres: BTreeMap<SphereId, Sphere>,

    /// All tasks in creation order
    pub tasks: Vec<Task>,

    /// Last assigned task id
    pub last_task_id: TaskId,
}

impl Snapshot {
    /// The state a fresh installation starts with.
    pub fn initial() -> Self {
        Self {
            spheres: default_spheres(),
            tasks: Vec::new(),
            last_task_id: TaskId::NONE,
        }
    }

    /// Compact JSON encoding used for storage.
    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Indented JSON encoding used for exports.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Highest task id present, or `TaskId::NONE` when there are no tasks.
    pub fn max_task_id(&self) -> TaskId {
        self.tasks
            .iter()
            .map(|t| t.id)
            .max()
            .unwrap_or(TaskId::NONE)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::initial()
    }
}
