//! The progress engine - turns task events into sphere progress.

use std::collections::BTreeMap;

use contour_core::{
    ConnectionGraph, ContourError, Date, Result, Snapshot, Sphere, SphereId, Task, TaskId,
};
use tracing::debug;

use crate::balance::{balance_of, BalanceScore};
use crate::command::{Command, Outcome};
use crate::restore::merge_snapshot;

/// Progress awarded by the engine's rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressRules {
    /// Added to a sphere when a task is logged against it
    pub task_bonus: f64,
    /// Added to a sphere when one of its tasks is completed
    pub completion_bonus: f64,
}

impl Default for ProgressRules {
    fn default() -> Self {
        Self {
            task_bonus: 5.0,
            completion_bonus: 10.0,
        }
    }
}

/// Owns sphere progress, the task list and the connection graph.
///
/// Every mutation goes through [`record_task`](Self::record_task) or
/// [`toggle_task`](Self::toggle_task). Failed operations leave the state
/// untouched.
///
/// Propagation is one hop: a progress change in a sphere scales its direct
/// targets and stops there, even when a target has outgoing edges of its own.
#[derive(Debug, Clone)]
pub struct ProgressEngine {
    initial: Snapshot,
    spheres: BTreeMap<SphereId, Sphere>,
    tasks: Vec<Task>,
    last_task_id: TaskId,
    graph: ConnectionGraph,
    rules: ProgressRules,
}

impl ProgressEngine {
    /// Create an engine with the default spheres and the standard graph.
    pub fn new() -> Self {
        let initial = Snapshot::initial();
        Self {
            spheres: initial.spheres.clone(),
            tasks: Vec::new(),
            last_task_id: TaskId::NONE,
            graph: ConnectionGraph::standard(),
            rules: ProgressRules::default(),
            initial,
        }
    }

    /// Create an engine with a custom sphere set and graph.
    ///
    /// # Errors
    /// Returns `InvalidConnection` when the graph does not fit the spheres.
    pub fn with_configuration(
        spheres: BTreeMap<SphereId, Sphere>,
        graph: ConnectionGraph,
    ) -> Result<Self> {
        graph.validate(&spheres)?;
        let initial = Snapshot {
            spheres,
            tasks: Vec::new(),
            last_task_id: TaskId::NONE,
        };
        Ok(Self {
            spheres: initial.spheres.clone(),
            tasks: Vec::new(),
            last_task_id: TaskId::NONE,
            graph,
            rules: ProgressRules::default(),
            initial,
        })
    }

    /// Set the progress rules.
    pub fn with_rules(mut self, rules: ProgressRules) -> Self {
        self.rules = rules;
        self
    }

    /// All spheres in sphere order.
    pub fn spheres(&self) -> &BTreeMap<SphereId, Sphere> {
        &self.spheres
    }

    /// Look up one sphere.
    pub fn sphere(&self, id: SphereId) -> Option<&Sphere> {
        self.spheres.get(&id)
    }

    /// All tasks in creation order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up one task.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Last assigned task id.
    pub fn last_task_id(&self) -> TaskId {
        self.last_task_id
    }

    /// The connection graph.
    pub fn graph(&self) -> &ConnectionGraph {
        &self.graph
    }

    /// The active progress rules.
    pub fn rules(&self) -> ProgressRules {
        self.rules
    }

    /// Tasks for the daily list: created on `today` and not done.
    pub fn today_tasks(&self, today: Date) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.is_pending_on(today))
    }

    /// Log a task against `sphere`.
    ///
    /// The caller is expected to reject blank text beforehand.
    ///
    /// # Errors
    /// - `UnknownSphere` when `sphere` is not configured.
    /// - `TaskIdsExhausted` when the last assigned id is `u64::MAX`.
    pub fn record_task(
        &mut self,
        text: impl Into<String>,
        sphere: SphereId,
        date: Date,
    ) -> Result<Task> {
        let id = self
            .last_task_id
            .next()
            .ok_or(ContourError::TaskIdsExhausted(self.last_task_id))?;
        let target = self
            .spheres
            .get_mut(&sphere)
            .ok_or_else(|| ContourError::UnknownSphere(sphere.to_string()))?;
        target.add_progress(self.rules.task_bonus);

        let task = Task::new(id, text, sphere, date);
        self.last_task_id = id;
        self.tasks.push(task.clone());

        debug!(task_id = %id, %sphere, "Recorded task");
        self.propagate(sphere);
        Ok(task)
    }

    /// Flip the completion flag of a task.
    ///
    /// Completing a task awards the completion bonus and propagates.
    /// Reopening a task does not take the bonus back.
    ///
    /// # Errors
    /// Returns `NotFound` when no task has `id`.
    pub fn toggle_task(&mut self, id: TaskId) -> Result<Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ContourError::NotFound(id))?;

        task.done = !task.done;
        let task = task.clone();

        if task.done {
            if let Some(sphere) = self.spheres.get_mut(&task.sphere) {
                sphere.add_progress(self.rules.completion_bonus);
            }
            self.propagate(task.sphere);
        }

        debug!(task_id = %id, done = task.done, "Toggled task");
        Ok(task)
    }

    /// Apply a command from the input surface.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::RecordTask { text, sphere, date } => {
                self.record_task(text, sphere, date).map(Outcome::Recorded)
            }
            Command::ToggleTask { id } => self.toggle_task(id).map(Outcome::Toggled),
        }
    }

    /// Scale the direct targets of `source`. Does not cascade.
    fn propagate(&mut self, source: SphereId) {
        for edge in self.graph.edges_from(source) {
            if let Some(target) = self.spheres.get_mut(&edge.target) {
                target.scale_progress(edge.multiplier);
                debug!(
                    %source,
                    target = %edge.target,
                    multiplier = edge.multiplier,
                    progress = target.progress,
                    "Propagated connection"
                );
            }
        }
    }

    /// Current balance score: `max(0, mean - variance / 2)` over all spheres.
    pub fn compute_balance(&self) -> f64 {
        balance_of(self.spheres.values().map(|s| s.progress))
    }

    /// Current balance score with its classification.
    pub fn balance(&self) -> BalanceScore {
        BalanceScore::new(self.compute_balance())
    }

    /// Full state for saving or exporting.
    pub fn snapshot_for_persistence(&self) -> Snapshot {
        Snapshot {
            spheres: self.spheres.clone(),
            tasks: self.tasks.clone(),
            last_task_id: self.last_task_id,
        }
    }

    /// Replace the state with a persisted blob merged onto the initial state.
    ///
    /// # Errors
    /// Returns `MalformedSnapshot` when the blob fails validation; the
    /// current state is kept in that case.
    pub fn restore_from_persistence(&mut self, blob: &[u8]) -> Result<()> {
        let snapshot = merge_snapshot(&self.initial, blob)?;
        self.graph
            .validate(&snapshot.spheres)
            .map_err(|err| ContourError::MalformedSnapshot(err.to_string()))?;

        debug!(
            tasks = snapshot.tasks.len(),
            last_task_id = %snapshot.last_task_id,
            "Restored state"
        );
        self.spheres = snapshot.spheres;
        self.tasks = snapshot.tasks;
        self.last_task_id = snapshot.last_task_id;
        Ok(())
    }
}

impl Default for ProgressEngine {
    fn default() -> Self {
        Self::new()
    }
}
