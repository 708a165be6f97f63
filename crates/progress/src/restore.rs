//! Restoring engine state from a persisted blob.
//!
//! A persisted blob may be partial or written by an older version. It is
//! deep-merged onto the engine's initial state: objects merge key by key,
//! scalars and arrays replace. The merged value must then decode as a
//! [`Snapshot`] and pass shape validation.

use std::collections::HashSet;

use contour_core::{clamp_progress, ContourError, Result, Snapshot};
use serde_json::Value;
use tracing::warn;

const LAST_TASK_ID_FIELD: &str = "lastTaskId";

/// Merge `blob` onto `base` and validate the result.
///
/// The stored `lastTaskId` is dropped without being decoded and is
/// recomputed from the tasks.
///
/// # Errors
/// Returns `MalformedSnapshot` when the blob is not a JSON object, when the
/// merged state does not decode, when two tasks share an id, or when a task
/// references a sphere missing from the merged sphere set.
pub fn merge_snapshot(base: &Snapshot, blob: &[u8]) -> Result<Snapshot> {
    let mut overlay: Value = serde_json::from_slice(blob)?;
    let Some(fields) = overlay.as_object_mut() else {
        return Err(ContourError::MalformedSnapshot(
            "expected a JSON object at the top level".to_string(),
        ));
    };
    // The stored counter may be stale, null or negative; it is rebuilt below.
    fields.remove(LAST_TASK_ID_FIELD);

    let mut merged = serde_json::to_value(base)?;
    deep_merge(&mut merged, overlay);

    let mut snapshot: Snapshot = serde_json::from_value(merged)?;
    validate(&mut snapshot)?;
    snapshot.last_task_id = snapshot.max_task_id();
    Ok(snapshot)
}

fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

fn validate(snapshot: &mut Snapshot) -> Result<()> {
    let mut seen = HashSet::with_capacity(snapshot.tasks.len());
    for task in &snapshot.tasks {
        if !seen.insert(task.id) {
            return Err(ContourError::MalformedSnapshot(format!(
                "duplicate task id {}",
                task.id
            )));
        }
        if !snapshot.spheres.contains_key(&task.sphere) {
            return Err(ContourError::MalformedSnapshot(format!(
                "task {} references missing sphere {}",
                task.id, task.sphere
            )));
        }
    }

    for (id, sphere) in snapshot.spheres.iter_mut() {
        let clamped = clamp_progress(sphere.progress);
        if clamped != sphere.progress {
            warn!(
                sphere = %id,
                stored = sphere.progress,
                clamped,
                "Stored sphere progress out of range"
            );
            sphere.progress = clamped;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contour_core::{SphereId, TaskId};
    use serde_json::json;

    fn merge(blob: Value) -> Result<Snapshot> {
        merge_snapshot(&Snapshot::initial(), blob.to_string().as_bytes())
    }

    #[test]
    fn test_missing_spheres_fall_back_to_defaults() {
        let snapshot = merge(json!({
            "tasks": [
                { "id": 1, "text": "Walk", "sphere": "health", "done": false, "date": "2024-05-01" }
            ],
            "lastTaskId": 1
        }))
        .unwrap();

        assert_eq!(snapshot.spheres, Snapshot::initial().spheres);
        assert_eq!(snapshot.tasks.len(), 1);
    }

    #[test]
    fn test_partial_sphere_keeps_default_fields() {
        let snapshot = merge(json!({ "spheres": { "career": { "progress": 64.5 } } })).unwrap();

        let career = &snapshot.spheres[&SphereId::Career];
        assert_eq!(career.progress, 64.5);
        assert_eq!(career.name, "Карьера");
        assert_eq!(career.color, "#FF9800");
        assert_eq!(snapshot.spheres[&SphereId::Health].progress, 10.0);
    }

    #[test]
    fn test_last_task_id_is_recomputed() {
        let snapshot = merge(json!({
            "tasks": [
                { "id": 3, "text": "a", "sphere": "rest", "done": true, "date": "2024-05-01" },
                { "id": 8, "text": "b", "sphere": "rest", "done": false, "date": "2024-05-02" }
            ],
            "lastTaskId": 2
        }))
        .unwrap();
        assert_eq!(snapshot.last_task_id, TaskId::new(8));

        let empty = merge(json!({ "lastTaskId": 41 })).unwrap();
        assert_eq!(empty.last_task_id, TaskId::NONE);
    }

    #[test]
    fn test_unusable_stored_counter_is_ignored() {
        for counter in [json!(null), json!(-3), json!("seven"), json!(1.5)] {
            let snapshot = merge(json!({
                "tasks": [
                    { "id": 4, "text": "a", "sphere": "family", "done": false, "date": "2024-05-01" }
                ],
                "lastTaskId": counter
            }))
            .unwrap();
            assert_eq!(snapshot.last_task_id, TaskId::new(4));
        }
    }

    #[test]
    fn test_sphere_task_list_is_passed_through() {
        let snapshot = merge(json!({
            "spheres": { "rest": { "tasks": ["nap", { "id": 1 }, 3] } }
        }))
        .unwrap();
        assert_eq!(
            snapshot.spheres[&SphereId::Rest].tasks,
            vec![json!("nap"), json!({ "id": 1 }), json!(3)]
        );
    }

    #[test]
    fn test_rejects_non_object() {
        for blob in [json!([1, 2]), json!("state"), json!(null)] {
            assert!(matches!(merge(blob), Err(ContourError::MalformedSnapshot(_))));
        }
        assert!(matches!(
            merge_snapshot(&Snapshot::initial(), b"{not json"),
            Err(ContourError::MalformedSnapshot(_))
        ));
    }

    #[test]
    fn test_rejects_bad_shapes() {
        let unknown_sphere = merge(json!({ "spheres": { "hobby": { "name": "x", "progress": 1, "color": "#fff" } } }));
        assert!(matches!(unknown_sphere, Err(ContourError::MalformedSnapshot(_))));

        let bad_task = merge(json!({ "tasks": [ { "id": 1, "text": "a" } ] }));
        assert!(matches!(bad_task, Err(ContourError::MalformedSnapshot(_))));

        let bad_date = merge(json!({
            "tasks": [ { "id": 1, "text": "a", "sphere": "rest", "done": false, "date": "yesterday" } ]
        }));
        assert!(matches!(bad_date, Err(ContourError::MalformedSnapshot(_))));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = merge(json!({
            "tasks": [
                { "id": 2, "text": "a", "sphere": "rest", "done": false, "date": "2024-05-01" },
                { "id": 2, "text": "b", "sphere": "family", "done": false, "date": "2024-05-01" }
            ]
        }));
        assert!(matches!(result, Err(ContourError::MalformedSnapshot(msg)) if msg.contains("duplicate")));
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        let snapshot = merge(json!({
            "spheres": { "finance": { "progress": 250 }, "rest": { "progress": -4 } }
        }))
        .unwrap();
        assert_eq!(snapshot.spheres[&SphereId::Finance].progress, 100.0);
        assert_eq!(snapshot.spheres[&SphereId::Rest].progress, 0.0);
    }
}
