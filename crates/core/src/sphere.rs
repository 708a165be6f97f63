//! Sphere model - the fixed life categories progress is tracked against.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ContourError;

/// Lower bound of sphere progress.
pub const MIN_PROGRESS: f64 = 0.0;

/// Upper bound of sphere progress.
pub const MAX_PROGRESS: f64 = 100.0;

/// Identifier of a life sphere.
///
/// The set is fixed. Ordering follows declaration order, which is also the
/// order spheres are listed and laid out on the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SphereId {
    /// Money and savings
    Finance,
    /// Physical and mental health
    Health,
    /// Work and career growth
    Career,
    /// Recreation
    Rest,
    /// Family relations
    Family,
    /// Learning and self-development
    Development,
    /// Creative work
    Creativity,
    /// Friends and surroundings
    Environment,
}

impl SphereId {
    /// Every sphere id, in declaration order.
    pub const ALL: [SphereId; 8] = [
        SphereId::Finance,
        SphereId::Health,
        SphereId::Career,
        SphereId::Rest,
        SphereId::Family,
        SphereId::Development,
        SphereId::Creativity,
        SphereId::Environment,
    ];

    /// Stable string key used in persisted state.
    pub fn as_str(&self) -> &'static str {
        match self {
            SphereId::Finance => "finance",
            SphereId::Health => "health",
            SphereId::Career => "career",
            SphereId::Rest => "rest",
            SphereId::Family => "family",
            SphereId::Development => "development",
            SphereId::Creativity => "creativity",
            SphereId::Environment => "environment",
        }
    }
}

impl std::fmt::Display for SphereId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SphereId {
    type Err = ContourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        SphereId::ALL
            .into_iter()
            .find(|id| id.as_str() == key)
            .ok_or_else(|| ContourError::UnknownSphere(s.to_string()))
    }
}

/// A life sphere with its current progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// Display name
    pub name: String,

    /// Progress percentage, always within `[0, 100]`
    pub progress: f64,

    /// Display color, opaque to the engine
    pub color: String,

    /// Per-sphere task list; never written by the engine, carried through
    /// untouched for layout compatibility
    #[serde(default)]
    pub tasks: Vec<serde_json::Value>,
}

impl Sphere {
    /// Create a sphere with the given initial progress.
    pub fn new(name: impl Into<String>, progress: f64, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            progress: clamp_progress(progress),
            color: color.into(),
            tasks: Vec::new(),
        }
    }

    /// Add `amount` to progress, clamped to the valid range.
    pub fn add_progress(&mut self, amount: f64) {
        self.progress = clamp_progress(self.progress + amount);
    }

    /// Multiply progress by `multiplier`, clamped to the valid range.
    pub fn scale_progress(&mut self, multiplier: f64) {
        self.progress = clamp_progress(self.progress * multiplier);
    }
}

/// Clamp a progress value into `[0, 100]`. NaN collapses to 0.
pub fn clamp_progress(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_PROGRESS;
    }
    value.clamp(MIN_PROGRESS, MAX_PROGRESS)
}

/// The sphere set every new state starts from.
pub fn default_spheres() -> BTreeMap<SphereId, Sphere> {
    [
        (SphereId::Finance, Sphere::new("Финансы", 0.0, "#4CAF50")),
        (SphereId::Health, Sphere::new("Здоровье", 10.0, "#2196F3")),
        (SphereId::Career, Sphere::new("Карьера", 20.0, "#FF9800")),
        (SphereId::Rest, Sphere::new("Отдых", 5.0, "#9C27B0")),
        (SphereId::Family, Sphere::new("Семья", 15.0, "#FF5722")),
        (SphereId::Development, Sphere::new("Развитие", 8.0, "#009688")),
        (SphereId::Creativity, Sphere::new("Творчество", 12.0, "#E91E63")),
        (SphereId::Environment, Sphere::new("Окружение", 3.0, "#795548")),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sphere_id() {
        assert_eq!("health".parse::<SphereId>().unwrap(), SphereId::Health);
        assert_eq!(" Career ".parse::<SphereId>().unwrap(), SphereId::Career);
        assert_eq!(
            "hobby".parse::<SphereId>(),
            Err(ContourError::UnknownSphere("hobby".to_string()))
        );
    }

    #[test]
    fn test_sphere_id_serializes_lowercase() {
        let json = serde_json::to_string(&SphereId::Development).unwrap();
        assert_eq!(json, "\"development\"");
        for id in SphereId::ALL {
            assert_eq!(serde_json::to_string(&id).unwrap(), format!("\"{}\"", id));
        }
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut sphere = Sphere::new("Test", 98.0, "#000");
        sphere.add_progress(5.0);
        assert_eq!(sphere.progress, 100.0);

        sphere.scale_progress(0.5);
        assert_eq!(sphere.progress, 50.0);

        sphere.add_progress(-80.0);
        assert_eq!(sphere.progress, 0.0);

        assert_eq!(clamp_progress(f64::NAN), 0.0);
        assert_eq!(clamp_progress(f64::INFINITY), 100.0);
    }

    #[test]
    fn test_default_spheres() {
        let spheres = default_spheres();
        assert_eq!(spheres.len(), SphereId::ALL.len());
        assert_eq!(spheres[&SphereId::Career].progress, 20.0);
        assert_eq!(spheres[&SphereId::Finance].color, "#4CAF50");
        assert!(spheres.values().all(|s| s.tasks.is_empty()));

        let order: Vec<_> = spheres.keys().copied().collect();
        assert_eq!(order, SphereId::ALL.to_vec());
    }

    #[test]
    fn test_sphere_tasks_field_defaults_when_missing() {
        let sphere: Sphere =
            serde_json::from_str(r##"{"name":"Семья","progress":15,"color":"#FF5722"}"##).unwrap();
        assert!(sphere.tasks.is_empty());
        assert_eq!(sphere.progress, 15.0);
    }

    #[test]
    fn test_sphere_tasks_field_accepts_any_content() {
        let sphere: Sphere = serde_json::from_str(
            r##"{"name":"Отдых","progress":5,"color":"#9C27B0","tasks":["x",{"id":2},null]}"##,
        )
        .unwrap();
        assert_eq!(sphere.tasks.len(), 3);
        assert_eq!(sphere.tasks[1]["id"], 2);
    }
}
