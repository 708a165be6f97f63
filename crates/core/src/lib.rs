//! Contour core data models.
//!
//! This crate defines the spheres, tasks and connection graph that the
//! progress engine operates on, plus the persisted snapshot layout.

#![warn(missing_docs)]

// Core identities
mod id;
mod error;

// Spheres and their relations
mod sphere;
mod connection;

// Logged work
mod task;

// Persisted state
mod snapshot;

// Re-exports
pub use id::TaskId;
pub use error::{ContourError, Result};

pub use sphere::{clamp_progress, default_spheres, Sphere, SphereId, MAX_PROGRESS, MIN_PROGRESS};
pub use connection::{Connection, ConnectionGraph};
pub use task::Task;
pub use snapshot::Snapshot;

/// Calendar date type used for task dates.
pub type Date = chrono::NaiveDate;
