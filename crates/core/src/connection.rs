//! Connection graph - weighted edges between spheres.
//!
//! Progress gained in a source sphere multiplies the progress of each of its
//! targets. The graph is configuration: it is fixed at startup and never
//! persisted with user state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ContourError, Result};
use crate::sphere::{Sphere, SphereId};

/// A directed, weighted edge out of a source sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Sphere whose progress is adjusted
    pub target: SphereId,

    /// Multiplier applied to the target's progress (<1 damps, >1 amplifies)
    pub multiplier: f64,
}

/// Directed, weighted relation `source -> [(target, multiplier)]`.
///
/// Edges out of a source keep their definition order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionGraph {
    edges: BTreeMap<SphereId, Vec<Connection>>,
}

impl ConnectionGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// The graph shipped with the application.
    pub fn standard() -> Self {
        Self::new()
            .with_edge(SphereId::Finance, SphereId::Health, 1.2)
            .with_edge(SphereId::Finance, SphereId::Development, 1.1)
            .with_edge(SphereId::Health, SphereId::Career, 1.3)
            .with_edge(SphereId::Health, SphereId::Rest, 0.9)
            .with_edge(SphereId::Rest, SphereId::Health, 1.2)
            .with_edge(SphereId::Rest, SphereId::Creativity, 1.1)
            .with_edge(SphereId::Development, SphereId::Career, 1.4)
            .with_edge(SphereId::Development, SphereId::Finance, 1.1)
    }

    /// Append an edge after any existing edges of `source`.
    pub fn with_edge(mut self, source: SphereId, target: SphereId, multiplier: f64) -> Self {
        self.edges
            .entry(source)
            .or_default()
            .push(Connection { target, multiplier });
        self
    }

    /// Outgoing edges of `source`, in definition order.
    pub fn edges_from(&self, source: SphereId) -> &[Connection] {
        self.edges.get(&source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over `(source, edge)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (SphereId, &Connection)> {
        self.edges
            .iter()
            .flat_map(|(source, edges)| edges.iter().map(move |edge| (*source, edge)))
    }

    /// Total number of edges.
    pub fn len(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Whether the graph has no edges.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check every edge against a sphere set.
    ///
    /// # Errors
    /// - `InvalidConnection` when an endpoint is missing from `spheres`.
    /// - `InvalidConnection` when a multiplier is not a finite positive number.
    pub fn validate(&self, spheres: &BTreeMap<SphereId, Sphere>) -> Result<()> {
        for (source, edge) in self.iter() {
            let invalid = |reason: &str| ContourError::InvalidConnection {
                from: source,
                to: edge.target,
                reason: reason.to_string(),
            };

            if !spheres.contains_key(&source) {
                return Err(invalid("source sphere is not configured"));
            }
            if !spheres.contains_key(&edge.target) {
                return Err(invalid("target sphere is not configured"));
            }
            if !edge.multiplier.is_finite() || edge.multiplier <= 0.0 {
                return Err(invalid("multiplier must be a finite positive number"));
            }
        }
        Ok(())
    }
}
