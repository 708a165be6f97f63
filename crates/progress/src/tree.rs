//! Progress tree geometry.
//!
//! Each sphere is drawn as a branch radiating from the center of the canvas.
//! Branch length and thickness grow with the sphere's progress. This module
//! only computes geometry; drawing is up to the renderer.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use contour_core::{Sphere, SphereId, MAX_PROGRESS};
use serde::{Deserialize, Serialize};

/// Fraction of the half-canvas a fully grown branch reaches.
pub const MAX_RADIUS_RATIO: f64 = 0.7;

/// Thickness of a branch with no progress.
pub const BASE_BRANCH_WIDTH: f64 = 3.0;

/// Extra thickness of a fully grown branch.
pub const BRANCH_WIDTH_GAIN: f64 = 10.0;

/// Distance between a branch tip and its label.
pub const LABEL_OFFSET: f64 = 25.0;

/// Number of name characters shown in a label.
pub const LABEL_CHARS: usize = 4;

/// Radius of the dot at each branch tip.
pub const TIP_RADIUS: f64 = 8.0;

/// Radius of the trunk dot at the center.
pub const TRUNK_RADIUS: f64 = 15.0;

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    fn polar(center: Point, angle: f64, distance: f64) -> Self {
        Self {
            x: center.x + angle.cos() * distance,
            y: center.y + angle.sin() * distance,
        }
    }
}

/// Geometry of one sphere's branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// Sphere drawn by this branch
    pub sphere: SphereId,
    /// Direction in radians, clockwise from the positive x axis
    pub angle: f64,
    /// Length from the center
    pub length: f64,
    /// Stroke width
    pub width: f64,
    /// End of the branch
    pub tip: Point,
    /// Short label text
    pub label: String,
    /// Where the label is anchored
    pub label_at: Point,
    /// Stroke color
    pub color: String,
}

/// Geometry of the whole tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeLayout {
    /// Canvas center, where the trunk sits
    pub center: Point,
    /// Length of a branch at 100% progress
    pub max_radius: f64,
    /// One branch per sphere, in sphere order
    pub branches: Vec<Branch>,
}

/// Lay out the tree for a `width` x `height` canvas.
pub fn layout(spheres: &BTreeMap<SphereId, Sphere>, width: f64, height: f64) -> TreeLayout {
    let center = Point {
        x: width / 2.0,
        y: height / 2.0,
    };
    let max_radius = center.x.min(center.y) * MAX_RADIUS_RATIO;

    let count = spheres.len();
    let angle_step = if count == 0 { 0.0 } else { 2.0 * PI / count as f64 };

    let branches = spheres
        .iter()
        .enumerate()
        .map(|(index, (id, sphere))| {
            let ratio = sphere.progress / MAX_PROGRESS;
            let angle = index as f64 * angle_step;
            let length = ratio * max_radius;

            Branch {
                sphere: *id,
                angle,
                length,
                width: BASE_BRANCH_WIDTH + ratio * BRANCH_WIDTH_GAIN,
                tip: Point::polar(center, angle, length),
                label: sphere.name.chars().take(LABEL_CHARS).collect(),
                label_at: Point::polar(center, angle, length + LABEL_OFFSET),
                color: sphere.color.clone(),
            }
        })
        .collect();

    TreeLayout {
        center,
        max_radius,
        branches,
    }
}
