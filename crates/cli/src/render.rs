//! Plain-text rendering of engine state.

use std::collections::BTreeMap;

use contour_core::{Date, Sphere, SphereId, Task, MAX_PROGRESS};
use contour_progress::tree::{TIP_RADIUS, TRUNK_RADIUS};
use contour_progress::{BalanceLevel, BalanceScore, TreeLayout};

const BAR_WIDTH: usize = 20;
const SPHERE_TAG_CHARS: usize = 2;

/// Daily list: tasks created today and still open.
pub fn today_list<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    spheres: &BTreeMap<SphereId, Sphere>,
    today: Date,
) -> String {
    let tasks: Vec<&Task> = tasks.into_iter().collect();
    let mut out = String::new();

    if tasks.is_empty() {
        out.push_str("No tasks for today\n");
    }
    for task in &tasks {
        let tag: String = spheres
            .get(&task.sphere)
            .map(|s| s.name.chars().take(SPHERE_TAG_CHARS).collect())
            .unwrap_or_else(|| task.sphere.to_string());
        out.push_str(&format!("  [ ] #{:<4} {} ({})\n", task.id, task.text, tag));
    }
    out.push_str(&format!("Today ({}): {} tasks\n", today, tasks.len()));
    out
}

/// One progress bar per sphere.
pub fn progress_bars(spheres: &BTreeMap<SphereId, Sphere>) -> String {
    spheres
        .iter()
        .map(|(id, sphere)| {
            let filled = ((sphere.progress / MAX_PROGRESS) * BAR_WIDTH as f64).round() as usize;
            let filled = filled.min(BAR_WIDTH);
            format!(
                "{:<12} {:<12} [{}{}] {:>3}%\n",
                id.as_str(),
                sphere.name,
                "#".repeat(filled),
                "-".repeat(BAR_WIDTH - filled),
                sphere.progress.round() as i64,
            )
        })
        .collect()
}

/// Branch table for the progress tree.
pub fn tree(layout: &TreeLayout) -> String {
    let mut out = format!(
        "trunk at ({:.1}, {:.1}) r={:.0}, full branch {:.1}, tips r={:.0}\n",
        layout.center.x, layout.center.y, TRUNK_RADIUS, layout.max_radius, TIP_RADIUS
    );
    for branch in &layout.branches {
        out.push_str(&format!(
            "  {:<4} {:>6.1}deg  length {:>6.1}  width {:>4.1}  tip ({:.1}, {:.1})  {}\n",
            branch.label,
            branch.angle.to_degrees(),
            branch.length,
            branch.width,
            branch.tip.x,
            branch.tip.y,
            branch.color,
        ));
    }
    out
}

/// Balance line with its indicator color.
pub fn balance(score: &BalanceScore) -> String {
    let level = match score.level {
        BalanceLevel::Balanced => "balanced",
        BalanceLevel::Uneven => "uneven",
        BalanceLevel::Critical => "critical",
    };
    format!(
        "Balance: {}% ({}, {})\n",
        score.percent(),
        level,
        score.level.color()
    )
}
