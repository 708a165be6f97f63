//! Progress engine (Layer 2)
//!
//! Sphere progress rules, connection propagation, balance scoring and
//! tree geometry.

#![warn(missing_docs)]

pub mod engine;
pub mod balance;
pub mod command;
pub mod restore;
pub mod tree;

pub use engine::{ProgressEngine, ProgressRules};
pub use balance::{balance_of, BalanceLevel, BalanceScore};
pub use command::{Command, Outcome};
pub use restore::merge_snapshot;
pub use tree::{layout, Branch, Point, TreeLayout};
