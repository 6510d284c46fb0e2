//! Balanced assignment framework for the U-Engine ecosystem.
//!
//! Given N agents, N tasks, and a cost for every agent-task pair, finds the
//! one-to-one pairing of minimum total cost, exactly and in O(N³), and
//! supports what-if analysis over the same cost data.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Agent`, `Task`, `EfficiencyMatrix`,
//!   `CostMatrix`, `Assignment`, `SolveResult`
//! - **`validation`**: Input integrity checks (empty rosters, duplicate IDs,
//!   magnitudes, missing efficiency entries)
//! - **`cost`**: Cost matrix construction and the immutable `CostModel` snapshot
//! - **`solver`**: `AssignmentSolver` trait, Hungarian solver, brute-force oracle
//! - **`scenario`**: Candidate evaluation, forced pairs, agent-removal analysis
//! - **`config`**: serde-based project description
//!
//! # Example
//!
//! ```
//! use u_assign::cost::CostModel;
//! use u_assign::models::{Agent, EfficiencyMatrix, Task};
//! use u_assign::solver::{AssignmentSolver, HungarianSolver};
//!
//! let agents = vec![Agent::new("Anna", 180.0), Agent::new("Bartek", 120.0)];
//! let tasks = vec![Task::new("Architektura", 40.0), Task::new("Backend", 80.0)];
//! let efficiency = EfficiencyMatrix::new()
//!     .with_row("Anna", &["Architektura", "Backend"], &[1.0, 1.1])
//!     .with_row("Bartek", &["Architektura", "Backend"], &[1.5, 1.0]);
//!
//! let model = CostModel::new(agents, tasks, efficiency).unwrap();
//! let result = HungarianSolver::new().solve(model.cost_matrix()).unwrap();
//!
//! assert_eq!(
//!     result.assignment.to_id_pairs(model.cost_matrix()),
//!     vec![("Anna", "Architektura"), ("Bartek", "Backend")]
//! );
//! assert!((result.total_cost - 16800.0).abs() < 1e-6);
//! ```
//!
//! # Architecture
//!
//! This crate sits at Layer 3 (Frameworks) in the U-Engine ecosystem. It is
//! a pure computation boundary: no I/O, no printing. Report rendering and
//! data loading belong to the caller.
//!
//! # References
//!
//! - Kuhn (1955), "The Hungarian Method for the Assignment Problem"
//! - Burkard, Dell'Amico & Martello (2012), "Assignment Problems"

pub mod config;
pub mod cost;
pub mod error;
pub mod models;
pub mod scenario;
pub mod solver;
pub mod validation;

pub use error::{AssignError, Result};

#[cfg(test)]
mod fixtures;
