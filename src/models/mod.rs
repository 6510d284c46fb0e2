//! Assignment domain models.
//!
//! Provides the core data types for representing balanced assignment
//! problems and their solutions.
//!
//! # Domain Mappings
//!
//! | u-assign | Software Project | Manufacturing | Logistics |
//! |----------|------------------|---------------|-----------|
//! | Agent | Employee | Machine | Driver |
//! | Task | Work Package | Job | Route |
//! | EfficiencyMatrix | Skill Fit | Speed Factor | Familiarity |
//! | Assignment | Staffing Plan | Machine Allocation | Dispatch |

mod agent;
mod assignment;
mod cost_matrix;
mod efficiency;
mod task;

pub use agent::Agent;
pub use assignment::{Assignment, SolveResult, SolveStatus};
pub use cost_matrix::CostMatrix;
pub use efficiency::EfficiencyMatrix;
pub use task::Task;
