//! What-if analysis over an immutable cost matrix.
//!
//! - [`evaluate`] / [`ScenarioEvaluator`]: price an externally supplied
//!   assignment (e.g. a role-intuitive staffing), compare it with the
//!   optimum, or re-solve with one agent-task pair forced.
//! - [`SensitivityRunner`]: remove agents and report the structural
//!   consequence under a caller-supplied [`ShortfallPolicy`].
//!
//! Every scenario builds its own derived matrix; nothing shared is mutated,
//! so independent scenarios can run on separate threads.

mod evaluator;
mod sensitivity;

pub use evaluator::{evaluate, ScenarioComparison, ScenarioEvaluator};
pub use sensitivity::{
    RemovalOutcome, RemovalReport, SensitivityRunner, Shortfall, ShortfallPolicy,
};
