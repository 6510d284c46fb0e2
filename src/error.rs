//! Error taxonomy for assignment problems.
//!
//! Every failure is local and recoverable by the caller. Variants carry
//! enough structure (which agent, task, or field) to render a precise
//! message without re-deriving context.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AssignError>;

/// Errors raised while building, solving, or analysing an assignment problem.
#[derive(Error, Debug)]
pub enum AssignError {
    /// A rate, effort, or efficiency is non-positive or non-finite, or a raw
    /// cost is non-finite.
    #[error("invalid magnitude for {field}: {value}")]
    InvalidMagnitude {
        /// Which input carried the value, e.g. `hourly_rate[Anna]`.
        field: String,
        /// The rejected value.
        value: f64,
    },

    /// The efficiency mapping has no entry for a required pair.
    #[error("missing efficiency entry for agent '{agent}' on task '{task}'")]
    MissingCostEntry {
        /// Agent ID.
        agent: String,
        /// Task ID.
        task: String,
    },

    /// Agent count differs from task count.
    #[error("unbalanced problem: {agents} agents for {tasks} tasks")]
    UnbalancedProblem {
        /// Number of agents (matrix rows).
        agents: usize,
        /// Number of tasks (matrix columns).
        tasks: usize,
    },

    /// A candidate assignment is not a bijection over the problem.
    #[error("invalid assignment: {0}")]
    InvalidAssignment(String),

    /// Raw cost rows do not match the declared labels.
    #[error("{what}: expected {expected}, found {found}")]
    ShapeMismatch {
        /// What was counted, e.g. `row count` or `row length[a0]`.
        what: String,
        /// Count implied by the labels.
        expected: usize,
        /// Count actually supplied.
        found: usize,
    },

    /// A roster has no entries.
    #[error("{0} roster is empty")]
    EmptyRoster(&'static str),

    /// Two roster entries share an ID.
    #[error("duplicate {kind} ID: {id}")]
    DuplicateId {
        /// `"agent"` or `"task"`.
        kind: &'static str,
        /// The repeated ID.
        id: String,
    },

    /// Lookup of an agent ID failed.
    #[error("unknown agent '{0}'")]
    UnknownAgent(String),

    /// Lookup of a task ID failed.
    #[error("unknown task '{0}'")]
    UnknownTask(String),

    /// The exhaustive oracle refuses to enumerate this many permutations.
    #[error("problem of size {size} exceeds the brute-force limit of {limit}")]
    ProblemTooLarge {
        /// Requested problem size.
        size: usize,
        /// Largest size the solver accepts.
        limit: usize,
    },

    /// The cancellation flag was raised while solving.
    #[error("solve cancelled")]
    Cancelled,

    /// Project configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl AssignError {
    pub(crate) fn magnitude(field: impl Into<String>, value: f64) -> Self {
        Self::InvalidMagnitude {
            field: field.into(),
            value,
        }
    }

    /// Whether the error describes the shape of the problem rather than
    /// bad numbers or bad IDs.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::UnbalancedProblem { .. } | Self::InvalidAssignment(_)
        )
    }
}

/// Checks that a value is finite and strictly positive.
pub(crate) fn ensure_positive(field: impl FnOnce() -> String, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AssignError::magnitude(field(), value))
    }
}

/// Checks that a value is finite.
pub(crate) fn ensure_finite(field: impl FnOnce() -> String, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AssignError::magnitude(field(), value))
    }
}
