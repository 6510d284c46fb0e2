//! Assignment (solution) model.
//!
//! An assignment is a bijection from agents to tasks, stored as a
//! permutation: entry `i` is the task column given to agent row `i`.
//! Every constructor validates the bijection, so a partial or
//! many-to-one mapping can never exist as an `Assignment`.

use serde::{Deserialize, Serialize};

use super::CostMatrix;
use crate::error::{AssignError, Result};

/// A complete one-to-one mapping of agents to tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Assignment {
    task_of: Vec<usize>,
}

impl Assignment {
    /// Builds an assignment from a permutation (`task_of[agent] = task`).
    ///
    /// Fails with `InvalidAssignment` if an index is out of range or a task
    /// is used twice.
    pub fn from_permutation(task_of: Vec<usize>) -> Result<Self> {
        let n = task_of.len();
        let mut owner: Vec<Option<usize>> = vec![None; n];
        for (agent, &task) in task_of.iter().enumerate() {
            if task >= n {
                return Err(AssignError::InvalidAssignment(format!(
                    "agent {agent} mapped to task {task}, but only {n} tasks exist"
                )));
            }
            if let Some(prev) = owner[task] {
                return Err(AssignError::InvalidAssignment(format!(
                    "task {task} assigned to both agent {prev} and agent {agent}"
                )));
            }
            owner[task] = Some(agent);
        }
        Ok(Self { task_of })
    }

    /// Builds an assignment of size `n` from `(agent, task)` index pairs.
    ///
    /// Every agent must appear exactly once and every task exactly once.
    pub fn from_pairs(n: usize, pairs: &[(usize, usize)]) -> Result<Self> {
        let mut task_of: Vec<Option<usize>> = vec![None; n];
        for &(agent, task) in pairs {
            if agent >= n {
                return Err(AssignError::InvalidAssignment(format!(
                    "agent {agent} out of range for {n} agents"
                )));
            }
            if let Some(prev) = task_of[agent] {
                return Err(AssignError::InvalidAssignment(format!(
                    "agent {agent} mapped to both task {prev} and task {task}"
                )));
            }
            task_of[agent] = Some(task);
        }
        let task_of = task_of
            .into_iter()
            .enumerate()
            .map(|(agent, t)| {
                t.ok_or_else(|| {
                    AssignError::InvalidAssignment(format!("agent {agent} has no task"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_permutation(task_of)
    }

    /// The identity assignment (agent `i` → task `i`).
    pub fn identity(n: usize) -> Self {
        Self {
            task_of: (0..n).collect(),
        }
    }

    /// Number of agents (equal to the number of tasks).
    pub fn len(&self) -> usize {
        self.task_of.len()
    }

    /// Whether the assignment covers no agents.
    pub fn is_empty(&self) -> bool {
        self.task_of.is_empty()
    }

    /// Task column assigned to an agent row.
    #[inline]
    pub fn task_for(&self, agent: usize) -> usize {
        self.task_of[agent]
    }

    /// Agent row that covers a task column.
    pub fn agent_for(&self, task: usize) -> Option<usize> {
        self.task_of.iter().position(|&t| t == task)
    }

    /// The permutation as a slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.task_of
    }

    /// Iterates over `(agent, task)` pairs in agent order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.task_of.iter().copied().enumerate()
    }

    /// Maps the assignment to `(agent ID, task ID)` pairs using a matrix's labels.
    pub fn to_id_pairs<'m>(&self, matrix: &'m CostMatrix) -> Vec<(&'m str, &'m str)> {
        self.pairs()
            .map(|(a, t)| {
                (
                    matrix.agent_ids()[a].as_str(),
                    matrix.task_ids()[t].as_str(),
                )
            })
            .collect()
    }
}

impl TryFrom<Vec<usize>> for Assignment {
    type Error = AssignError;

    fn try_from(task_of: Vec<usize>) -> Result<Self> {
        Self::from_permutation(task_of)
    }
}

impl From<Assignment> for Vec<usize> {
    fn from(a: Assignment) -> Self {
        a.task_of
    }
}

/// Outcome classification of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// A minimum-cost bijection was found.
    Optimal,
    /// The problem is malformed (e.g. unbalanced) and admits no bijection.
    Infeasible,
}

impl SolveStatus {
    /// Classifies a solve attempt.
    ///
    /// Structural rejections (`UnbalancedProblem`, `InvalidAssignment`)
    /// map to `Infeasible`; any other error is not a statement about the
    /// problem and yields `None`.
    pub fn classify(outcome: &Result<SolveResult>) -> Option<Self> {
        match outcome {
            Ok(result) => Some(result.status),
            Err(e) if e.is_structural() => Some(Self::Infeasible),
            Err(_) => None,
        }
    }
}

/// Result of solving an assignment problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    /// The chosen bijection.
    pub assignment: Assignment,
    /// Sum of the selected cell costs.
    pub total_cost: f64,
    /// Solve status.
    pub status: SolveStatus,
}

impl SolveResult {
    /// Creates an optimal result, summing the assignment's costs from `matrix`.
    pub fn optimal(assignment: Assignment, matrix: &CostMatrix) -> Self {
        let total_cost = assignment.pairs().map(|(a, t)| matrix.get(a, t)).sum();
        Self {
            assignment,
            total_cost,
            status: SolveStatus::Optimal,
        }
    }

    /// Whether the result is optimal.
    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }
}
