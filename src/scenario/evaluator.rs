//! Scenario evaluation: pricing candidate assignments and forced pairs.

use serde::Serialize;
use tracing::debug;

use crate::error::{AssignError, Result};
use crate::models::{Assignment, CostMatrix, SolveResult};
use crate::solver::{ensure_balanced, AssignmentSolver, HungarianSolver};

/// Total cost of a candidate assignment under a cost matrix.
///
/// Pure lookup and summation; no search.
///
/// # Errors
/// `InvalidAssignment` if the candidate's size does not match a square
/// matrix, `UnbalancedProblem` if the matrix is not square.
pub fn evaluate(matrix: &CostMatrix, candidate: &Assignment) -> Result<f64> {
    let n = ensure_balanced(matrix)?;
    if candidate.len() != n {
        return Err(AssignError::InvalidAssignment(format!(
            "candidate covers {} agents, problem has {n}",
            candidate.len()
        )));
    }
    Ok(candidate.pairs().map(|(a, t)| matrix.get(a, t)).sum())
}

/// A candidate assignment priced against the optimum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioComparison {
    /// Cost of the candidate assignment.
    pub candidate_cost: f64,
    /// Optimal solve on the same matrix.
    pub optimal: SolveResult,
    /// `candidate_cost - optimal.total_cost` (never meaningfully negative).
    pub savings: f64,
    /// `savings / candidate_cost`; 0.0 when the candidate cost is zero.
    pub savings_ratio: f64,
}

impl ScenarioComparison {
    /// Whether the candidate is itself optimal within `tolerance`.
    pub fn candidate_is_optimal(&self, tolerance: f64) -> bool {
        self.savings.abs() <= tolerance
    }
}

/// Evaluates what-if scenarios against the optimal solve.
///
/// # Example
/// ```
/// use u_assign::models::{Assignment, CostMatrix};
/// use u_assign::scenario::ScenarioEvaluator;
///
/// let m = CostMatrix::from_rows(vec![
///     vec![7200.0, 15840.0],
///     vec![7200.0, 9600.0],
/// ]).unwrap();
/// let swapped = Assignment::from_permutation(vec![1, 0]).unwrap();
///
/// let cmp = ScenarioEvaluator::new().compare(&m, &swapped).unwrap();
/// assert!((cmp.candidate_cost - 23040.0).abs() < 1e-9);
/// assert!((cmp.savings - 6240.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioEvaluator<S: AssignmentSolver = HungarianSolver> {
    solver: S,
}

impl ScenarioEvaluator<HungarianSolver> {
    /// Creates an evaluator backed by the default solver.
    pub fn new() -> Self {
        Self {
            solver: HungarianSolver::new(),
        }
    }
}

impl Default for ScenarioEvaluator<HungarianSolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AssignmentSolver> ScenarioEvaluator<S> {
    /// Creates an evaluator backed by the given solver.
    pub fn with_solver(solver: S) -> Self {
        Self { solver }
    }

    /// The underlying solver.
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Prices a candidate and compares it to the optimum.
    pub fn compare(&self, matrix: &CostMatrix, candidate: &Assignment) -> Result<ScenarioComparison> {
        let candidate_cost = evaluate(matrix, candidate)?;
        let optimal = self.solver.solve(matrix)?;
        let savings = candidate_cost - optimal.total_cost;
        let savings_ratio = if candidate_cost.abs() > f64::EPSILON {
            savings / candidate_cost
        } else {
            0.0
        };
        debug!(candidate_cost, optimal = optimal.total_cost, savings, "scenario compared");

        Ok(ScenarioComparison {
            candidate_cost,
            optimal,
            savings,
            savings_ratio,
        })
    }

    /// Best assignment subject to `agent` covering `task`.
    ///
    /// Solves the (n-1)×(n-1) minor and maps it back, so the result is the
    /// cheapest bijection containing the pinned pair.
    pub fn solve_with_forced(&self, matrix: &CostMatrix, agent: usize, task: usize) -> Result<SolveResult> {
        let n = ensure_balanced(matrix)?;
        if agent >= n || task >= n {
            return Err(AssignError::InvalidAssignment(format!(
                "forced pair ({agent}, {task}) outside {n}x{n} problem"
            )));
        }

        let rest = self.solver.solve(&matrix.minor(agent, task))?;
        let mut task_of = Vec::with_capacity(n);
        for a in 0..n {
            if a == agent {
                task_of.push(task);
                continue;
            }
            let sub_row = if a < agent { a } else { a - 1 };
            let sub_col = rest.assignment.task_for(sub_row);
            task_of.push(if sub_col < task { sub_col } else { sub_col + 1 });
        }

        let result = SolveResult::optimal(Assignment::from_permutation(task_of)?, matrix);
        debug!(agent, task, total_cost = result.total_cost, "forced pair solved");
        Ok(result)
    }

    /// [`solve_with_forced`](Self::solve_with_forced) by agent and task IDs.
    pub fn solve_with_forced_ids(&self, matrix: &CostMatrix, agent: &str, task: &str) -> Result<SolveResult> {
        let a = matrix
            .agent_index(agent)
            .ok_or_else(|| AssignError::UnknownAgent(agent.to_string()))?;
        let t = matrix
            .task_index(task)
            .ok_or_else(|| AssignError::UnknownTask(task.to_string()))?;
        self.solve_with_forced(matrix, a, t)
    }
}
