//! Agent-removal sensitivity analysis.
//!
//! Removing an agent from an n × n problem leaves (n-1) × n: one task can
//! no longer be covered one-to-one. The runner never pads the matrix with a
//! phantom agent and never picks who absorbs the extra work. It reports the
//! shortfall under the policy its caller configured.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AssignError, Result};
use crate::models::{CostMatrix, SolveResult, SolveStatus};
use crate::solver::{AssignmentSolver, HungarianSolver};

/// How the caller intends to cover tasks left without an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortfallPolicy {
    /// A remaining agent takes on a second task (e.g. overtime).
    ReassignExtraTask,
    /// An outside agent (contractor) must be sourced.
    RequiresExternalResource,
}

/// Structural gap between agent and task counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    /// Agents remaining.
    pub agents: usize,
    /// Tasks to cover.
    pub tasks: usize,
    /// Tasks that cannot be covered one-to-one.
    pub tasks_unassignable: usize,
    /// Agents left without a task.
    pub agents_idle: usize,
    /// Status the solver reported on the reduced problem.
    pub status: SolveStatus,
}

impl Shortfall {
    fn new(matrix: &CostMatrix, status: SolveStatus) -> Self {
        Self {
            agents: matrix.rows(),
            tasks: matrix.cols(),
            tasks_unassignable: matrix.cols().saturating_sub(matrix.rows()),
            agents_idle: matrix.rows().saturating_sub(matrix.cols()),
            status,
        }
    }
}

/// Consequence of removing an agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RemovalOutcome {
    /// The reduced problem is balanced again and was re-solved.
    Rebalanced(SolveResult),
    /// Tasks are left over; a remaining agent must absorb them.
    ReassignExtraTask(Shortfall),
    /// Tasks are left over; an outside agent must be sourced.
    RequiresExternalResource(Shortfall),
    /// More agents than tasks remain; some agents go idle.
    SurplusAgents(Shortfall),
}

impl RemovalOutcome {
    /// The structural gap, if the reduced problem is unbalanced.
    pub fn shortfall(&self) -> Option<&Shortfall> {
        match self {
            Self::Rebalanced(_) => None,
            Self::ReassignExtraTask(s)
            | Self::RequiresExternalResource(s)
            | Self::SurplusAgents(s) => Some(s),
        }
    }
}

/// Report for one removed agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemovalReport {
    /// ID of the removed agent.
    pub removed_agent: String,
    /// Cost matrix without the agent's row.
    pub reduced: CostMatrix,
    /// What the removal means for the staffing plan.
    pub outcome: RemovalOutcome,
}

/// Re-runs the problem with agents removed.
///
/// # Example
/// ```
/// use u_assign::models::CostMatrix;
/// use u_assign::scenario::{RemovalOutcome, SensitivityRunner, ShortfallPolicy};
///
/// let m = CostMatrix::from_rows(vec![
///     vec![7200.0, 15840.0],
///     vec![7200.0, 9600.0],
/// ]).unwrap();
/// let runner = SensitivityRunner::new(ShortfallPolicy::RequiresExternalResource);
/// let report = runner.remove_agent(&m, "a0").unwrap();
///
/// match report.outcome {
///     RemovalOutcome::RequiresExternalResource(s) => assert_eq!(s.tasks_unassignable, 1),
///     other => panic!("unexpected outcome: {other:?}"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SensitivityRunner<S: AssignmentSolver = HungarianSolver> {
    solver: S,
    policy: ShortfallPolicy,
}

impl SensitivityRunner<HungarianSolver> {
    /// Creates a runner with the default solver and the caller's policy.
    pub fn new(policy: ShortfallPolicy) -> Self {
        Self::with_solver(HungarianSolver::new(), policy)
    }
}

impl<S: AssignmentSolver> SensitivityRunner<S> {
    /// Creates a runner backed by the given solver.
    pub fn with_solver(solver: S, policy: ShortfallPolicy) -> Self {
        Self { solver, policy }
    }

    /// The configured shortfall policy.
    pub fn policy(&self) -> ShortfallPolicy {
        self.policy
    }

    /// Removes an agent by ID and reports the consequence.
    pub fn remove_agent(&self, matrix: &CostMatrix, agent_id: &str) -> Result<RemovalReport> {
        let index = matrix
            .agent_index(agent_id)
            .ok_or_else(|| AssignError::UnknownAgent(agent_id.to_string()))?;
        self.remove_agent_at(matrix, index)
    }

    /// Removes the agent at row `index` and reports the consequence.
    ///
    /// The solver is probed on the reduced matrix. If it is square the
    /// result is the new optimum; if the solver rejects it structurally the
    /// shortfall is reported under the configured policy. Any other solver
    /// error (e.g. cancellation) propagates.
    pub fn remove_agent_at(&self, matrix: &CostMatrix, index: usize) -> Result<RemovalReport> {
        let removed_agent = matrix
            .agent_ids()
            .get(index)
            .cloned()
            .ok_or_else(|| AssignError::UnknownAgent(format!("#{index}")))?;
        let reduced = matrix.without_agent(index);

        let probe = self.solver.solve(&reduced);
        let outcome = match (SolveStatus::classify(&probe), probe) {
            (_, Ok(result)) => RemovalOutcome::Rebalanced(result),
            (Some(status), Err(_)) => self.resolve(Shortfall::new(&reduced, status)),
            (None, Err(e)) => return Err(e),
        };

        debug!(
            agent = %removed_agent,
            agents = reduced.rows(),
            tasks = reduced.cols(),
            rebalanced = matches!(outcome, RemovalOutcome::Rebalanced(_)),
            "agent removed"
        );

        Ok(RemovalReport {
            removed_agent,
            reduced,
            outcome,
        })
    }

    /// One report per agent, each from its own reduced matrix.
    pub fn sweep(&self, matrix: &CostMatrix) -> Result<Vec<RemovalReport>> {
        (0..matrix.rows())
            .map(|i| self.remove_agent_at(matrix, i))
            .collect()
    }

    fn resolve(&self, shortfall: Shortfall) -> RemovalOutcome {
        if shortfall.tasks_unassignable == 0 {
            return RemovalOutcome::SurplusAgents(shortfall);
        }
        match self.policy {
            ShortfallPolicy::ReassignExtraTask => RemovalOutcome::ReassignExtraTask(shortfall),
            ShortfallPolicy::RequiresExternalResource => {
                RemovalOutcome::RequiresExternalResource(shortfall)
            }
        }
    }
}
