//! Cost model.
//!
//! Prices every agent-task pair as
//!
//! ```text
//! cost[a][t] = hourly_rate[a] * base_effort_hours[t] * efficiency[a][t]
//! ```
//!
//! and freezes the result, together with the rosters it came from, into an
//! immutable [`CostModel`] snapshot. Validation happens once, at
//! construction; every later lookup is infallible or reports an unknown ID.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{ensure_finite, AssignError, Result};
use crate::models::{Agent, Assignment, CostMatrix, EfficiencyMatrix, Task};
use crate::validation::validate_input;

/// Builds the agents × tasks cost matrix.
///
/// Rows follow the order of `agents`, columns the order of `tasks`.
///
/// # Errors
/// - `EmptyRoster` if either roster is empty
/// - `DuplicateId` if an ID repeats within a roster
/// - `InvalidMagnitude` for a rate, effort, or multiplier that is ≤ 0 or non-finite
/// - `MissingCostEntry` if a pair has no efficiency entry
/// - `InvalidMagnitude` if a product of valid factors overflows
///
/// Reports the first problem [`validate_input`] finds; call it directly
/// for a complete report.
///
/// # Example
/// ```
/// use u_assign::cost::build_cost_matrix;
/// use u_assign::models::{Agent, EfficiencyMatrix, Task};
///
/// let agents = vec![Agent::new("Anna", 180.0), Agent::new("Bartek", 120.0)];
/// let tasks = vec![Task::new("Architektura", 40.0), Task::new("Backend", 80.0)];
/// let efficiency = EfficiencyMatrix::new()
///     .with_row("Anna", &["Architektura", "Backend"], &[1.0, 1.1])
///     .with_row("Bartek", &["Architektura", "Backend"], &[1.5, 1.0]);
///
/// let matrix = build_cost_matrix(&agents, &tasks, &efficiency).unwrap();
/// assert!((matrix.get(1, 1) - 9600.0).abs() < 1e-9);
/// ```
pub fn build_cost_matrix(agents: &[Agent], tasks: &[Task], efficiency: &EfficiencyMatrix) -> Result<CostMatrix> {
    validate_input(agents, tasks, efficiency).map_err(|mut errors| errors.swap_remove(0))?;

    let mut costs = Vec::with_capacity(agents.len() * tasks.len());
    for a in agents {
        for t in tasks {
            let m = efficiency
                .get(&a.id, &t.id)
                .ok_or_else(|| AssignError::MissingCostEntry {
                    agent: a.id.clone(),
                    task: t.id.clone(),
                })?;
            let cost = a.hourly_rate * t.effort_for(m);
            ensure_finite(|| format!("cost[{} -> {}]", a.id, t.id), cost)?;
            costs.push(cost);
        }
    }

    Ok(CostMatrix::from_parts(
        agents.iter().map(|a| a.id.clone()).collect(),
        tasks.iter().map(|t| t.id.clone()).collect(),
        costs,
    ))
}

/// Immutable snapshot of a validated problem: rosters, efficiencies, and
/// the derived cost matrix.
///
/// The matrix is computed once in [`CostModel::new`]; to change any input,
/// build a new model.
#[derive(Debug, Clone)]
pub struct CostModel {
    agents: Vec<Agent>,
    tasks: Vec<Task>,
    efficiency: EfficiencyMatrix,
    matrix: CostMatrix,
    agent_index: HashMap<String, usize>,
    task_index: HashMap<String, usize>,
}

impl CostModel {
    /// Validates the inputs and computes the cost matrix.
    pub fn new(agents: Vec<Agent>, tasks: Vec<Task>, efficiency: EfficiencyMatrix) -> Result<Self> {
        let matrix = build_cost_matrix(&agents, &tasks, &efficiency)?;
        debug!(
            agents = agents.len(),
            tasks = tasks.len(),
            "cost model built"
        );

        let agent_index = agents
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.clone(), i))
            .collect();
        let task_index = tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();

        Ok(Self {
            agents,
            tasks,
            efficiency,
            matrix,
            agent_index,
            task_index,
        })
    }

    /// Agent roster, in row order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Task roster, in column order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Efficiency multipliers the matrix was built from.
    pub fn efficiency(&self) -> &EfficiencyMatrix {
        &self.efficiency
    }

    /// The derived cost matrix.
    pub fn cost_matrix(&self) -> &CostMatrix {
        &self.matrix
    }

    /// Whether agent count equals task count.
    pub fn is_balanced(&self) -> bool {
        self.matrix.is_square()
    }

    /// Row index of an agent.
    pub fn agent_index(&self, id: &str) -> Result<usize> {
        self.agent_index
            .get(id)
            .copied()
            .ok_or_else(|| AssignError::UnknownAgent(id.to_string()))
    }

    /// Column index of a task.
    pub fn task_index(&self, id: &str) -> Result<usize> {
        self.task_index
            .get(id)
            .copied()
            .ok_or_else(|| AssignError::UnknownTask(id.to_string()))
    }

    /// Agent by row index.
    pub fn agent(&self, index: usize) -> Option<&Agent> {
        self.agents.get(index)
    }

    /// Task by column index.
    pub fn task(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Cost of one pair by IDs.
    pub fn cost(&self, agent: &str, task: &str) -> Result<f64> {
        Ok(self.matrix.get(self.agent_index(agent)?, self.task_index(task)?))
    }

    /// Estimated hours for an agent on a task (base effort × efficiency).
    pub fn estimated_hours(&self, agent: usize, task: usize) -> Option<f64> {
        let a = self.agents.get(agent)?;
        let t = self.tasks.get(task)?;
        let m = self.efficiency.get(&a.id, &t.id)?;
        Some(t.effort_for(m))
    }

    /// Builds an assignment from `(agent ID, task ID)` pairs.
    ///
    /// Fails with `UnknownAgent`/`UnknownTask` for unrecognised IDs and with
    /// `InvalidAssignment` if the pairs do not form a bijection (including
    /// when the problem itself is unbalanced).
    pub fn assignment_from_ids<A, T>(&self, pairs: impl IntoIterator<Item = (A, T)>) -> Result<Assignment>
    where
        A: AsRef<str>,
        T: AsRef<str>,
    {
        if !self.is_balanced() {
            return Err(AssignError::InvalidAssignment(format!(
                "{} agents cannot be mapped one-to-one onto {} tasks",
                self.agents.len(),
                self.tasks.len()
            )));
        }
        let indexed = pairs
            .into_iter()
            .map(|(a, t)| -> Result<(usize, usize)> {
                Ok((self.agent_index(a.as_ref())?, self.task_index(t.as_ref())?))
            })
            .collect::<Result<Vec<_>>>()?;
        Assignment::from_pairs(self.agents.len(), &indexed)
    }
}
