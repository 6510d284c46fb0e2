//! Cost matrix.
//!
//! A read-only, row-major table of assignment costs: rows are agents,
//! columns are tasks. Rows and columns carry the roster IDs they were
//! built from so results can be mapped back to domain entities.
//!
//! Derived matrices (an agent removed, a pair pinned, one cell perturbed)
//! are new values; an existing matrix is never mutated.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{ensure_finite, AssignError, Result};

/// Agents × tasks cost table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostMatrix {
    agent_ids: Vec<String>,
    task_ids: Vec<String>,
    /// Row-major costs, `agent_ids.len() * task_ids.len()` entries.
    costs: Vec<f64>,
}

impl CostMatrix {
    /// Builds a labelled matrix from rows of costs.
    ///
    /// Fails with `DuplicateId` if a label repeats, `ShapeMismatch` if the
    /// rows disagree with the labels, and `InvalidMagnitude` if a cost is
    /// non-finite. Zero and negative costs are accepted; only the cost
    /// model requires positive inputs.
    pub fn from_labeled_rows(
        agent_ids: Vec<String>,
        task_ids: Vec<String>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self> {
        ensure_unique_labels("agent", &agent_ids)?;
        ensure_unique_labels("task", &task_ids)?;
        if rows.len() != agent_ids.len() {
            return Err(AssignError::ShapeMismatch {
                what: "row count".into(),
                expected: agent_ids.len(),
                found: rows.len(),
            });
        }
        let cols = task_ids.len();
        let mut costs = Vec::with_capacity(rows.len() * cols);
        for (agent, row) in agent_ids.iter().zip(&rows) {
            if row.len() != cols {
                return Err(AssignError::ShapeMismatch {
                    what: format!("row length[{agent}]"),
                    expected: cols,
                    found: row.len(),
                });
            }
            for (task, &c) in task_ids.iter().zip(row) {
                ensure_finite(|| format!("cost[{agent} -> {task}]"), c)?;
                costs.push(c);
            }
        }
        Ok(Self {
            agent_ids,
            task_ids,
            costs,
        })
    }

    /// Builds a matrix from raw rows, labelling agents `a0, a1, ...` and
    /// tasks `t0, t1, ...`.
    ///
    /// The column count is taken from the first row.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let agent_ids = (0..rows.len()).map(|i| format!("a{i}")).collect();
        let task_ids = (0..cols).map(|j| format!("t{j}")).collect();
        Self::from_labeled_rows(agent_ids, task_ids, rows)
    }

    /// Internal constructor for already-validated data.
    pub(crate) fn from_parts(agent_ids: Vec<String>, task_ids: Vec<String>, costs: Vec<f64>) -> Self {
        debug_assert_eq!(costs.len(), agent_ids.len() * task_ids.len());
        Self {
            agent_ids,
            task_ids,
            costs,
        }
    }

    /// Number of agents (rows).
    #[inline]
    pub fn rows(&self) -> usize {
        self.agent_ids.len()
    }

    /// Number of tasks (columns).
    #[inline]
    pub fn cols(&self) -> usize {
        self.task_ids.len()
    }

    /// Whether agent count equals task count.
    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Cost of assigning agent row `agent` to task column `task`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, agent: usize, task: usize) -> f64 {
        assert!(task < self.cols(), "task index {task} out of range");
        self.costs[agent * self.cols() + task]
    }

    /// One agent's costs across all tasks.
    pub fn row(&self, agent: usize) -> &[f64] {
        let cols = self.cols();
        &self.costs[agent * cols..(agent + 1) * cols]
    }

    /// Row labels.
    pub fn agent_ids(&self) -> &[String] {
        &self.agent_ids
    }

    /// Column labels.
    pub fn task_ids(&self) -> &[String] {
        &self.task_ids
    }

    /// Row index of an agent ID.
    pub fn agent_index(&self, id: &str) -> Option<usize> {
        self.agent_ids.iter().position(|a| a == id)
    }

    /// Column index of a task ID.
    pub fn task_index(&self, id: &str) -> Option<usize> {
        self.task_ids.iter().position(|t| t == id)
    }

    /// Largest absolute cost (0.0 for an empty matrix).
    pub fn max_abs(&self) -> f64 {
        self.costs.iter().fold(0.0_f64, |m, c| m.max(c.abs()))
    }

    /// Copy of the matrix with one agent row removed.
    pub fn without_agent(&self, agent: usize) -> Self {
        let mut agent_ids = self.agent_ids.clone();
        agent_ids.remove(agent);
        let costs = (0..self.rows())
            .filter(|&r| r != agent)
            .flat_map(|r| self.row(r).iter().copied())
            .collect();
        Self::from_parts(agent_ids, self.task_ids.clone(), costs)
    }

    /// Copy of the matrix with one agent row and one task column removed.
    pub fn minor(&self, agent: usize, task: usize) -> Self {
        let mut agent_ids = self.agent_ids.clone();
        agent_ids.remove(agent);
        let mut task_ids = self.task_ids.clone();
        task_ids.remove(task);
        let costs = (0..self.rows())
            .filter(|&r| r != agent)
            .flat_map(|r| {
                self.row(r)
                    .iter()
                    .enumerate()
                    .filter(|&(c, _)| c != task)
                    .map(|(_, &v)| v)
            })
            .collect();
        Self::from_parts(agent_ids, task_ids, costs)
    }

    /// Copy of the matrix with a single cell replaced.
    pub fn with_cost(&self, agent: usize, task: usize, cost: f64) -> Result<Self> {
        if agent >= self.rows() || task >= self.cols() {
            return Err(AssignError::InvalidAssignment(format!(
                "cell ({agent}, {task}) outside {}x{} matrix",
                self.rows(),
                self.cols()
            )));
        }
        ensure_finite(
            || format!("cost[{} -> {}]", self.agent_ids[agent], self.task_ids[task]),
            cost,
        )?;
        let mut costs = self.costs.clone();
        costs[agent * self.cols() + task] = cost;
        Ok(Self::from_parts(
            self.agent_ids.clone(),
            self.task_ids.clone(),
            costs,
        ))
    }
}

fn ensure_unique_labels(kind: &'static str, ids: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    match ids.iter().find(|id| !seen.insert(id.as_str())) {
        Some(id) => Err(AssignError::DuplicateId {
            kind,
            id: id.clone(),
        }),
        None => Ok(()),
    }
}
