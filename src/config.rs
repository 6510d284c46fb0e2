//! Project configuration.
//!
//! A serde-friendly description of one assignment problem: rosters,
//! efficiency multipliers, an optional reference ("intuitive") staffing,
//! and solver and sensitivity settings. Where the JSON comes from (file,
//! flags, embedded constant) is the caller's business.
//!
//! ```json
//! {
//!   "agents": [{ "id": "Anna", "hourly_rate": 180 }],
//!   "tasks": [{ "id": "Backend", "base_effort_hours": 80 }],
//!   "efficiency": { "Anna": { "Backend": 1.1 } },
//!   "intuitive_assignment": [{ "agent": "Anna", "task": "Backend" }],
//!   "solver": { "epsilon": 1e-9 },
//!   "sensitivity": { "shortfall_policy": "reassign_extra_task" }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::cost::CostModel;
use crate::error::{AssignError, Result};
use crate::models::{Agent, Assignment, EfficiencyMatrix, Task};
use crate::scenario::{SensitivityRunner, ShortfallPolicy};
use crate::solver::{validate_epsilon, HungarianSolver, DEFAULT_EPSILON};

/// Full description of an assignment problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Agent roster (row order of the cost matrix).
    pub agents: Vec<Agent>,
    /// Task roster (column order of the cost matrix).
    pub tasks: Vec<Task>,
    /// Efficiency multipliers, agent → task → multiplier.
    pub efficiency: EfficiencyMatrix,
    /// Reference staffing to compare against the optimum.
    ///
    /// A list rather than a map, so an agent listed twice is reported
    /// instead of collapsing to its last entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intuitive_assignment: Option<Vec<StaffingEntry>>,
    /// Solver settings.
    #[serde(default)]
    pub solver: SolverConfig,
    /// Sensitivity-analysis settings.
    #[serde(default)]
    pub sensitivity: SensitivityConfig,
}

/// One agent-task pair of a reference staffing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingEntry {
    /// Agent ID.
    pub agent: String,
    /// Task ID.
    pub task: String,
}

/// Solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Relative tolerance for cost comparisons, at most `MAX_EPSILON`.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

/// Sensitivity-analysis settings.
///
/// With no policy configured, agent removal is left entirely to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SensitivityConfig {
    /// How to cover tasks left over after an agent is removed.
    #[serde(default)]
    pub shortfall_policy: Option<ShortfallPolicy>,
}

impl ProjectConfig {
    /// Parses a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates the rosters and efficiencies and builds the cost model.
    pub fn build_model(&self) -> Result<CostModel> {
        CostModel::new(
            self.agents.clone(),
            self.tasks.clone(),
            self.efficiency.clone(),
        )
    }

    /// Solver configured with the requested tolerance.
    ///
    /// Fails with `InvalidMagnitude { field: "solver.epsilon", .. }` unless
    /// the tolerance is finite and within `[0, MAX_EPSILON]`.
    pub fn solver(&self) -> Result<HungarianSolver> {
        let epsilon = validate_epsilon(self.solver.epsilon)
            .map_err(|_| AssignError::magnitude("solver.epsilon", self.solver.epsilon))?;
        HungarianSolver::new().with_epsilon(epsilon)
    }

    /// Sensitivity runner, if a shortfall policy is configured.
    pub fn sensitivity_runner(&self) -> Result<Option<SensitivityRunner>> {
        let solver = self.solver()?;
        Ok(self
            .sensitivity
            .shortfall_policy
            .map(|policy| SensitivityRunner::with_solver(solver, policy)))
    }

    /// Resolves the configured intuitive staffing against a model.
    pub fn intuitive_assignment(&self, model: &CostModel) -> Result<Option<Assignment>> {
        self.intuitive_assignment
            .as_ref()
            .map(|entries| model.assignment_from_ids(entries.iter().map(|e| (&e.agent, &e.task))))
            .transpose()
    }
}
