//! Input validation for assignment problems.
//!
//! Checks structural integrity of the agent roster, task roster, and
//! efficiency mapping before any cost is computed. Detects:
//! - Empty rosters
//! - Duplicate IDs
//! - Non-positive or non-finite rates, efforts, and multipliers
//! - Missing efficiency entries
//!
//! Unlike [`build_cost_matrix`](crate::cost::build_cost_matrix), which stops
//! at the first problem, `validate_input` reports every issue it finds.

use crate::error::{ensure_positive, AssignError};
use crate::models::{Agent, EfficiencyMatrix, Task};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<AssignError>>;

/// Validates the input data for an assignment problem.
///
/// Checks:
/// 1. Both rosters are non-empty
/// 2. No duplicate agent IDs, no duplicate task IDs
/// 3. Every hourly rate is finite and positive
/// 4. Every base effort is finite and positive
/// 5. Every (agent, task) pair has an efficiency entry
/// 6. Every efficiency entry is finite and positive
///
/// Agent and task counts are not compared here: an unbalanced roster is a
/// valid input for sensitivity analysis and is only rejected at solve time.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(agents: &[Agent], tasks: &[Task], efficiency: &EfficiencyMatrix) -> ValidationResult {
    let mut errors = Vec::new();

    if agents.is_empty() {
        errors.push(AssignError::EmptyRoster("agent"));
    }
    if tasks.is_empty() {
        errors.push(AssignError::EmptyRoster("task"));
    }

    let mut agent_ids = HashSet::new();
    for a in agents {
        if !agent_ids.insert(a.id.as_str()) {
            errors.push(AssignError::DuplicateId {
                kind: "agent",
                id: a.id.clone(),
            });
        }
        if let Err(e) = ensure_positive(|| format!("hourly_rate[{}]", a.id), a.hourly_rate) {
            errors.push(e);
        }
    }

    let mut task_ids = HashSet::new();
    for t in tasks {
        if !task_ids.insert(t.id.as_str()) {
            errors.push(AssignError::DuplicateId {
                kind: "task",
                id: t.id.clone(),
            });
        }
        if let Err(e) = ensure_positive(
            || format!("base_effort_hours[{}]", t.id),
            t.base_effort_hours,
        ) {
            errors.push(e);
        }
    }

    // Efficiency coverage for every pair
    for a in agents {
        for t in tasks {
            match efficiency.get(&a.id, &t.id) {
                None => errors.push(AssignError::MissingCostEntry {
                    agent: a.id.clone(),
                    task: t.id.clone(),
                }),
                Some(m) => {
                    if let Err(e) =
                        ensure_positive(|| format!("efficiency[{} -> {}]", a.id, t.id), m)
                    {
                        errors.push(e);
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
