//! Task model.
//!
//! A task is a unit of project work with a baseline effort. The effort an
//! individual agent actually spends is the baseline scaled by that agent's
//! efficiency multiplier for the task.

use serde::{Deserialize, Serialize};

/// A task to be covered by exactly one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Baseline effort in hours. Must be finite and positive.
    pub base_effort_hours: f64,
}

impl Task {
    /// Creates a new task with the given baseline effort.
    pub fn new(id: impl Into<String>, base_effort_hours: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            base_effort_hours,
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Name if set, otherwise the ID.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Effort in hours for an agent with the given efficiency multiplier.
    #[inline]
    pub fn effort_for(&self, efficiency: f64) -> f64 {
        self.base_effort_hours * efficiency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let t = Task::new("Backend", 80.0).with_name("Backend API");
        assert_eq!(t.id, "Backend");
        assert_eq!(t.display_name(), "Backend API");
        assert!((t.base_effort_hours - 80.0).abs() < 1e-10);
    }

    #[test]
    fn test_effort_for() {
        let t = Task::new("Architektura", 40.0);
        assert!((t.effort_for(1.5) - 60.0).abs() < 1e-10);
        assert!((t.effort_for(0.5) - 20.0).abs() < 1e-10);
    }
}
