//! Agent model.
//!
//! Agents are the entities that perform tasks: employees, contractors,
//! machines. Each agent carries the hourly rate used to price its work.

use serde::{Deserialize, Serialize};

/// An agent that can be assigned to exactly one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique agent identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Role or job title (e.g., "Senior Developer").
    #[serde(default)]
    pub role: String,
    /// Cost per hour of work. Must be finite and positive.
    pub hourly_rate: f64,
}

impl Agent {
    /// Creates a new agent with the given hourly rate.
    pub fn new(id: impl Into<String>, hourly_rate: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            role: String::new(),
            hourly_rate,
        }
    }

    /// Sets the agent name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_builder() {
        let a = Agent::new("Anna", 180.0)
            .with_name("Anna Kowalska")
            .with_role("Senior Developer");

        assert_eq!(a.id, "Anna");
        assert_eq!(a.display_name(), "Anna Kowalska");
        assert_eq!(a.role, "Senior Developer");
        assert!((a.hourly_rate - 180.0).abs() < 1e-10);
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        assert_eq!(Agent::new("Bartek", 120.0).display_name(), "Bartek");
    }

    #[test]
    fn test_agent_deserialize_defaults() {
        let a: Agent = serde_json::from_str(r#"{"id":"Ewa","hourly_rate":100}"#).unwrap();
        assert_eq!(a.id, "Ewa");
        assert!(a.role.is_empty());
    }
}
