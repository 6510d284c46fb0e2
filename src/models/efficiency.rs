//! Efficiency multipliers.
//!
//! An efficiency multiplier scales a task's baseline effort for one agent:
//! values below 1.0 mean the agent is faster than baseline, above 1.0 slower.
//! Absent entries are reported as missing, never defaulted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse (agent, task) → multiplier mapping.
///
/// Stored as nested maps keyed by agent ID, then task ID, so the JSON form
/// reads as `{"Anna": {"Backend": 1.1}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EfficiencyMatrix {
    entries: BTreeMap<String, BTreeMap<String, f64>>,
}

impl EfficiencyMatrix {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the multiplier for an agent-task pair.
    pub fn set(&mut self, agent: impl Into<String>, task: impl Into<String>, multiplier: f64) {
        self.entries
            .entry(agent.into())
            .or_default()
            .insert(task.into(), multiplier);
    }

    /// Builder: sets a multiplier and returns self.
    pub fn with(mut self, agent: impl Into<String>, task: impl Into<String>, multiplier: f64) -> Self {
        self.set(agent, task, multiplier);
        self
    }

    /// Sets one agent's multipliers for the given tasks, in order.
    pub fn with_row(mut self, agent: &str, tasks: &[&str], multipliers: &[f64]) -> Self {
        for (task, &m) in tasks.iter().zip(multipliers) {
            self.set(agent, *task, m);
        }
        self
    }

    /// Multiplier for a pair, if defined.
    pub fn get(&self, agent: &str, task: &str) -> Option<f64> {
        self.entries.get(agent)?.get(task).copied()
    }

    /// Number of defined pairs.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// Whether no pair is defined.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over `(agent, task, multiplier)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.entries.iter().flat_map(|(agent, row)| {
            row.iter()
                .map(move |(task, &m)| (agent.as_str(), task.as_str(), m))
        })
    }
}
