//! Shared test data: the two-person example and the six-person IT project.

use crate::cost::CostModel;
use crate::models::{Agent, EfficiencyMatrix, Task};

pub(crate) const AGENTS: [(&str, &str, f64); 6] = [
    ("Anna", "Senior Developer", 180.0),
    ("Bartek", "Mid Developer", 120.0),
    ("Celina", "Junior Developer", 80.0),
    ("Dawid", "DevOps Engineer", 150.0),
    ("Ewa", "QA Engineer", 100.0),
    ("Filip", "UI/UX Designer", 130.0),
];

pub(crate) const TASKS: [(&str, &str, f64); 6] = [
    ("Architektura", "Architektura systemu", 40.0),
    ("Backend", "Backend API", 80.0),
    ("Frontend", "Frontend aplikacji", 60.0),
    ("BazaDanych", "Baza danych", 30.0),
    ("Testy", "Testy automatyczne", 50.0),
    ("CICD", "Wdrozenie CI/CD", 25.0),
];

pub(crate) const EFFICIENCY: [[f64; 6]; 6] = [
    [1.0, 1.1, 1.5, 1.2, 1.8, 1.4],
    [1.5, 1.0, 1.3, 1.1, 1.6, 1.5],
    [2.5, 1.4, 1.0, 1.8, 1.4, 2.0],
    [1.3, 1.5, 2.0, 1.0, 1.5, 1.0],
    [2.0, 1.8, 1.6, 1.7, 1.0, 1.6],
    [2.2, 2.0, 1.1, 2.2, 1.9, 1.8],
];

/// Role-intuitive staffing: each person on the work their title suggests.
pub(crate) const INTUITIVE: [(&str, &str); 6] = [
    ("Anna", "Architektura"),
    ("Bartek", "Backend"),
    ("Celina", "Frontend"),
    ("Dawid", "CICD"),
    ("Ewa", "Testy"),
    ("Filip", "BazaDanych"),
];

pub(crate) const IT_PROJECT_OPTIMUM: f64 = 36950.0;
pub(crate) const INTUITIVE_COST: f64 = 38930.0;

pub(crate) fn two_by_two() -> (Vec<Agent>, Vec<Task>, EfficiencyMatrix) {
    let agents = vec![Agent::new("Anna", 180.0), Agent::new("Bartek", 120.0)];
    let tasks = vec![Task::new("Architektura", 40.0), Task::new("Backend", 80.0)];
    let eff = EfficiencyMatrix::new()
        .with_row("Anna", &["Architektura", "Backend"], &[1.0, 1.1])
        .with_row("Bartek", &["Architektura", "Backend"], &[1.5, 1.0]);
    (agents, tasks, eff)
}

pub(crate) fn it_project_parts() -> (Vec<Agent>, Vec<Task>, EfficiencyMatrix) {
    let agents = AGENTS
        .iter()
        .map(|&(id, role, rate)| Agent::new(id, rate).with_role(role))
        .collect();
    let tasks = TASKS
        .iter()
        .map(|&(id, name, hours)| Task::new(id, hours).with_name(name))
        .collect();
    let task_ids: Vec<&str> = TASKS.iter().map(|t| t.0).collect();
    let eff = AGENTS
        .iter()
        .zip(EFFICIENCY.iter())
        .fold(EfficiencyMatrix::new(), |e, (agent, row)| {
            e.with_row(agent.0, &task_ids, row)
        });
    (agents, tasks, eff)
}

pub(crate) fn it_project() -> CostModel {
    let (agents, tasks, eff) = it_project_parts();
    CostModel::new(agents, tasks, eff).unwrap()
}
