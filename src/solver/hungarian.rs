//! Shortest-augmenting-path Hungarian solver.
//!
//! # Algorithm
//!
//! 1. **Primal-dual phase.** Rows are inserted one at a time. For each new
//!    row a Dijkstra-like scan over reduced costs `c[i][j] - u[i] - v[j]`
//!    finds the cheapest augmenting path; potentials are shifted by the
//!    path's slack so reduced costs stay non-negative and matched edges
//!    stay at zero.
//! 2. **Tie-break phase.** With optimal potentials, a bijection is optimal
//!    iff it uses only *tight* edges (reduced cost within tolerance of 0).
//!    Row by row, a breadth-first search over the tight subgraph of the
//!    not-yet-fixed rows finds every task the row could take by rotating
//!    an alternating cycle; the smallest such task is taken.
//!
//! # Complexity
//! O(n³) for both phases: n row insertions with an O(n²) scan each, then n
//! breadth-first searches visiting each (row, task) pair at most once.
//!
//! # Reference
//! Burkard, Dell'Amico & Martello (2012), "Assignment Problems", Ch. 4.4

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, trace};

use super::{ensure_balanced, tolerance, validate_epsilon, AssignmentSolver, DEFAULT_EPSILON};
use crate::error::{AssignError, Result};
use crate::models::{Assignment, CostMatrix, SolveResult};

/// Exact O(n³) assignment solver with lexicographic tie-breaking.
///
/// # Example
/// ```
/// use u_assign::models::CostMatrix;
/// use u_assign::solver::{AssignmentSolver, HungarianSolver};
///
/// let m = CostMatrix::from_rows(vec![
///     vec![7200.0, 15840.0],
///     vec![7200.0, 9600.0],
/// ]).unwrap();
/// let result = HungarianSolver::new().solve(&m).unwrap();
/// assert_eq!(result.assignment.as_slice(), &[0, 1]);
/// assert!((result.total_cost - 16800.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct HungarianSolver {
    epsilon: f64,
    cancel: Option<Arc<AtomicBool>>,
}

impl HungarianSolver {
    /// Creates a solver with the default tolerance.
    pub fn new() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            cancel: None,
        }
    }

    /// Sets the relative tolerance used to decide ties.
    ///
    /// # Errors
    /// `InvalidMagnitude` unless `epsilon` is finite and within
    /// `[0, MAX_EPSILON]`.
    pub fn with_epsilon(mut self, epsilon: f64) -> Result<Self> {
        self.epsilon = validate_epsilon(epsilon)?;
        Ok(self)
    }

    /// Sets a cooperative cancellation flag, checked before each row insertion.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The configured relative tolerance.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Primal-dual phase. Returns `task_of` plus row and column potentials
    /// (index 0 of each potential vector is a sentinel).
    fn augment(&self, m: &CostMatrix, n: usize) -> Result<(Vec<usize>, Vec<f64>, Vec<f64>)> {
        let mut u = vec![0.0; n + 1];
        let mut v = vec![0.0; n + 1];
        // owner[j] = 1-based row matched to 1-based column j (0 = free)
        let mut owner = vec![0usize; n + 1];
        let mut way = vec![0usize; n + 1];

        for i in 1..=n {
            if self.is_cancelled() {
                return Err(AssignError::Cancelled);
            }

            owner[0] = i;
            let mut j0 = 0;
            let mut min_slack = vec![f64::INFINITY; n + 1];
            let mut used = vec![false; n + 1];

            loop {
                used[j0] = true;
                let i0 = owner[j0];
                let mut delta = f64::INFINITY;
                let mut j1 = 0;

                for j in 1..=n {
                    if used[j] {
                        continue;
                    }
                    let reduced = m.get(i0 - 1, j - 1) - u[i0] - v[j];
                    if reduced < min_slack[j] {
                        min_slack[j] = reduced;
                        way[j] = j0;
                    }
                    if min_slack[j] < delta {
                        delta = min_slack[j];
                        j1 = j;
                    }
                }

                // Only an overflowed cost or potential leaves no finite slack
                if !delta.is_finite() {
                    return Err(AssignError::magnitude(format!("reduced cost[row {}]", i0 - 1), delta));
                }

                for j in 0..=n {
                    if used[j] {
                        u[owner[j]] += delta;
                        v[j] -= delta;
                    } else {
                        min_slack[j] -= delta;
                    }
                }

                j0 = j1;
                if owner[j0] == 0 {
                    break;
                }
            }

            // Flip the augmenting path back to the root
            loop {
                let j1 = way[j0];
                owner[j0] = owner[j1];
                j0 = j1;
                if j0 == 0 {
                    break;
                }
            }
            trace!(row = i - 1, "row inserted");
        }

        let mut task_of = vec![0usize; n];
        for j in 1..=n {
            task_of[owner[j] - 1] = j - 1;
        }
        Ok((task_of, u, v))
    }

    /// Tie-break phase: rotates `task_of` to the lexicographically smallest
    /// bijection within the tight subgraph. Returns the number of rotations.
    fn lexicographic_min(
        &self,
        m: &CostMatrix,
        task_of: &mut [usize],
        u: &[f64],
        v: &[f64],
    ) -> usize {
        let n = task_of.len();
        let tol = tolerance(self.epsilon, m);
        let tight = |r: usize, t: usize| m.get(r, t) - u[r + 1] - v[t + 1] <= tol;
        let mut rotations = 0;

        for i in 0..n {
            let start = task_of[i];
            // parent[t] = (row giving up t, task that row moves to)
            let mut parent: Vec<Option<(usize, usize)>> = vec![None; n];
            let mut row_seen = vec![false; n];
            let mut queue = VecDeque::from([start]);
            let mut best = start;

            while let Some(t) = queue.pop_front() {
                if t < best && tight(i, t) {
                    best = t;
                }
                for r in (i + 1)..n {
                    if row_seen[r] || !tight(r, t) {
                        continue;
                    }
                    row_seen[r] = true;
                    let held = task_of[r];
                    parent[held] = Some((r, t));
                    queue.push_back(held);
                }
            }

            if best == start {
                continue;
            }

            let mut t = best;
            while t != start {
                let Some((r, next)) = parent[t] else { break };
                task_of[r] = next;
                t = next;
            }
            task_of[i] = best;
            rotations += 1;
            trace!(row = i, from = start, to = best, "tie rotated");
        }

        rotations
    }
}

impl Default for HungarianSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AssignmentSolver for HungarianSolver {
    fn name(&self) -> &'static str {
        "hungarian"
    }

    fn solve(&self, matrix: &CostMatrix) -> Result<SolveResult> {
        let n = ensure_balanced(matrix)?;
        debug!(n, epsilon = self.epsilon, "hungarian solve");

        let (mut task_of, u, v) = self.augment(matrix, n)?;
        let rotations = self.lexicographic_min(matrix, &mut task_of, &u, &v);

        let result = SolveResult::optimal(Assignment::from_permutation(task_of)?, matrix);
        debug!(n, rotations, total_cost = result.total_cost, "hungarian solved");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(rows: Vec<Vec<f64>>) -> SolveResult {
        HungarianSolver::new()
            .solve(&CostMatrix::from_rows(rows).unwrap())
            .unwrap()
    }

    #[test]
    fn test_two_by_two_example() {
        let r = solve(vec![vec![7200.0, 15840.0], vec![7200.0, 9600.0]]);
        assert_eq!(r.assignment.as_slice(), &[0, 1]);
        assert!((r.total_cost - 16800.0).abs() < 1e-9);
        assert!(r.is_optimal());
    }

    #[test]
    fn test_classic_three_by_three() {
        // Optimum: 0→1 (1), 1→0 (2), 2→2 (2) = 5
        let r = solve(vec![
            vec![4.0, 1.0, 3.0],
            vec![2.0, 0.5, 5.0],
            vec![3.0, 2.0, 2.0],
        ]);
        assert_eq!(r.assignment.as_slice(), &[1, 0, 2]);
        assert!((r.total_cost - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric_tie_prefers_identity() {
        // A uniform 2x2 has two optima; the identity is lexicographically first.
        for _ in 0..10 {
            let r = solve(vec![vec![5.0, 5.0], vec![5.0, 5.0]]);
            assert_eq!(r.assignment.as_slice(), &[0, 1]);
        }
        let r = solve(vec![vec![3.0, 7.0], vec![7.0, 3.0]]);
        assert_eq!(r.assignment.as_slice(), &[0, 1]);
        let r = solve(vec![vec![7.0, 3.0], vec![3.0, 7.0]]);
        assert_eq!(r.assignment.as_slice(), &[1, 0]);
    }

    #[test]
    fn test_tie_break_needs_rotation() {
        // The primal-dual phase lands on [1, 0, 2]; [0, 1, 2] costs the same.
        let r = solve(vec![
            vec![3.0, 2.0, 4.0],
            vec![2.0, 1.0, 3.0],
            vec![2.0, 4.0, 3.0],
        ]);
        assert!((r.total_cost - 7.0).abs() < 1e-9);
        assert_eq!(r.assignment.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_uniform_matrix_is_identity() {
        let r = solve(vec![vec![4.0; 5]; 5]);
        assert_eq!(r.assignment.as_slice(), &[0, 1, 2, 3, 4]);
        assert!((r.total_cost - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_near_ties_within_tolerance() {
        // Off-diagonal optimum is cheaper by far less than the tolerance.
        let big = 1.0e6;
        let r = solve(vec![vec![big, big - 1e-9], vec![big - 1e-9, big]]);
        assert_eq!(r.assignment.as_slice(), &[0, 1]);
    }

    #[test]
    fn test_negative_and_zero_costs() {
        let r = solve(vec![vec![0.0, -5.0], vec![-5.0, 0.0]]);
        assert_eq!(r.assignment.as_slice(), &[1, 0]);
        assert!((r.total_cost + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_and_empty() {
        let r = solve(vec![vec![42.0]]);
        assert_eq!(r.assignment.as_slice(), &[0]);
        assert!((r.total_cost - 42.0).abs() < 1e-9);

        let r = solve(Vec::new());
        assert!(r.assignment.is_empty());
        assert_eq!(r.total_cost, 0.0);
    }

    #[test]
    fn test_does_not_mutate_input() {
        let m = CostMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let before = m.clone();
        HungarianSolver::new().solve(&m).unwrap();
        assert_eq!(m, before);
    }

    #[test]
    fn test_cancelled() {
        let flag = Arc::new(AtomicBool::new(true));
        let solver = HungarianSolver::new().with_cancel_flag(flag.clone());
        let m = CostMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert!(matches!(solver.solve(&m), Err(AssignError::Cancelled)));

        flag.store(false, Ordering::Relaxed);
        assert!(solver.solve(&m).is_ok());
    }

    #[test]
    fn test_with_epsilon() {
        let s = HungarianSolver::new().with_epsilon(1e-7).unwrap();
        assert!((s.epsilon() - 1e-7).abs() < 1e-18);

        for bad in [-1e-6, 1.0, f64::NAN] {
            assert!(matches!(
                HungarianSolver::new().with_epsilon(bad),
                Err(AssignError::InvalidMagnitude { .. })
            ));
        }
    }

    #[test]
    fn test_largest_epsilon_keeps_optimum() {
        let m = CostMatrix::from_rows(vec![vec![5.0, 1.0], vec![1.0, 5.0]]).unwrap();
        let r = HungarianSolver::new()
            .with_epsilon(crate::solver::MAX_EPSILON)
            .unwrap()
            .solve(&m)
            .unwrap();
        assert_eq!(r.assignment.as_slice(), &[1, 0]);
        assert!((r.total_cost - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_costs_fail_instead_of_looping() {
        let ids = || vec!["a".to_string(), "b".to_string()];
        let m = CostMatrix::from_parts(ids(), ids(), vec![f64::INFINITY; 4]);
        let err = HungarianSolver::new().solve(&m).unwrap_err();
        assert!(matches!(err, AssignError::InvalidMagnitude { .. }));

        let m = CostMatrix::from_parts(ids(), ids(), vec![1.0, f64::NAN, f64::NAN, f64::NAN]);
        assert!(HungarianSolver::new().solve(&m).is_err());
    }

    #[test]
    fn test_larger_instance_is_permutation() {
        let n = 40;
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| (0..n).map(|j| ((i * 37 + j * 11) % 97 + 1) as f64).collect())
            .collect();
        let r = solve(rows);
        let mut seen = r.assignment.as_slice().to_vec();
        seen.sort_unstable();
        assert_eq!(seen, (0..n).collect::<Vec<_>>());
    }
}
