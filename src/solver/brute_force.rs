//! Exhaustive permutation search.
//!
//! Enumerates all n! bijections in lexicographic order and keeps the first
//! one whose cost beats the incumbent by more than the tolerance, which
//! yields the same tie-break as [`HungarianSolver`](super::HungarianSolver).
//! Only meant as a cross-check oracle for small problems.

use tracing::debug;

use super::{ensure_balanced, tolerance, validate_epsilon, AssignmentSolver, DEFAULT_EPSILON};
use crate::error::{AssignError, Result};
use crate::models::{Assignment, CostMatrix, SolveResult};

/// Largest problem size the exhaustive search accepts (8! = 40 320).
pub const BRUTE_FORCE_MAX_N: usize = 8;

/// Exhaustive O(n · n!) solver for n ≤ [`BRUTE_FORCE_MAX_N`].
#[derive(Debug, Clone)]
pub struct BruteForceSolver {
    epsilon: f64,
}

impl BruteForceSolver {
    /// Creates an oracle with the default tolerance.
    pub fn new() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
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
}

impl Default for BruteForceSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AssignmentSolver for BruteForceSolver {
    fn name(&self) -> &'static str {
        "brute-force"
    }

    fn solve(&self, matrix: &CostMatrix) -> Result<SolveResult> {
        let n = ensure_balanced(matrix)?;
        if n > BRUTE_FORCE_MAX_N {
            return Err(AssignError::ProblemTooLarge {
                size: n,
                limit: BRUTE_FORCE_MAX_N,
            });
        }

        let tol = tolerance(self.epsilon, matrix);
        let cost_of = |p: &[usize]| -> f64 { p.iter().enumerate().map(|(a, &t)| matrix.get(a, t)).sum() };

        let mut perm: Vec<usize> = (0..n).collect();
        let mut best = perm.clone();
        let mut best_cost = cost_of(perm.as_slice());
        let mut visited = 1usize;

        while next_permutation(&mut perm) {
            visited += 1;
            let c = cost_of(perm.as_slice());
            if c < best_cost - tol {
                best_cost = c;
                best.copy_from_slice(&perm);
            }
        }

        debug!(n, visited, total_cost = best_cost, "brute-force solved");
        Ok(SolveResult::optimal(Assignment::from_permutation(best)?, matrix))
    }
}

/// Advances `perm` to the next lexicographic permutation.
///
/// Returns `false` (leaving `perm` untouched) when it is already the last one.
fn next_permutation(perm: &mut [usize]) -> bool {
    let n = perm.len();
    if n < 2 {
        return false;
    }
    let mut i = n - 1;
    while i > 0 && perm[i - 1] >= perm[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = n - 1;
    while perm[j] <= perm[i - 1] {
        j -= 1;
    }
    perm.swap(i - 1, j);
    perm[i..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_permutation_order() {
        let mut p = vec![0, 1, 2];
        let mut seen = vec![p.clone()];
        while next_permutation(&mut p) {
            seen.push(p.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
    }

    #[test]
    fn test_two_by_two_example() {
        let m = CostMatrix::from_rows(vec![vec![7200.0, 15840.0], vec![7200.0, 9600.0]]).unwrap();
        let r = BruteForceSolver::new().solve(&m).unwrap();
        assert_eq!(r.assignment.as_slice(), &[0, 1]);
        assert!((r.total_cost - 16800.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_optimum_wins() {
        let m = CostMatrix::from_rows(vec![vec![1.0, 1.0], vec![1.0, 1.0]]).unwrap();
        let r = BruteForceSolver::new().solve(&m).unwrap();
        assert_eq!(r.assignment.as_slice(), &[0, 1]);
    }

    #[test]
    fn test_rejects_unusable_epsilon() {
        for bad in [f64::NAN, 0.5, -1e-9] {
            assert!(matches!(
                BruteForceSolver::new().with_epsilon(bad),
                Err(AssignError::InvalidMagnitude { .. })
            ));
        }
        let m = CostMatrix::from_rows(vec![vec![5.0, 1.0], vec![1.0, 5.0]]).unwrap();
        let r = BruteForceSolver::new().with_epsilon(0.0).unwrap().solve(&m).unwrap();
        assert_eq!(r.assignment.as_slice(), &[1, 0]);
    }

    #[test]
    fn test_too_large() {
        let n = BRUTE_FORCE_MAX_N + 1;
        let m = CostMatrix::from_rows(vec![vec![1.0; n]; n]).unwrap();
        let err = BruteForceSolver::new().solve(&m).unwrap_err();
        assert!(matches!(err, AssignError::ProblemTooLarge { size, limit } if size == n && limit == BRUTE_FORCE_MAX_N));
    }
}
