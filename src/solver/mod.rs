//! Exact assignment solvers.
//!
//! Provides the [`AssignmentSolver`] trait and two implementations:
//!
//! - [`HungarianSolver`]: shortest-augmenting-path Kuhn–Munkres with dual
//!   potentials, O(n³). The production solver.
//! - [`BruteForceSolver`]: exhaustive permutation search for n ≤ 8, used as
//!   an independent oracle in tests.
//!
//! # Contract
//!
//! - Input must be square; otherwise `UnbalancedProblem`. Solvers never pad
//!   with dummy rows or columns.
//! - The returned cost is the minimum over all n! bijections.
//! - **Tie-break**: among bijections whose cost is within tolerance of the
//!   minimum, the lexicographically smallest agent → task sequence wins.
//! - **Tolerance**: `epsilon * max(1, max |cost|)`, so comparisons scale
//!   with the magnitude of the matrix. Costs are never compared exactly.
//!
//! # References
//!
//! - Kuhn (1955), "The Hungarian Method for the Assignment Problem"
//! - Jonker & Volgenant (1987), "A Shortest Augmenting Path Algorithm for
//!   Dense and Sparse Linear Assignment Problems"
//! - Burkard, Dell'Amico & Martello (2012), "Assignment Problems", Ch. 4

mod brute_force;
mod hungarian;

pub use brute_force::{BruteForceSolver, BRUTE_FORCE_MAX_N};
pub use hungarian::HungarianSolver;

use std::fmt::Debug;

use crate::error::{AssignError, Result};
use crate::models::{CostMatrix, SolveResult};

/// Default relative tolerance for cost comparisons.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Largest relative tolerance a solver accepts.
///
/// Above this, edges far from tight would count as ties and the tie-break
/// could trade optimality for lexicographic order.
pub const MAX_EPSILON: f64 = 1e-6;

/// A solver for the balanced assignment problem.
///
/// Implementations must not mutate shared state: a solver may be used from
/// several threads at once on the same matrix.
pub trait AssignmentSolver: Send + Sync + Debug {
    /// Solver name (e.g., "hungarian").
    fn name(&self) -> &'static str;

    /// Computes a minimum-cost bijection over a square cost matrix.
    fn solve(&self, matrix: &CostMatrix) -> Result<SolveResult>;
}

/// Returns the problem size, or `UnbalancedProblem` if the matrix is not square.
pub(crate) fn ensure_balanced(matrix: &CostMatrix) -> Result<usize> {
    if matrix.is_square() {
        Ok(matrix.rows())
    } else {
        Err(AssignError::UnbalancedProblem {
            agents: matrix.rows(),
            tasks: matrix.cols(),
        })
    }
}

/// Checks that a relative tolerance is finite and within `[0, MAX_EPSILON]`.
pub fn validate_epsilon(epsilon: f64) -> Result<f64> {
    if epsilon.is_finite() && (0.0..=MAX_EPSILON).contains(&epsilon) {
        Ok(epsilon)
    } else {
        Err(AssignError::magnitude("epsilon", epsilon))
    }
}

/// Absolute tolerance for a matrix under a relative epsilon.
pub(crate) fn tolerance(epsilon: f64, matrix: &CostMatrix) -> f64 {
    epsilon * matrix.max_abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Assignment;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn random_matrix<R: Rng>(n: usize, rng: &mut R) -> CostMatrix {
        let rows = (0..n)
            .map(|_| (0..n).map(|_| rng.random_range(1.0..1000.0)).collect())
            .collect();
        CostMatrix::from_rows(rows).unwrap()
    }

    fn is_bijection(a: &Assignment, n: usize) -> bool {
        let mut seen = vec![false; n];
        a.len() == n
            && a.pairs().all(|(_, t)| t < n && !std::mem::replace(&mut seen[t], true))
    }

    #[test]
    fn test_unbalanced_rejected_by_both() {
        let m = CostMatrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let solvers: [&dyn AssignmentSolver; 2] = [&HungarianSolver::new(), &BruteForceSolver::new()];
        for solver in solvers {
            let err = solver.solve(&m).unwrap_err();
            assert!(
                matches!(err, AssignError::UnbalancedProblem { agents: 2, tasks: 3 }),
                "{}",
                solver.name()
            );
        }
    }

    #[test]
    fn test_validate_epsilon() {
        assert_eq!(validate_epsilon(0.0).unwrap(), 0.0);
        assert_eq!(validate_epsilon(MAX_EPSILON).unwrap(), MAX_EPSILON);
        for bad in [-1e-9, 1e-5, 0.9, 1.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(validate_epsilon(bad), Err(AssignError::InvalidMagnitude { ref field, .. }) if field == "epsilon"),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_hungarian_matches_brute_force_seeded() {
        let mut rng = SmallRng::seed_from_u64(42);
        let hungarian = HungarianSolver::new();
        let oracle = BruteForceSolver::new();

        for n in 1..=BRUTE_FORCE_MAX_N {
            for _ in 0..20 {
                let m = random_matrix(n, &mut rng);
                let fast = hungarian.solve(&m).unwrap();
                let slow = oracle.solve(&m).unwrap();
                assert!(
                    (fast.total_cost - slow.total_cost).abs() <= tolerance(DEFAULT_EPSILON, &m) * n as f64,
                    "n={n}: hungarian {} vs brute force {}",
                    fast.total_cost,
                    slow.total_cost
                );
                assert!(is_bijection(&fast.assignment, n));
            }
        }
    }

    #[test]
    fn test_solvers_are_shareable_across_threads() {
        let mut rng = SmallRng::seed_from_u64(7);
        let m = random_matrix(6, &mut rng);
        let solver = HungarianSolver::new();
        let baseline = solver.solve(&m).unwrap();

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| solver.solve(&m).unwrap())).collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), baseline);
            }
        });
    }

    fn square_matrix(max_n: usize, values: std::ops::Range<u32>) -> impl Strategy<Value = Vec<Vec<f64>>> {
        (1..=max_n).prop_flat_map(move |n| {
            prop::collection::vec(
                prop::collection::vec(values.clone().prop_map(f64::from), n),
                n,
            )
        })
    }

    proptest! {
        /// Optimal cost equals the brute-force minimum.
        #[test]
        fn hungarian_is_optimal(rows in square_matrix(7, 1..10_000)) {
            let m = CostMatrix::from_rows(rows).unwrap();
            let fast = HungarianSolver::new().solve(&m).unwrap();
            let slow = BruteForceSolver::new().solve(&m).unwrap();
            prop_assert!((fast.total_cost - slow.total_cost).abs() < 1e-6);
        }

        /// With heavy ties (few distinct values), both solvers pick the same
        /// lexicographically smallest optimal assignment.
        #[test]
        fn tie_break_agrees_with_oracle(rows in square_matrix(6, 1..4)) {
            let m = CostMatrix::from_rows(rows).unwrap();
            let fast = HungarianSolver::new().solve(&m).unwrap();
            let slow = BruteForceSolver::new().solve(&m).unwrap();
            prop_assert_eq!(fast.assignment, slow.assignment);
        }

        /// Every solve returns a bijection, and solving twice is identical.
        #[test]
        fn bijection_and_determinism(rows in square_matrix(8, 1..500)) {
            let n = rows.len();
            let m = CostMatrix::from_rows(rows).unwrap();
            let solver = HungarianSolver::new();
            let first = solver.solve(&m).unwrap();
            let second = solver.solve(&m).unwrap();
            prop_assert!(is_bijection(&first.assignment, n));
            prop_assert_eq!(first, second);
        }

        /// Raising one cell never lowers the optimum.
        #[test]
        fn monotone_in_each_cell(
            rows in square_matrix(6, 1..1000),
            cell in any::<prop::sample::Index>(),
            bump in 1u32..500,
        ) {
            let n = rows.len();
            let m = CostMatrix::from_rows(rows).unwrap();
            let k = cell.index(n * n);
            let (r, c) = (k / n, k % n);
            let bumped = m.with_cost(r, c, m.get(r, c) + f64::from(bump)).unwrap();

            let solver = HungarianSolver::new();
            let before = solver.solve(&m).unwrap();
            let after = solver.solve(&bumped).unwrap();
            prop_assert!(after.total_cost >= before.total_cost - 1e-6);
            if before.assignment.task_for(r) != c {
                // The old optimum is still available at the same cost.
                prop_assert!((after.total_cost - before.total_cost).abs() < 1e-6);
            }
        }
    }
}
