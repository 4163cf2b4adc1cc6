//! Strategies for structurally symmetric sparse matrices and degree of freedom restrictions.
use ::proptest::collection::vec;
use ::proptest::prelude::*;
use ::proptest::sample::subsequence;
use nalgebra_sparse::{CooMatrix, CsrMatrix};
use std::cmp::max;

/// A structurally symmetric `n x n` CSR matrix with a full diagonal and the given strictly upper
/// triangular pattern, listed row by row.
///
/// Every stored entry `(i, j)` has the distinct value `i * n + j + 1`.
pub fn symmetric_csr_from_upper_pattern(n: usize, upper: &[bool]) -> CsrMatrix<f64> {
    assert_eq!(upper.len(), n * n.saturating_sub(1) / 2, "Pattern must cover the upper triangle.");
    let value = |i: usize, j: usize| (i * n + j + 1) as f64;

    let mut coo = CooMatrix::new(n, n);
    let mut pattern = upper.iter();
    for i in 0..n {
        coo.push(i, i, value(i, i));
        for j in i + 1..n {
            if pattern.next().copied().unwrap_or(false) {
                coo.push(i, j, value(i, j));
                coo.push(j, i, value(j, i));
            }
        }
    }
    CsrMatrix::from(&coo)
}

/// Structurally symmetric matrices with full diagonal and at most `max_n` rows.
pub fn symmetric_csr(max_n: usize) -> impl Strategy<Value = CsrMatrix<f64>> {
    (1..=max(1, max_n))
        .prop_flat_map(|n| (Just(n), vec(any::<bool>(), n * (n - 1) / 2)))
        .prop_map(|(n, upper)| symmetric_csr_from_upper_pattern(n, &upper))
}

/// A sorted, duplicate-free selection of the degrees of freedom `0 .. n`.
pub fn dof_subset(n: usize) -> impl Strategy<Value = Vec<usize>> {
    subsequence((0..n).collect::<Vec<_>>(), 0..=n)
}

/// A structurally symmetric matrix together with a restriction to some of its degrees of freedom.
pub fn symmetric_csr_with_dofs(max_n: usize) -> impl Strategy<Value = (CsrMatrix<f64>, Vec<usize>)> {
    symmetric_csr(max_n).prop_flat_map(|matrix| {
        let n = matrix.nrows();
        (Just(matrix), dof_subset(n))
    })
}
