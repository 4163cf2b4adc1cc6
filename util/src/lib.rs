//! Test fixtures shared by the tests and benchmarks of the workspace.
use nalgebra_sparse::{CooMatrix, CsrMatrix};

#[macro_export]
macro_rules! assert_panics {
    ($e:expr) => {{
        use std::panic::catch_unwind;
        use std::stringify;
        let expr_string = stringify!($e);
        let result = catch_unwind(|| $e);
        if result.is_ok() {
            panic!("assert_panics!({}) failed.", expr_string);
        }
    }};
}

/// Tridiagonal `n x n` matrix whose entry `(i, j)` has the distinct value `10 * i + j + 1`.
///
/// It has `3n - 2` stored entries and `n - 1` edges.
pub fn tridiagonal_csr(n: usize) -> CsrMatrix<f64> {
    let mut coo = CooMatrix::new(n, n);
    for i in 0..n {
        let begin = i.saturating_sub(1);
        let end = usize::min(i + 2, n);
        for j in begin..end {
            coo.push(i, j, (10 * i + j + 1) as f64);
        }
    }
    CsrMatrix::from(&coo)
}

/// Five-point Laplacian on a grid of `nx x ny` nodes, numbered row by row.
pub fn laplacian_2d(nx: usize, ny: usize) -> CsrMatrix<f64> {
    let n = nx * ny;
    let mut coo = CooMatrix::new(n, n);
    for y in 0..ny {
        for x in 0..nx {
            let node = y * nx + x;
            coo.push(node, node, 4.0);
            if x > 0 {
                coo.push(node, node - 1, -1.0);
            }
            if x + 1 < nx {
                coo.push(node, node + 1, -1.0);
            }
            if y > 0 {
                coo.push(node, node - nx, -1.0);
            }
            if y + 1 < ny {
                coo.push(node, node + nx, -1.0);
            }
        }
    }
    CsrMatrix::from(&coo)
}

/// Number of edges of [`laplacian_2d`].
pub fn laplacian_2d_edge_count(nx: usize, ny: usize) -> usize {
    nx.saturating_sub(1) * ny + ny.saturating_sub(1) * nx
}
