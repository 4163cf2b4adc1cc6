//! Read-only views of the matrices and vectors that group finite element sets are derived from.
//!
//! Every storage format implements [`SparseLayout`] once: it describes the matrix structure as a
//! sequence of `(column, position)` pairs per row, where the position indexes the flat value array
//! exposed by [`MatrixSource::values`]. Dimension computation, edge list generation and coefficient
//! population are written against this uniform view and never inspect a concrete format.
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::slice;

mod block;
mod csr;
mod dense;

pub use block::{BlockMatrix, BlockMatrixKind, BlockVector};
pub use csr::{DiagonalFirstCsr, SortedCsr};
pub use dense::InterleavedVector;

/// Storage format of a source matrix.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatrixFormat {
    /// Column-major dense storage, every entry is structurally present.
    Dense,
    /// Compressed rows with the diagonal entry stored first in each row,
    /// followed by the off-diagonal entries in ascending column order.
    DiagonalFirstCsr,
    /// Compressed rows with ascending column indices and an explicit diagonal index.
    SortedCsr,
}

/// Iterator over the `(column, position)` pairs of the stored entries of a row.
#[derive(Debug, Clone)]
pub enum RowEntries<'a> {
    Compressed {
        col_indices: slice::Iter<'a, usize>,
        position: usize,
    },
    Dense {
        cols: Range<usize>,
        row: usize,
        nrows: usize,
    },
}

impl<'a> RowEntries<'a> {
    /// Entries of a compressed row whose first entry is stored at `offset`.
    pub fn compressed(col_indices: &'a [usize], offset: usize) -> Self {
        Self::Compressed {
            col_indices: col_indices.iter(),
            position: offset,
        }
    }

    /// Entries of a row of a column-major dense matrix.
    pub fn dense(row: usize, nrows: usize, ncols: usize) -> Self {
        Self::Dense {
            cols: 0..ncols,
            row,
            nrows,
        }
    }
}

impl<'a> Iterator for RowEntries<'a> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            RowEntries::Compressed { col_indices, position } => {
                let col = *col_indices.next()?;
                let entry = (col, *position);
                *position += 1;
                Some(entry)
            }
            RowEntries::Dense { cols, row, nrows } => {
                let col = cols.next()?;
                Some((col, *row + col * *nrows))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            RowEntries::Compressed { col_indices, .. } => col_indices.size_hint(),
            RowEntries::Dense { cols, .. } => cols.size_hint(),
        }
    }
}

impl<'a> ExactSizeIterator for RowEntries<'a> {}

/// The structure of a source matrix.
pub trait SparseLayout {
    fn format(&self) -> MatrixFormat;

    fn nrows(&self) -> usize;

    fn ncols(&self) -> usize;

    /// Number of structurally stored entries (NA).
    fn nnz(&self) -> usize;

    /// Number of interleaved variables per equation.
    fn nvar(&self) -> usize {
        1
    }

    /// The stored entries of the given row.
    ///
    /// Panics if `row` is out of bounds.
    fn row_entries(&self, row: usize) -> RowEntries<'_>;

    /// Position of entry `(row, col)` in the value array, if it is stored.
    fn find_entry(&self, row: usize, col: usize) -> Option<usize>;

    /// Position of the diagonal entry of the given row, if it is stored.
    fn diagonal_position(&self, row: usize) -> Option<usize>;

    fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }
}

/// A matrix whose values can be copied into coefficient buffers.
pub trait MatrixSource<T>: SparseLayout {
    /// The flat value array addressed by the positions of [`SparseLayout`].
    fn values(&self) -> &[T];
}

/// The dimensions of a source vector.
pub trait VectorLayout {
    /// Number of equations.
    fn neq(&self) -> usize;

    /// Number of interleaved variables per equation.
    fn nvar(&self) -> usize {
        1
    }
}

/// Whether two matrices share format and dimensions.
pub fn same_structure<A, B>(a: &A, b: &B) -> bool
where
    A: ?Sized + SparseLayout,
    B: ?Sized + SparseLayout,
{
    a.format() == b.format()
        && a.nrows() == b.nrows()
        && a.ncols() == b.ncols()
        && a.nnz() == b.nnz()
        && a.nvar() == b.nvar()
}
