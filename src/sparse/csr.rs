use crate::error::GroupFemError;
use crate::sparse::{MatrixFormat, MatrixSource, RowEntries, SparseLayout};
use itertools::izip;
use nalgebra::Scalar;
use nalgebra_sparse::CsrMatrix;

/// A CSR matrix with sorted column indices and an explicit index of diagonal positions.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedCsr<T> {
    csr: CsrMatrix<T>,
    diagonal: Vec<Option<usize>>,
}

impl<T> SortedCsr<T> {
    pub fn csr(&self) -> &CsrMatrix<T> {
        &self.csr
    }

    pub fn into_csr(self) -> CsrMatrix<T> {
        self.csr
    }

    /// Mutable access to the values; the structure (and therefore the diagonal index) is fixed.
    pub fn values_mut(&mut self) -> &mut [T] {
        self.csr.values_mut()
    }

    pub fn diagonal_positions(&self) -> &[Option<usize>] {
        &self.diagonal
    }
}

impl<T> From<CsrMatrix<T>> for SortedCsr<T> {
    fn from(csr: CsrMatrix<T>) -> Self {
        let offsets = csr.row_offsets();
        let col_indices = csr.col_indices();
        let diagonal = (0..csr.nrows())
            .map(|row| {
                let begin = offsets[row];
                let end = offsets[row + 1];
                col_indices[begin..end]
                    .binary_search(&row)
                    .ok()
                    .map(|local| begin + local)
            })
            .collect();
        Self { csr, diagonal }
    }
}

impl<T> SparseLayout for SortedCsr<T> {
    fn format(&self) -> MatrixFormat {
        MatrixFormat::SortedCsr
    }

    fn nrows(&self) -> usize {
        self.csr.nrows()
    }

    fn ncols(&self) -> usize {
        self.csr.ncols()
    }

    fn nnz(&self) -> usize {
        self.csr.nnz()
    }

    fn row_entries(&self, row: usize) -> RowEntries<'_> {
        let offsets = self.csr.row_offsets();
        let (begin, end) = (offsets[row], offsets[row + 1]);
        RowEntries::compressed(&self.csr.col_indices()[begin..end], begin)
    }

    fn find_entry(&self, row: usize, col: usize) -> Option<usize> {
        let offsets = self.csr.row_offsets();
        let (begin, end) = (*offsets.get(row)?, offsets[row + 1]);
        self.csr.col_indices()[begin..end]
            .binary_search(&col)
            .ok()
            .map(|local| begin + local)
    }

    fn diagonal_position(&self, row: usize) -> Option<usize> {
        self.diagonal.get(row).copied().flatten()
    }
}

impl<T> MatrixSource<T> for SortedCsr<T> {
    fn values(&self) -> &[T] {
        self.csr.values()
    }
}

/// A square CSR matrix storing the diagonal entry first in every row.
///
/// The off-diagonal entries of a row follow in ascending column order. Since the diagonal is
/// always the first entry, the row offsets double as the diagonal index.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagonalFirstCsr<T> {
    n: usize,
    row_offsets: Vec<usize>,
    col_indices: Vec<usize>,
    values: Vec<T>,
}

impl<T: Scalar> DiagonalFirstCsr<T> {
    /// Reorders the entries of a square CSR matrix so that the diagonal comes first in each row.
    ///
    /// Fails if the matrix is not square or a row lacks its diagonal entry.
    pub fn from_csr(csr: &CsrMatrix<T>) -> Result<Self, GroupFemError> {
        if csr.nrows() != csr.ncols() {
            return Err(GroupFemError::NotSquare {
                nrows: csr.nrows(),
                ncols: csr.ncols(),
            });
        }

        let mut col_indices = Vec::with_capacity(csr.nnz());
        let mut values = Vec::with_capacity(csr.nnz());
        for (row_idx, row) in csr.row_iter().enumerate() {
            let diagonal_local = row
                .col_indices()
                .binary_search(&row_idx)
                .map_err(|_| GroupFemError::MissingDiagonalEntry { row: row_idx })?;
            col_indices.push(row_idx);
            values.push(row.values()[diagonal_local].clone());
            for (&col, value) in izip!(row.col_indices(), row.values()) {
                if col != row_idx {
                    col_indices.push(col);
                    values.push(value.clone());
                }
            }
        }

        Ok(Self {
            n: csr.nrows(),
            row_offsets: csr.row_offsets().to_vec(),
            col_indices,
            values,
        })
    }
}

impl<T> DiagonalFirstCsr<T> {
    pub fn row_offsets(&self) -> &[usize] {
        &self.row_offsets
    }

    pub fn col_indices(&self) -> &[usize] {
        &self.col_indices
    }

    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    fn row_range(&self, row: usize) -> std::ops::Range<usize> {
        self.row_offsets[row]..self.row_offsets[row + 1]
    }
}

impl<T> SparseLayout for DiagonalFirstCsr<T> {
    fn format(&self) -> MatrixFormat {
        MatrixFormat::DiagonalFirstCsr
    }

    fn nrows(&self) -> usize {
        self.n
    }

    fn ncols(&self) -> usize {
        self.n
    }

    fn nnz(&self) -> usize {
        self.col_indices.len()
    }

    fn row_entries(&self, row: usize) -> RowEntries<'_> {
        let range = self.row_range(row);
        let begin = range.start;
        RowEntries::compressed(&self.col_indices[range], begin)
    }

    fn find_entry(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.n {
            return None;
        }
        let range = self.row_range(row);
        if row == col {
            return Some(range.start);
        }
        // Skip the diagonal, the remaining columns are sorted
        let off_diagonal_begin = range.start + 1;
        self.col_indices[off_diagonal_begin..range.end]
            .binary_search(&col)
            .ok()
            .map(|local| off_diagonal_begin + local)
    }

    fn diagonal_position(&self, row: usize) -> Option<usize> {
        (row < self.n).then(|| self.row_offsets[row])
    }
}

impl<T> MatrixSource<T> for DiagonalFirstCsr<T> {
    fn values(&self) -> &[T] {
        &self.values
    }
}
