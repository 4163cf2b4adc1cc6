use crate::sparse::{MatrixFormat, MatrixSource, RowEntries, SparseLayout, VectorLayout};
use nalgebra::{DMatrix, DVector, Scalar};

impl<T: Scalar> SparseLayout for DMatrix<T> {
    fn format(&self) -> MatrixFormat {
        MatrixFormat::Dense
    }

    fn nrows(&self) -> usize {
        self.shape().0
    }

    fn ncols(&self) -> usize {
        self.shape().1
    }

    fn nnz(&self) -> usize {
        self.len()
    }

    fn row_entries(&self, row: usize) -> RowEntries<'_> {
        let (nrows, ncols) = self.shape();
        assert!(row < nrows, "Row index out of bounds.");
        RowEntries::dense(row, nrows, ncols)
    }

    fn find_entry(&self, row: usize, col: usize) -> Option<usize> {
        let (nrows, ncols) = self.shape();
        (row < nrows && col < ncols).then(|| row + col * nrows)
    }

    fn diagonal_position(&self, row: usize) -> Option<usize> {
        self.find_entry(row, row)
    }
}

impl<T: Scalar> MatrixSource<T> for DMatrix<T> {
    fn values(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Scalar> VectorLayout for DVector<T> {
    fn neq(&self) -> usize {
        self.len()
    }
}

/// A vector storing `nvar` variables per equation, interleaved equation by equation.
#[derive(Debug, Clone, PartialEq)]
pub struct InterleavedVector<T: Scalar> {
    values: DVector<T>,
    nvar: usize,
}

impl<T: Scalar> InterleavedVector<T> {
    /// Panics if `nvar` is zero or does not divide the length of `values`.
    pub fn from_values(values: DVector<T>, nvar: usize) -> Self {
        assert!(nvar > 0, "Number of variables must be positive.");
        assert_eq!(
            values.len() % nvar,
            0,
            "Vector length must be a multiple of the number of variables."
        );
        Self { values, nvar }
    }

    pub fn values(&self) -> &DVector<T> {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut DVector<T> {
        &mut self.values
    }

    /// The variables of equation `eq`.
    pub fn equation(&self, eq: usize) -> &[T] {
        &self.values.as_slice()[eq * self.nvar..(eq + 1) * self.nvar]
    }
}

impl<T: Scalar> VectorLayout for InterleavedVector<T> {
    fn neq(&self) -> usize {
        self.values.len() / self.nvar
    }

    fn nvar(&self) -> usize {
        self.nvar
    }
}
