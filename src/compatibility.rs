//! Checks whether matrices and vectors fit the dimensions of a set.
use crate::dimensions::{restricted_dimensions, Dimensions, DofMask};
use crate::error::GroupFemError;
use crate::set::GroupFemSet;
use crate::sparse::{BlockMatrix, BlockMatrixKind, BlockVector, SparseLayout, VectorLayout};
use crate::FemScalar;

fn check_quantity(quantity: &'static str, expected: usize, found: usize) -> Result<(), GroupFemError> {
    if expected == found {
        Ok(())
    } else {
        Err(GroupFemError::StructuralMismatch {
            quantity,
            expected,
            found,
        })
    }
}

impl<T: FemScalar> GroupFemSet<T> {
    /// Dimensions of `matrix` under the restriction the set was derived with.
    fn matrix_dimensions<L>(&self, matrix: &L) -> Result<Dimensions, GroupFemError>
    where
        L: ?Sized + SparseLayout,
    {
        match self.dof_restriction() {
            None => Ok(Dimensions::symmetric(matrix.nnz(), matrix.nrows())),
            Some(dofs) => {
                let mask = DofMask::for_layout(matrix, dofs).map_err(|_| GroupFemError::StructuralMismatch {
                    quantity: "NEQ",
                    expected: self.neq(),
                    found: matrix.nrows(),
                })?;
                Ok(restricted_dimensions(matrix, &mask))
            }
        }
    }

    fn check_dimensions(&self, dimensions: Dimensions, nvar: usize) -> Result<(), GroupFemError> {
        check_quantity("NA", self.na(), dimensions.na)?;
        check_quantity("NEQ", self.neq(), dimensions.neq)?;
        check_quantity("NVAR", self.nvar(), nvar)?;
        check_quantity("NEDGE", self.nedge(), dimensions.nedge)
    }

    /// Checks that NA, NEQ, NVAR and NEDGE of the matrix agree with the set.
    pub fn check_matrix<L>(&self, matrix: &L) -> Result<(), GroupFemError>
    where
        L: ?Sized + SparseLayout,
    {
        let dimensions = self.matrix_dimensions(matrix)?;
        self.check_dimensions(dimensions, matrix.nvar())
    }

    pub fn is_compatible_with_matrix<L>(&self, matrix: &L) -> bool
    where
        L: ?Sized + SparseLayout,
    {
        self.check_matrix(matrix).is_ok()
    }

    /// Checks a block matrix against the set.
    ///
    /// A single block is checked like a scalar matrix. Larger block matrices must be square group
    /// matrices, whose first block is checked with one variable per block row.
    pub fn check_block_matrix<M>(&self, matrix: &BlockMatrix<M>) -> Result<(), GroupFemError>
    where
        M: SparseLayout,
    {
        if matrix.nblocks_per_col() == 1 && matrix.nblocks_per_row() == 1 {
            return self.check_matrix(matrix.block(0, 0));
        }
        if matrix.kind() != BlockMatrixKind::GroupMatrix {
            return Err(GroupFemError::NotGroupMatrix(matrix.kind()));
        }
        check_quantity("number of block columns", matrix.nblocks_per_col(), matrix.nblocks_per_row())?;

        let dimensions = self.matrix_dimensions(matrix.block(0, 0))?;
        self.check_dimensions(dimensions, matrix.nblocks_per_col())
    }

    pub fn is_compatible_with_block_matrix<M>(&self, matrix: &BlockMatrix<M>) -> bool
    where
        M: SparseLayout,
    {
        self.check_block_matrix(matrix).is_ok()
    }

    /// Checks that NEQ and NVAR of the vector agree with the set.
    pub fn check_vector<V>(&self, vector: &V) -> Result<(), GroupFemError>
    where
        V: ?Sized + VectorLayout,
    {
        check_quantity("NEQ", self.neq(), vector.neq())?;
        check_quantity("NVAR", self.nvar(), vector.nvar())
    }

    pub fn is_compatible_with_vector<V>(&self, vector: &V) -> bool
    where
        V: ?Sized + VectorLayout,
    {
        self.check_vector(vector).is_ok()
    }

    /// Checks a block vector against the set.
    ///
    /// A single block is checked like a scalar vector. Otherwise every block must have NEQ
    /// equations and the set must have one variable per block.
    pub fn check_block_vector<V>(&self, vector: &BlockVector<V>) -> Result<(), GroupFemError>
    where
        V: VectorLayout,
    {
        if vector.nblocks() == 1 {
            return self.check_vector(vector.block(0));
        }
        for block in vector.blocks() {
            check_quantity("NEQ", self.neq(), block.neq())?;
        }
        check_quantity("NVAR", self.nvar(), vector.nblocks())
    }

    pub fn is_compatible_with_block_vector<V>(&self, vector: &BlockVector<V>) -> bool
    where
        V: VectorLayout,
    {
        self.check_block_vector(vector).is_ok()
    }
}
