//! Errors and warnings reported by group finite element operations.
use crate::set::{AssemblyKind, DataCategory};
use crate::sparse::{BlockMatrixKind, MatrixFormat};
use std::error::Error;
use std::fmt;

/// Coarse classification of a [`GroupFemError`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The inputs describe an unsupported or inconsistent configuration.
    Configuration,
    /// The dimensions of a matrix or vector do not agree with those of a set.
    StructuralMismatch,
}

/// Error returned by group finite element operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupFemError {
    /// Coefficients were requested for a set whose assembly kind does not define them.
    UnsupportedAssemblyKind(AssemblyKind),
    /// Source matrices of one coefficient initialization use different storage formats.
    FormatMismatch {
        expected: MatrixFormat,
        found: MatrixFormat,
    },
    /// An auxiliary array, such as the list of target layers, has the wrong length.
    ArraySizeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// A target layer lies beyond the layers of an existing coefficient buffer.
    LayerOutOfRange {
        layer: usize,
        capacity: usize,
    },
    /// A restriction names a degree of freedom the matrix does not have.
    DofOutOfBounds {
        dof: usize,
        bound: usize,
    },
    /// The restriction differs from the one the set structure was derived with.
    DofRestrictionMismatch,
    /// Edges are only defined for square matrices.
    NotSquare {
        nrows: usize,
        ncols: usize,
    },
    /// The matrix stores `(row, col)` but not `(col, row)`.
    MissingTransposedEntry {
        row: usize,
        col: usize,
    },
    /// Edge-based coefficients need the diagonal entry of every active row.
    MissingDiagonalEntry {
        row: usize,
    },
    /// The operation needs an edge list, but the set has none.
    MissingEdgeStructure,
    /// Edge generation found a different number of edges than the set was sized for.
    EdgeCountMismatch {
        expected: usize,
        generated: usize,
    },
    /// Coefficient initialization was called without source matrices.
    EmptySourceList,
    /// A block matrix with several blocks whose blocks do not share one structure.
    NotGroupMatrix(BlockMatrixKind),
    /// A dimension of a matrix, vector or buffer disagrees with the set.
    StructuralMismatch {
        quantity: &'static str,
        expected: usize,
        found: usize,
    },
}

impl GroupFemError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GroupFemError::StructuralMismatch { .. } | GroupFemError::NotGroupMatrix(_) => {
                ErrorKind::StructuralMismatch
            }
            _ => ErrorKind::Configuration,
        }
    }
}

impl fmt::Display for GroupFemError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use GroupFemError::*;
        match self {
            UnsupportedAssemblyKind(kind) => write!(f, "Unsupported assembly kind {:?}", kind),
            FormatMismatch { expected, found } => {
                write!(f, "Matrix format {:?} does not match expected format {:?}", found, expected)
            }
            ArraySizeMismatch { what, expected, found } => {
                write!(f, "Number of {} is {}, expected {}", what, found, expected)
            }
            LayerOutOfRange { layer, capacity } => write!(
                f,
                "Coefficient layer {} exceeds the capacity of {} layers of the allocated buffer",
                layer, capacity
            ),
            DofOutOfBounds { dof, bound } => {
                write!(f, "Degree of freedom {} is out of bounds for {} degrees of freedom", dof, bound)
            }
            DofRestrictionMismatch => write!(
                f,
                "Degree of freedom restriction differs from the restriction the set structure was derived for"
            ),
            NotSquare { nrows, ncols } => write!(f, "Matrix of size {}x{} is not square", nrows, ncols),
            MissingTransposedEntry { row, col } => write!(
                f,
                "Matrix is not structurally symmetric: entry ({}, {}) exists but its transpose does not",
                row, col
            ),
            MissingDiagonalEntry { row } => write!(f, "Matrix has no diagonal entry in row {}", row),
            MissingEdgeStructure => write!(f, "Group finite element set has no edge structure"),
            EdgeCountMismatch { expected, generated } => write!(
                f,
                "Generated {} edges, but the set expects {} edges",
                generated, expected
            ),
            EmptySourceList => write!(f, "At least one source matrix is required"),
            NotGroupMatrix(kind) => write!(
                f,
                "Block matrix of kind {:?} does not share one structure across its blocks",
                kind
            ),
            StructuralMismatch {
                quantity,
                expected,
                found,
            } => write!(f, "Incompatible {}: expected {}, found {}", quantity, expected, found),
        }
    }
}

impl Error for GroupFemError {}

/// An operation was skipped because it would have modified a buffer the set does not own.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OwnershipWarning {
    pub category: DataCategory,
    pub operation: &'static str,
}

impl OwnershipWarning {
    pub(crate) fn emit(category: DataCategory, operation: &'static str) -> Self {
        let warning = Self { category, operation };
        log::warn!("{}", warning);
        warning
    }
}

impl fmt::Display for OwnershipWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:?} is shared with another set and cannot be modified by {}; skipped",
            self.category, self.operation
        )
    }
}
