//! Dimensions of group finite element data derived from a sparse matrix.
use crate::error::GroupFemError;
use crate::sparse::SparseLayout;
use serde::{Deserialize, Serialize};
use std::cmp::max;

/// Number of stored entries (NA), equations (NEQ) and edges (NEDGE).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub na: usize,
    pub neq: usize,
    pub nedge: usize,
}

impl Dimensions {
    pub fn new(na: usize, neq: usize, nedge: usize) -> Self {
        Self { na, neq, nedge }
    }

    /// Dimensions with the edge count implied by a structurally symmetric matrix,
    /// `NEDGE = (NA - NEQ) / 2`.
    pub fn symmetric(na: usize, neq: usize) -> Self {
        Self {
            na,
            neq,
            nedge: na.saturating_sub(neq) / 2,
        }
    }
}

/// Membership mask of a degree of freedom restriction.
///
/// Active degrees of freedom are renumbered consecutively in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DofMask {
    local_indices: Vec<Option<usize>>,
    dofs: Vec<usize>,
}

impl DofMask {
    /// Builds the mask of `dofs` over `0 .. bound`.
    ///
    /// The list may be unsorted and contain duplicates.
    pub fn new(dofs: &[usize], bound: usize) -> Result<Self, GroupFemError> {
        let mut active = vec![false; bound];
        for &dof in dofs {
            *active
                .get_mut(dof)
                .ok_or(GroupFemError::DofOutOfBounds { dof, bound })? = true;
        }

        let mut local_indices = vec![None; bound];
        let mut sorted_dofs = Vec::new();
        for (dof, is_active) in active.into_iter().enumerate() {
            if is_active {
                local_indices[dof] = Some(sorted_dofs.len());
                sorted_dofs.push(dof);
            }
        }

        Ok(Self {
            local_indices,
            dofs: sorted_dofs,
        })
    }

    /// Builds the mask for a restriction of the given matrix, which covers the indices
    /// `0 .. max(nrows, ncols)`.
    pub fn for_layout<L>(layout: &L, dofs: &[usize]) -> Result<Self, GroupFemError>
    where
        L: ?Sized + SparseLayout,
    {
        Self::new(dofs, max(layout.nrows(), layout.ncols()))
    }

    pub fn is_active(&self, dof: usize) -> bool {
        self.local_index(dof).is_some()
    }

    /// The index of `dof` among the active degrees of freedom.
    pub fn local_index(&self, dof: usize) -> Option<usize> {
        self.local_indices.get(dof).copied().flatten()
    }

    /// Sorted, duplicate-free list of active degrees of freedom.
    pub fn dofs(&self) -> &[usize] {
        &self.dofs
    }

    pub fn num_active(&self) -> usize {
        self.dofs.len()
    }
}

/// Calls `f(local_row, row, col, position)` for every stored entry whose row and column are
/// both active, in row-major scan order.
///
/// Without a mask every entry is visited and `local_row == row`.
pub(crate) fn for_each_active_entry<L, F>(layout: &L, mask: Option<&DofMask>, mut f: F)
where
    L: ?Sized + SparseLayout,
    F: FnMut(usize, usize, usize, usize),
{
    for row in 0..layout.nrows() {
        let local_row = match mask {
            None => row,
            Some(mask) => match mask.local_index(row) {
                Some(local_row) => local_row,
                None => continue,
            },
        };
        for (col, position) in layout.row_entries(row) {
            if mask.map_or(true, |mask| mask.is_active(col)) {
                f(local_row, row, col, position);
            }
        }
    }
}

/// Computes NA, NEQ and NEDGE of a matrix, optionally restricted to a subset of its degrees of
/// freedom.
///
/// With a restriction, NEQ counts the active rows and NA the stored entries in active rows whose
/// column is active as well.
pub fn compute_dimensions<L>(layout: &L, dofs: Option<&[usize]>) -> Result<Dimensions, GroupFemError>
where
    L: ?Sized + SparseLayout,
{
    match dofs {
        None => Ok(Dimensions::symmetric(layout.nnz(), layout.nrows())),
        Some(dofs) => {
            let mask = DofMask::for_layout(layout, dofs)?;
            Ok(restricted_dimensions(layout, &mask))
        }
    }
}

pub(crate) fn restricted_dimensions<L>(layout: &L, mask: &DofMask) -> Dimensions
where
    L: ?Sized + SparseLayout,
{
    let neq = (0..layout.nrows()).filter(|&row| mask.is_active(row)).count();
    let mut na = 0;
    for_each_active_entry(layout, Some(mask), |_, _, _, _| na += 1);
    Dimensions::symmetric(na, neq)
}
