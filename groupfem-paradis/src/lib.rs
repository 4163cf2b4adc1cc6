//! groupfem-paradis
//! ================
//!
//! Parallel processing of disjoint subsets of indices.
//!
//! An edge of a finite element graph touches exactly two nodes. If a collection of edges is
//! split into groups in which no node appears twice, all edges of a group may write to their
//! nodes concurrently. This crate provides the coloring that produces such groups and the
//! (unsafe) machinery that exploits them.

pub mod coloring;
pub mod slice;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A collection of index subsets, each identified by its position (*label*) in the collection.
pub trait IndexSubsets: Sync {
    fn num_subsets(&self) -> usize;

    fn subset(&self, label: usize) -> &[usize];
}

impl<const N: usize> IndexSubsets for [[usize; N]] {
    fn num_subsets(&self) -> usize {
        self.len()
    }

    fn subset(&self, label: usize) -> &[usize] {
        self[label].as_slice()
    }
}

impl<const N: usize> IndexSubsets for Vec<[usize; N]> {
    fn num_subsets(&self) -> usize {
        self.as_slice().num_subsets()
    }

    fn subset(&self, label: usize) -> &[usize] {
        self.as_slice().subset(label)
    }
}

impl IndexSubsets for Vec<Vec<usize>> {
    fn num_subsets(&self) -> usize {
        self.len()
    }

    fn subset(&self, label: usize) -> &[usize] {
        self[label].as_slice()
    }
}

/// Access of a single subset to the records it addresses.
///
/// Local index `k` refers to the `k`-th global index of the subset.
pub struct SubsetAccess<'data, Access> {
    label: usize,
    indices: &'data [usize],
    access: &'data Access,
}

impl<'data, Access> SubsetAccess<'data, Access> {
    pub fn label(&self) -> usize {
        self.label
    }

    pub fn global_indices(&self) -> &[usize] {
        self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn get<'b>(&'b self, local_index: usize) -> <Access as ParallelIndexedAccess<'b>>::Record
    where
        'data: 'b,
        Access: ParallelIndexedAccess<'b>,
    {
        // Subsets selected together never share an index, so no mutable record can alias this one
        unsafe { self.access.get_unchecked(self.indices[local_index]) }
    }

    /// Mutable access to the record at `local_index`.
    ///
    /// Taking `&mut self` prevents two live mutable records from the same subset, which could
    /// alias if the subset repeats an index.
    pub fn get_mut<'b>(&'b mut self, local_index: usize) -> <Access as ParallelIndexedAccess<'b>>::RecordMut
    where
        'data: 'b,
        Access: ParallelIndexedAccess<'b>,
    {
        unsafe { self.access.get_unchecked_mut(self.indices[local_index]) }
    }
}

/// Shared handle that hands out records of a collection by index, from any thread.
///
/// # Safety
///
/// Implementations must allow concurrent shared reads of one record while nobody writes it, and
/// concurrent writes to records with distinct indices.
///
/// Callers must never hold a mutable record together with any other record of the same index,
/// on one thread or several.
pub unsafe trait ParallelIndexedAccess<'record>: Sync + Send + Clone {
    type Record;
    type RecordMut;

    unsafe fn get_unchecked(&self, index: usize) -> Self::Record;
    unsafe fn get_unchecked_mut(&self, index: usize) -> Self::RecordMut;
}

/// A collection whose records can be reached through a [`ParallelIndexedAccess`] handle.
///
/// # Safety
///
/// `len` must be exact: callers read and write every index below it.
pub unsafe trait ParallelIndexedCollection<'a> {
    type Access;

    unsafe fn create_access(&'a mut self) -> Self::Access;
    fn len(&self) -> usize;
}

/// A selection of subsets (by label) from an [`IndexSubsets`] collection in which no index is
/// shared between two selected subsets.
///
/// An index may appear several times *within* a single subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisjointSubsets {
    // Checked against the storage length before any record is handed out
    max_index: Option<usize>,
    labels: Vec<usize>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SubsetsNotDisjointError;

impl fmt::Display for SubsetsNotDisjointError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Subsets are not disjoint")
    }
}

impl std::error::Error for SubsetsNotDisjointError {}

impl DisjointSubsets {
    /// Selects the subsets with the given labels, verifying that they are pairwise disjoint.
    ///
    /// Panics if a label is out of bounds for `subsets`.
    pub fn try_from_labels<S>(subsets: &S, labels: Vec<usize>) -> Result<Self, SubsetsNotDisjointError>
    where
        S: ?Sized + IndexSubsets,
    {
        let mut seen_in_earlier = HashSet::new();
        let mut seen_in_current = HashSet::new();
        for &label in &labels {
            seen_in_current.clear();
            seen_in_current.extend(subsets.subset(label).iter().copied());
            if seen_in_current.iter().any(|idx| seen_in_earlier.contains(idx)) {
                return Err(SubsetsNotDisjointError);
            }
            seen_in_earlier.extend(seen_in_current.drain());
        }
        let max_index = seen_in_earlier.into_iter().max();

        Ok(Self { max_index, labels })
    }

    /// # Safety
    ///
    /// The selected subsets must be pairwise disjoint and `max_index` must be the largest index
    /// among them.
    pub unsafe fn from_labels_unchecked(labels: Vec<usize>, max_index: Option<usize>) -> Self {
        Self { max_index, labels }
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn max_index(&self) -> Option<usize> {
        self.max_index
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Calls `f` in parallel for every selected subset, granting it access to the records of
    /// `storage` addressed by the subset.
    ///
    /// `subsets` must be the collection the labels were validated against.
    ///
    /// Panics if any subset contains an index that exceeds the length reported by `storage`.
    pub fn par_for_each_subset<'a, S, Storage, F>(&'a self, subsets: &'a S, storage: &'a mut Storage, f: F)
    where
        S: ?Sized + IndexSubsets,
        Storage: ?Sized + ParallelIndexedCollection<'a>,
        Storage::Access: Sync,
        F: Fn(SubsetAccess<'_, Storage::Access>) + Sync + Send,
    {
        if let Some(max_index) = self.max_index {
            assert!(max_index < storage.len(), "Subsets contain indices out of bounds.");
        }
        // Selected subsets are pairwise disjoint, so every record is reached by at most one subset
        let access = unsafe { storage.create_access() };
        self.labels.par_iter().for_each(|&label| {
            f(SubsetAccess {
                label,
                indices: subsets.subset(label),
                access: &access,
            })
        });
    }
}
