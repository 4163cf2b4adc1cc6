use crate::set::{GroupFemSet, TransferOptions};
use crate::FemScalar;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::slice;

/// An ordered, resizable collection of group finite element sets.
#[derive(Debug)]
pub struct GroupFemBlock<T: FemScalar = f64> {
    sets: Vec<GroupFemSet<T>>,
}

impl<T: FemScalar> Default for GroupFemBlock<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FemScalar> GroupFemBlock<T> {
    pub fn new() -> Self {
        Self { sets: Vec::new() }
    }

    /// A block of `n` empty sets.
    pub fn with_sets(n: usize) -> Self {
        let mut block = Self::new();
        block.resize(n);
        block
    }

    /// Grows the block with empty sets, or truncates it and releases the dropped sets.
    ///
    /// Sets at positions below `n` are kept as they are.
    pub fn resize(&mut self, n: usize) {
        self.sets.resize_with(n, GroupFemSet::new);
    }

    /// Releases all sets and empties the block.
    pub fn release(&mut self) {
        self.sets.clear();
    }

    /// Applies [`GroupFemSet::copy_from`] to every pair of sets, after reallocating this block
    /// to the size of `source` if necessary.
    pub fn copy_from(&mut self, source: &Self, options: &TransferOptions) {
        self.match_size(source);
        for (set, source_set) in self.sets.iter_mut().zip(&source.sets) {
            set.copy_from(source_set, options);
        }
    }

    /// Applies [`GroupFemSet::duplicate_from`] to every pair of sets, after reallocating this
    /// block to the size of `source` if necessary.
    pub fn duplicate_from(&mut self, source: &Self, options: &TransferOptions) {
        self.match_size(source);
        for (set, source_set) in self.sets.iter_mut().zip(&source.sets) {
            set.duplicate_from(source_set, options);
        }
    }

    fn match_size(&mut self, source: &Self) {
        if self.len() != source.len() {
            self.release();
            self.resize(source.len());
        }
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, GroupFemSet<T>> {
        self.sets.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, GroupFemSet<T>> {
        self.sets.iter_mut()
    }

    pub fn log_info(&self) {
        log::info!("{}", self);
    }
}

impl<T: FemScalar> Index<usize> for GroupFemBlock<T> {
    type Output = GroupFemSet<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.sets[index]
    }
}

impl<T: FemScalar> IndexMut<usize> for GroupFemBlock<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.sets[index]
    }
}

impl<'a, T: FemScalar> IntoIterator for &'a GroupFemBlock<T> {
    type Item = &'a GroupFemSet<T>;
    type IntoIter = slice::Iter<'a, GroupFemSet<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: FemScalar> fmt::Display for GroupFemBlock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupFemBlock with {} sets", self.len())?;
        for (i, set) in self.sets.iter().enumerate() {
            write!(f, "\n[{}] {}", i, set)?;
        }
        Ok(())
    }
}
