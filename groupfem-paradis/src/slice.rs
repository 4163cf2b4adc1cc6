//! Disjoint parallel access to the elements of a mutable slice.
//!
//! Node-indexed vectors (one entry per equation) are the typical target: every edge of a
//! conflict-free group writes to its two end points.
use crate::{ParallelIndexedAccess, ParallelIndexedCollection};
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Raw view of a mutably borrowed slice that can be shared between threads.
///
/// Obtained through [`ParallelIndexedCollection::create_access`]; the borrow of the slice lasts
/// as long as the view.
pub struct SliceRecords<'a, T> {
    base: NonNull<T>,
    len: usize,
    borrow: PhantomData<&'a mut [T]>,
}

impl<'a, T> SliceRecords<'a, T> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// # Safety
    ///
    /// `index` must be smaller than the length of the slice.
    unsafe fn record_ptr(&self, index: usize) -> *mut T {
        debug_assert!(index < self.len, "Record index {} out of bounds ({})", index, self.len);
        self.base.as_ptr().add(index)
    }
}

impl<'a, T> Clone for SliceRecords<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for SliceRecords<'a, T> {}

// The view only hands out references to T, so it is as thread-safe as &mut [T]
unsafe impl<'a, T: Send> Send for SliceRecords<'a, T> {}
unsafe impl<'a, T: Sync> Sync for SliceRecords<'a, T> {}

unsafe impl<'a, 'b, T> ParallelIndexedAccess<'b> for SliceRecords<'a, T>
where
    'a: 'b,
    T: 'b + Send + Sync,
{
    type Record = &'b T;
    type RecordMut = &'b mut T;

    unsafe fn get_unchecked(&self, index: usize) -> &'b T {
        &*self.record_ptr(index)
    }

    unsafe fn get_unchecked_mut(&self, index: usize) -> &'b mut T {
        &mut *self.record_ptr(index)
    }
}

unsafe impl<'a, T> ParallelIndexedCollection<'a> for [T]
where
    T: 'a + Send + Sync,
{
    type Access = SliceRecords<'a, T>;

    unsafe fn create_access(&'a mut self) -> SliceRecords<'a, T> {
        SliceRecords {
            len: self.len(),
            base: NonNull::new_unchecked(self.as_mut_ptr()),
            borrow: PhantomData,
        }
    }

    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}
