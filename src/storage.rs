//! Typed flat buffers behind shared handles.
//!
//! A [`Buffer`] is the owning handle of a flat array with a column-major shape of up to three
//! dimensions. Its owner may hand out non-owning [`BufferAlias`] handles; an alias resolves to
//! the buffer only while the owner keeps it alive. Dropping the owning handle frees the buffer.
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::fmt;
use std::sync::{Arc, Weak};

/// Column-major shape of a buffer of rank 1, 2 or 3.
///
/// The *extent* is the last (slowest varying) dimension, e.g. the number of edges for an edge
/// coefficient buffer of shape `(ncoeffs, 2, nedge)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: [usize; 3],
    rank: usize,
}

impl Shape {
    pub fn vector(len: usize) -> Self {
        Self {
            dims: [len, 1, 1],
            rank: 1,
        }
    }

    pub fn matrix(nrows: usize, ncols: usize) -> Self {
        Self {
            dims: [nrows, ncols, 1],
            rank: 2,
        }
    }

    pub fn tensor3(d0: usize, d1: usize, d2: usize) -> Self {
        Self {
            dims: [d0, d1, d2],
            rank: 3,
        }
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims[..self.rank]
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Size of the last dimension.
    pub fn extent(&self) -> usize {
        self.dims[self.rank - 1]
    }

    /// Number of elements per index of the last dimension.
    pub fn chunk_len(&self) -> usize {
        self.dims[..self.rank - 1].iter().product()
    }

    pub fn len(&self) -> usize {
        self.dims[..self.rank].iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The same shape with the last dimension replaced.
    pub fn with_extent(&self, extent: usize) -> Self {
        let mut shape = *self;
        shape.dims[self.rank - 1] = extent;
        shape
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, dim) in self.dims().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", dim)?;
        }
        write!(f, ")")
    }
}

/// What happens to the content of a buffer when it is resized.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResizePolicy {
    /// Keep the leading chunks, fill new chunks with default values.
    Preserve,
    /// Reset every element to its default value.
    Discard,
}

/// The content of a buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferData<E> {
    name: String,
    shape: Shape,
    data: Vec<E>,
}

impl<E> BufferData<E> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [E] {
        &mut self.data
    }

    /// The elements belonging to index `k` of the last dimension.
    ///
    /// For a coefficient buffer of shape `(ncoeffs, na)` this is the coefficient stack of entry `k`.
    pub fn chunk(&self, k: usize) -> &[E] {
        let n = self.shape.chunk_len();
        &self.data[k * n..(k + 1) * n]
    }

    pub fn chunk_mut(&mut self, k: usize) -> &mut [E] {
        let n = self.shape.chunk_len();
        &mut self.data[k * n..(k + 1) * n]
    }
}

/// Owning handle to a buffer.
///
/// Cloning the handle yields another owning reference to the *same* buffer; use
/// [`Buffer::deep_copy`] for an independent copy.
#[derive(Debug)]
pub struct Buffer<E> {
    inner: Arc<RwLock<BufferData<E>>>,
}

impl<E> Clone for Buffer<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Clone + Default> Buffer<E> {
    /// Allocates a buffer with every element set to its default value.
    pub fn allocate(name: impl Into<String>, shape: Shape) -> Self {
        Self::from_vec(name, shape, vec![E::default(); shape.len()])
    }

    /// Resizes the last dimension of the buffer.
    pub fn resize(&self, extent: usize, policy: ResizePolicy) {
        let mut guard = self.inner.write();
        let shape = guard.shape.with_extent(extent);
        match policy {
            ResizePolicy::Preserve => guard.data.resize(shape.len(), E::default()),
            ResizePolicy::Discard => {
                guard.data.clear();
                guard.data.resize(shape.len(), E::default());
            }
        }
        guard.shape = shape;
    }

    /// Replaces shape and content of the buffer.
    ///
    /// Panics if the data does not fit the shape.
    pub fn replace(&self, shape: Shape, data: Vec<E>) {
        assert_eq!(data.len(), shape.len(), "Buffer data must match its shape.");
        let mut guard = self.inner.write();
        guard.shape = shape;
        guard.data = data;
    }
}

impl<E: Clone> Buffer<E> {
    /// Panics if the data does not fit the shape.
    pub fn from_vec(name: impl Into<String>, shape: Shape, data: Vec<E>) -> Self {
        assert_eq!(data.len(), shape.len(), "Buffer data must match its shape.");
        Self {
            inner: Arc::new(RwLock::new(BufferData {
                name: name.into(),
                shape,
                data,
            })),
        }
    }

    /// Allocates a new buffer with the same name, shape and content.
    pub fn deep_copy(&self) -> Self {
        let data = self.inner.read().clone();
        Self {
            inner: Arc::new(RwLock::new(data)),
        }
    }

    /// Copies the content out of the buffer.
    pub fn to_vec(&self) -> Vec<E> {
        self.inner.read().data.clone()
    }
}

impl<E> Buffer<E> {
    pub fn shape(&self) -> Shape {
        self.inner.read().shape
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn read(&self) -> RwLockReadGuard<'_, BufferData<E>> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, BufferData<E>> {
        self.inner.write()
    }

    /// A non-owning handle to this buffer.
    pub fn alias(&self) -> BufferAlias<E> {
        BufferAlias {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Whether both handles refer to the same buffer.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

/// Non-owning handle to a buffer.
#[derive(Debug)]
pub struct BufferAlias<E> {
    inner: Weak<RwLock<BufferData<E>>>,
}

impl<E> Clone for BufferAlias<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<E> BufferAlias<E> {
    /// The aliased buffer, or `None` if its owner has released it.
    pub fn upgrade(&self) -> Option<Buffer<E>> {
        self.inner.upgrade().map(|inner| Buffer { inner })
    }
}

/// A buffer handle as held by a group finite element set.
#[derive(Debug, Clone)]
pub enum BufferHandle<E> {
    Owned(Buffer<E>),
    Aliased(BufferAlias<E>),
}

impl<E> BufferHandle<E> {
    /// Resolves the handle to the buffer, if it is still alive.
    pub fn get(&self) -> Option<Buffer<E>> {
        match self {
            BufferHandle::Owned(buffer) => Some(buffer.clone()),
            BufferHandle::Aliased(alias) => alias.upgrade(),
        }
    }

    /// A non-owning handle to the same buffer.
    pub fn alias(&self) -> BufferAlias<E> {
        match self {
            BufferHandle::Owned(buffer) => buffer.alias(),
            BufferHandle::Aliased(alias) => alias.clone(),
        }
    }

    pub fn owned(&self) -> Option<&Buffer<E>> {
        match self {
            BufferHandle::Owned(buffer) => Some(buffer),
            BufferHandle::Aliased(_) => None,
        }
    }
}

/// Stores `data` in the owned buffer of `slot`, or in a new owned buffer if the slot holds none.
///
/// Replacing the content in place keeps existing aliases of the buffer valid.
pub(crate) fn store_owned<E>(slot: &mut Option<BufferHandle<E>>, name: &str, shape: Shape, data: Vec<E>)
where
    E: Clone + Default,
{
    match slot {
        Some(BufferHandle::Owned(buffer)) => buffer.replace(shape, data),
        _ => *slot = Some(BufferHandle::Owned(Buffer::from_vec(name, shape, data))),
    }
}
