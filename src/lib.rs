//! Group-based finite element assembly data.
//!
//! A [`GroupFemSet`](set::GroupFemSet) bundles the auxiliary arrays that edge- and node-based
//! discretization schemes need to evaluate discrete operators without repeatedly deriving topology
//! from a sparse matrix: an edge list with the positions of both off-diagonal entries of every
//! edge, an index partitioning the edges into groups, and node- and edge-indexed coefficient
//! buffers copied out of one or more sparse matrices.
//!
//! Buffers may be owned by a set or aliased from another set, see
//! [`GroupFemSet::duplicate_from`](set::GroupFemSet::duplicate_from).
use nalgebra::RealField;
use serde::{Deserialize, Serialize};

pub mod block;
pub mod coefficients;
pub mod compatibility;
pub mod dimensions;
pub mod edges;
pub mod error;
pub mod set;
pub mod sparse;
pub mod storage;
pub mod traversal;

#[cfg(feature = "proptest")]
pub mod proptest;

pub extern crate nalgebra;
pub extern crate nalgebra_sparse;

pub use block::GroupFemBlock;
pub use error::{GroupFemError, OwnershipWarning};
pub use set::GroupFemSet;

/// The element type of the floating point data held by a set.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Single,
    Double,
}

/// Scalar types that coefficient buffers can hold.
pub trait FemScalar: RealField + Copy + Default {
    const DATA_TYPE: DataType;
}

impl FemScalar for f32 {
    const DATA_TYPE: DataType = DataType::Single;
}

impl FemScalar for f64 {
    const DATA_TYPE: DataType = DataType::Double;
}
