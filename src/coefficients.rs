//! Copying matrix values into coefficient buffers.
//!
//! Every source matrix fills one *layer* of the coefficient buffers, i.e. one position in the
//! coefficient stack of each node or edge. Node-based sets receive one stack per stored entry,
//! edge-based sets one stack per equation (the diagonal) and a pair of stacks per edge.
use crate::dimensions::{for_each_active_entry, restricted_dimensions, Dimensions, DofMask};
use crate::edges::{EdgeGrouping, EdgeListOptions};
use crate::error::{GroupFemError, OwnershipWarning};
use crate::set::{AssemblyKind, DataCategory, GroupFemSet, Presence};
use crate::sparse::MatrixSource;
use crate::storage::{Buffer, BufferHandle, Shape};
use crate::FemScalar;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoefficientOptions {
    /// Target layer of each source. Defaults to `0, 1, 2, ...`.
    pub layers: Option<Vec<usize>>,
    /// Only copy coefficients of these degrees of freedom. Must match the restriction the set
    /// structure was derived for.
    pub dofs: Option<Vec<usize>>,
    /// Grouping used if the edge list has to be generated.
    pub grouping: EdgeGrouping,
}

impl<T: FemScalar> GroupFemSet<T> {
    /// Copies the values of a single matrix into layer 0 (or the requested layer) of the
    /// coefficient buffers.
    pub fn init_coefficients_from_matrix<M>(
        &mut self,
        source: &M,
        options: &CoefficientOptions,
    ) -> Result<Vec<OwnershipWarning>, GroupFemError>
    where
        M: ?Sized + MatrixSource<T>,
    {
        self.init_coefficients_from_matrices(&[source], options)
    }

    /// Copies the values of several matrices of identical structure into the coefficient buffers,
    /// one layer per matrix.
    ///
    /// Missing coefficient buffers are allocated with one layer more than the highest requested
    /// layer. Edge-based sets generate their edge list from the first matrix if they have none.
    /// Aliased coefficient buffers are left untouched and reported.
    pub fn init_coefficients_from_matrices<M>(
        &mut self,
        sources: &[&M],
        options: &CoefficientOptions,
    ) -> Result<Vec<OwnershipWarning>, GroupFemError>
    where
        M: ?Sized + MatrixSource<T>,
    {
        let first = *sources.first().ok_or(GroupFemError::EmptySourceList)?;
        let layers = match &options.layers {
            None => (0..sources.len()).collect(),
            Some(layers) if layers.len() == sources.len() => layers.clone(),
            Some(layers) => {
                return Err(GroupFemError::ArraySizeMismatch {
                    what: "coefficient layers",
                    expected: sources.len(),
                    found: layers.len(),
                })
            }
        };
        // Non-empty, since the source list is non-empty
        let max_layer = layers.iter().copied().max().unwrap_or_default();

        for source in &sources[1..] {
            if source.format() != first.format() {
                return Err(GroupFemError::FormatMismatch {
                    expected: first.format(),
                    found: source.format(),
                });
            }
            check_equal("number of rows", first.nrows(), source.nrows())?;
            check_equal("number of columns", first.ncols(), source.ncols())?;
            check_equal("number of stored entries", first.nnz(), source.nnz())?;
        }

        let mask = options
            .dofs
            .as_deref()
            .map(|dofs| DofMask::for_layout(first, dofs))
            .transpose()?;
        if !self.dof_scope.admits(mask.as_ref()) {
            return Err(GroupFemError::DofRestrictionMismatch);
        }
        let source_dimensions = match &mask {
            None => Dimensions::symmetric(first.nnz(), first.nrows()),
            Some(mask) => restricted_dimensions(first, mask),
        };

        let sources: Vec<(&M, usize)> = sources.iter().copied().zip(layers).collect();
        match self.assembly {
            AssemblyKind::Undefined => Err(GroupFemError::UnsupportedAssemblyKind(self.assembly)),
            AssemblyKind::NodeBased => {
                check_equal("number of stored entries", self.dimensions.na, source_dimensions.na)?;
                self.populate_node_based(&sources, max_layer, mask.as_ref())
            }
            AssemblyKind::EdgeBased => {
                check_equal("number of equations", self.dimensions.neq, source_dimensions.neq)?;
                self.populate_edge_based(&sources, max_layer, mask.as_ref(), options)
            }
        }
    }

    fn populate_node_based<M>(
        &mut self,
        sources: &[(&M, usize)],
        max_layer: usize,
        mask: Option<&DofMask>,
    ) -> Result<Vec<OwnershipWarning>, GroupFemError>
    where
        M: ?Sized + MatrixSource<T>,
    {
        if self.is_aliased(DataCategory::NodeData) {
            return Ok(vec![OwnershipWarning::emit(
                DataCategory::NodeData,
                "coefficient initialization",
            )]);
        }
        check_capacity(&self.node_coefficients, max_layer)?;
        check_extent(&self.node_coefficients, "number of stored entries", self.dimensions.na)?;

        let shape = Shape::matrix(max_layer + 1, self.dimensions.na);
        let buffer = owned_or_allocate(
            &mut self.node_coefficients,
            &mut self.ncoeffs_at_node,
            "CoeffsAtNode",
            shape,
        );
        let mut coefficients = buffer.write();
        let ncoeffs = coefficients.shape().dims()[0];
        let data = coefficients.as_mut_slice();

        match mask {
            None => {
                for &(source, layer) in sources {
                    for (position, &value) in source.values().iter().enumerate() {
                        data[layer + position * ncoeffs] = value;
                    }
                }
            }
            Some(mask) => {
                let first = sources[0].0;
                let mut slot = 0;
                for_each_active_entry(first, Some(mask), |_, _, _, position| {
                    for &(source, layer) in sources {
                        data[layer + slot * ncoeffs] = source.values()[position];
                    }
                    slot += 1;
                });
            }
        }

        self.presence[DataCategory::NodeData] = Presence::Present;
        Ok(Vec::new())
    }

    fn populate_edge_based<M>(
        &mut self,
        sources: &[(&M, usize)],
        max_layer: usize,
        mask: Option<&DofMask>,
        options: &CoefficientOptions,
    ) -> Result<Vec<OwnershipWarning>, GroupFemError>
    where
        M: ?Sized + MatrixSource<T>,
    {
        let first = sources[0].0;
        let fill_nodes = !self.is_aliased(DataCategory::NodeData);
        let fill_edges = !self.is_aliased(DataCategory::EdgeData);
        if fill_nodes {
            check_capacity(&self.node_coefficients, max_layer)?;
            check_extent(&self.node_coefficients, "number of equations", self.dimensions.neq)?;
        }
        if fill_edges {
            check_capacity(&self.edge_coefficients, max_layer)?;
        }

        // Diagonal positions of the active equations
        let rows: Vec<usize> = match mask {
            None => (0..first.nrows()).collect(),
            Some(mask) => mask
                .dofs()
                .iter()
                .copied()
                .filter(|&dof| dof < first.nrows())
                .collect(),
        };
        let diagonal = rows
            .iter()
            .map(|&row| {
                first
                    .diagonal_position(row)
                    .ok_or(GroupFemError::MissingDiagonalEntry { row })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut warnings = Vec::new();
        if self.edge_list().is_none() || !self.has(DataCategory::EdgeStructure) {
            let edge_options = EdgeListOptions {
                dofs: options.dofs.clone(),
                grouping: options.grouping,
            };
            warnings.extend(self.generate_edge_list(first, &edge_options)?);
        }
        let edges = self.edge_list().ok_or(GroupFemError::MissingEdgeStructure)?;
        let edges = edges.read();
        if fill_edges {
            check_extent(&self.edge_coefficients, "number of edges", edges.len())?;
        }

        if fill_nodes {
            let shape = Shape::matrix(max_layer + 1, self.dimensions.neq);
            let buffer = owned_or_allocate(
                &mut self.node_coefficients,
                &mut self.ncoeffs_at_node,
                "CoeffsAtNode",
                shape,
            );
            let mut coefficients = buffer.write();
            let ncoeffs = coefficients.shape().dims()[0];
            let data = coefficients.as_mut_slice();
            for &(source, layer) in sources {
                let values = source.values();
                for (eq, &position) in diagonal.iter().enumerate() {
                    data[layer + eq * ncoeffs] = values[position];
                }
            }
            self.presence[DataCategory::NodeData] = Presence::Present;
        } else {
            warnings.push(OwnershipWarning::emit(DataCategory::NodeData, "coefficient initialization"));
        }

        if fill_edges {
            let shape = Shape::tensor3(max_layer + 1, 2, edges.len());
            let buffer = owned_or_allocate(
                &mut self.edge_coefficients,
                &mut self.ncoeffs_at_edge,
                "CoeffsAtEdge",
                shape,
            );
            let mut coefficients = buffer.write();
            let ncoeffs = coefficients.shape().dims()[0];
            let data = coefficients.as_mut_slice();
            for &(source, layer) in sources {
                let values = source.values();
                for (e, edge) in edges.as_slice().iter().enumerate() {
                    data[layer + e * 2 * ncoeffs] = values[edge.ij];
                    data[layer + ncoeffs + e * 2 * ncoeffs] = values[edge.ji];
                }
            }
            self.presence[DataCategory::EdgeData] = Presence::Present;
        } else {
            warnings.push(OwnershipWarning::emit(DataCategory::EdgeData, "coefficient initialization"));
        }

        Ok(warnings)
    }
}

fn check_equal(quantity: &'static str, expected: usize, found: usize) -> Result<(), GroupFemError> {
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

fn check_capacity<T>(handle: &Option<BufferHandle<T>>, max_layer: usize) -> Result<(), GroupFemError> {
    if let Some(buffer) = handle.as_ref().and_then(BufferHandle::owned) {
        let capacity = buffer.shape().dims()[0];
        if max_layer >= capacity {
            return Err(GroupFemError::LayerOutOfRange {
                layer: max_layer,
                capacity,
            });
        }
    }
    Ok(())
}

/// An owned buffer must span `expected` nodes or edges before it is written to.
fn check_extent<T>(
    handle: &Option<BufferHandle<T>>,
    quantity: &'static str,
    expected: usize,
) -> Result<(), GroupFemError> {
    match handle.as_ref().and_then(BufferHandle::owned) {
        Some(buffer) => check_equal(quantity, expected, buffer.shape().extent()),
        None => Ok(()),
    }
}

/// The owned buffer of `slot`, or a newly allocated one of the given shape.
fn owned_or_allocate<T: FemScalar>(
    slot: &mut Option<BufferHandle<T>>,
    ncoeffs: &mut usize,
    name: &str,
    shape: Shape,
) -> Buffer<T> {
    if let Some(BufferHandle::Owned(buffer)) = slot {
        return buffer.clone();
    }
    let buffer = Buffer::allocate(name, shape);
    *ncoeffs = shape.dims()[0];
    *slot = Some(BufferHandle::Owned(buffer.clone()));
    buffer
}
