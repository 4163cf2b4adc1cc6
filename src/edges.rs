//! Edge lists derived from the structure of a sparse matrix.
//!
//! Every pair of distinct coupled degrees of freedom `i < j` forms one edge, which records the
//! positions of both off-diagonal entries `(i, j)` and `(j, i)` in the value array of the matrix.
//! The edges can be partitioned into groups of edges without shared endpoints, so that all edges
//! of a group can scatter to their nodes concurrently.
use crate::dimensions::{for_each_active_entry, DofMask};
use crate::error::{GroupFemError, OwnershipWarning};
use crate::set::{DataCategory, DofScope, GroupFemSet, Presence};
use crate::sparse::SparseLayout;
use crate::storage::{store_owned, Shape};
use crate::FemScalar;
use groupfem_paradis::coloring::sequential_greedy_coloring;
use serde::{Deserialize, Serialize};

/// An edge between the nodes `i` and `j`, with the positions `ij` and `ji` of its two
/// off-diagonal entries.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub i: usize,
    pub j: usize,
    pub ij: usize,
    pub ji: usize,
}

impl Edge {
    pub fn nodes(&self) -> [usize; 2] {
        [self.i, self.j]
    }
}

/// How edges are partitioned into groups.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeGrouping {
    /// All edges form a single group.
    #[default]
    Single,
    /// Greedy coloring: edges within a group share no node.
    Colored,
    /// Colored if the rayon thread pool has more than one thread, otherwise single.
    Auto,
}

impl EdgeGrouping {
    fn is_colored(self) -> bool {
        match self {
            EdgeGrouping::Single => false,
            EdgeGrouping::Colored => true,
            EdgeGrouping::Auto => rayon::current_num_threads() > 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeListOptions {
    /// Only generate edges between these degrees of freedom.
    pub dofs: Option<Vec<usize>>,
    pub grouping: EdgeGrouping,
}

/// Builds the edge list of a structurally symmetric square matrix.
///
/// Edges are emitted row by row in the order of the stored entries. With a restriction, only
/// entries whose row and column are both active contribute, and node indices are renumbered to
/// their rank among the active degrees of freedom. Positions always refer to the full matrix.
pub fn build_edge_list<L>(layout: &L, dofs: Option<&[usize]>) -> Result<Vec<Edge>, GroupFemError>
where
    L: ?Sized + SparseLayout,
{
    if !layout.is_square() {
        return Err(GroupFemError::NotSquare {
            nrows: layout.nrows(),
            ncols: layout.ncols(),
        });
    }
    let mask = dofs
        .map(|dofs| DofMask::for_layout(layout, dofs))
        .transpose()?;
    collect_edges(layout, mask.as_ref())
}

fn collect_edges<L>(layout: &L, mask: Option<&DofMask>) -> Result<Vec<Edge>, GroupFemError>
where
    L: ?Sized + SparseLayout,
{
    let local_index = |dof: usize| mask.map_or(Some(dof), |mask| mask.local_index(dof));

    let mut edges = Vec::new();
    let mut result = Ok(());
    for_each_active_entry(layout, mask, |local_row, row, col, ij| {
        if result.is_err() || row == col {
            return;
        }
        match layout.find_entry(col, row) {
            None => result = Err(GroupFemError::MissingTransposedEntry { row, col }),
            Some(ji) if row < col => {
                if let Some(j) = local_index(col) {
                    edges.push(Edge { i: local_row, j, ij, ji });
                }
            }
            // The lower triangle only needs its transposes to exist
            Some(_) => {}
        }
    });
    result.map(|_| edges)
}

/// Partitions the edges into groups and returns the reordered edges with the group offsets.
///
/// Group `k` consists of the edges `offsets[k] .. offsets[k + 1]`. There is always at least one
/// group, possibly empty.
pub fn group_edges(edges: Vec<Edge>, grouping: EdgeGrouping) -> (Vec<Edge>, Vec<usize>) {
    if !grouping.is_colored() {
        let nedge = edges.len();
        return (edges, vec![0, nedge]);
    }

    let node_pairs: Vec<[usize; 2]> = edges.iter().map(Edge::nodes).collect();
    let colors = sequential_greedy_coloring(&node_pairs);

    let mut grouped = Vec::with_capacity(edges.len());
    let mut offsets = vec![0];
    for color in &colors {
        grouped.extend(color.labels().iter().map(|&label| edges[label]));
        offsets.push(grouped.len());
    }
    if colors.is_empty() {
        offsets.push(0);
    }
    (grouped, offsets)
}

impl<T: FemScalar> GroupFemSet<T> {
    /// Generates the edge list and the edge-group index from the structure of a matrix.
    ///
    /// If the set does not know its number of edges yet, it adopts the generated count (and
    /// resizes its edge coefficients accordingly), otherwise the counts must agree. A set whose
    /// edge structure is aliased, or that would have to adopt a count into aliased dimensions,
    /// is left unchanged and a warning is returned.
    pub fn generate_edge_list<L>(
        &mut self,
        source: &L,
        options: &EdgeListOptions,
    ) -> Result<Vec<OwnershipWarning>, GroupFemError>
    where
        L: ?Sized + SparseLayout,
    {
        if self.is_aliased(DataCategory::EdgeStructure) {
            return Ok(vec![OwnershipWarning::emit(
                DataCategory::EdgeStructure,
                "edge list generation",
            )]);
        }
        if !source.is_square() {
            return Err(GroupFemError::NotSquare {
                nrows: source.nrows(),
                ncols: source.ncols(),
            });
        }

        let mask = options
            .dofs
            .as_deref()
            .map(|dofs| DofMask::for_layout(source, dofs))
            .transpose()?;
        if !self.dof_scope.admits(mask.as_ref()) {
            return Err(GroupFemError::DofRestrictionMismatch);
        }

        let edges = collect_edges(source, mask.as_ref())?;
        let expected = self.dimensions.nedge;
        if expected != 0 && expected != edges.len() {
            return Err(GroupFemError::EdgeCountMismatch {
                expected,
                generated: edges.len(),
            });
        }

        let adopt_count = expected == 0 && !edges.is_empty();
        if adopt_count && self.is_aliased(DataCategory::Structure) {
            return Ok(vec![OwnershipWarning::emit(
                DataCategory::Structure,
                "edge list generation",
            )]);
        }

        let (edges, offsets) = group_edges(edges, options.grouping);
        log::debug!(
            "Generated {} edges in {} groups ({:?} grouping)",
            edges.len(),
            offsets.len() - 1,
            options.grouping
        );

        let mut warnings = Vec::new();
        if adopt_count {
            let mut dimensions = self.dimensions;
            dimensions.nedge = edges.len();
            warnings = self.resize(dimensions);
        }

        self.format = Some(source.format());
        self.dof_scope = DofScope::from_mask(mask.as_ref());
        store_owned(&mut self.edge_list, "EdgeList", Shape::vector(edges.len()), edges);
        store_owned(
            &mut self.edge_group_offsets,
            "EdgeGroupOffsets",
            Shape::vector(offsets.len()),
            offsets,
        );
        self.presence[DataCategory::EdgeStructure] = Presence::Present;
        Ok(warnings)
    }
}
