//! Group-wise traversal of the edges of a set.
//!
//! Groups are processed one after another. The edges of a group whose edges share no node are
//! processed in parallel, since each of them scatters to its own pair of nodes.
use crate::edges::Edge;
use crate::error::GroupFemError;
use crate::set::{DataCategory, GroupFemSet};
use crate::storage::Buffer;
use crate::FemScalar;
use groupfem_paradis::DisjointSubsets;
use std::ops::Range;

impl<T: FemScalar> GroupFemSet<T> {
    fn traversal_groups(&self, output_len: usize) -> Result<(Buffer<Edge>, Vec<Range<usize>>), GroupFemError> {
        if !self.has(DataCategory::EdgeStructure) {
            return Err(GroupFemError::MissingEdgeStructure);
        }
        let edges = self
            .edge_list()
            .ok_or(GroupFemError::MissingEdgeStructure)?;
        let groups = self
            .edge_groups()
            .ok_or(GroupFemError::MissingEdgeStructure)?;
        if output_len != self.neq() {
            return Err(GroupFemError::StructuralMismatch {
                quantity: "NEQ",
                expected: self.neq(),
                found: output_len,
            });
        }
        Ok((edges, groups))
    }

    /// Adds the contributions `kernel(e, edge) = (to_i, to_j)` of every edge to `output[edge.i]`
    /// and `output[edge.j]`, group by group.
    pub fn accumulate_edges<F>(&self, output: &mut [T], mut kernel: F) -> Result<(), GroupFemError>
    where
        F: FnMut(usize, &Edge) -> (T, T),
    {
        let (edges, groups) = self.traversal_groups(output.len())?;
        let edges = edges.read();
        let edges = edges.as_slice();
        for group in groups {
            for e in group {
                let edge = &edges[e];
                let (to_i, to_j) = kernel(e, edge);
                output[edge.i] += to_i;
                output[edge.j] += to_j;
            }
        }
        Ok(())
    }

    /// Parallel version of [`accumulate_edges`](Self::accumulate_edges).
    ///
    /// Groups are verified to be free of shared nodes before their edges are processed in
    /// parallel. Groups that fail the check, such as the single group of an uncolored edge list,
    /// are processed sequentially.
    pub fn par_accumulate_edges<F>(&self, output: &mut [T], kernel: F) -> Result<(), GroupFemError>
    where
        F: Fn(usize, &Edge) -> (T, T) + Sync + Send,
    {
        let (edges, groups) = self.traversal_groups(output.len())?;
        let edges = edges.read();
        let edges = edges.as_slice();
        let node_pairs: Vec<[usize; 2]> = edges.iter().map(Edge::nodes).collect();

        for group in groups {
            match DisjointSubsets::try_from_labels(&node_pairs, group.clone().collect()) {
                Ok(subsets) => {
                    subsets.par_for_each_subset(&node_pairs, &mut *output, |mut access| {
                        let e = access.label();
                        let (to_i, to_j) = kernel(e, &edges[e]);
                        *access.get_mut(0) += to_i;
                        *access.get_mut(1) += to_j;
                    });
                }
                Err(_) => {
                    log::debug!("Edge group {:?} shares nodes, processing it sequentially", group);
                    for e in group {
                        let edge = &edges[e];
                        let (to_i, to_j) = kernel(e, edge);
                        output[edge.i] += to_i;
                        output[edge.j] += to_j;
                    }
                }
            }
        }
        Ok(())
    }
}
