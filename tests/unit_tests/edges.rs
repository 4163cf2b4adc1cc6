use groupfem::dimensions::{compute_dimensions, Dimensions};
use groupfem::edges::{build_edge_list, group_edges, Edge, EdgeGrouping, EdgeListOptions};
use groupfem::error::GroupFemError;
use groupfem::proptest::{symmetric_csr, symmetric_csr_with_dofs};
use groupfem::set::{
    AssemblyKind, DataCategory, DuplicationMask, GroupFemSet, MatrixInitOptions, SetLayout, TransferOptions,
};
use groupfem::sparse::{DiagonalFirstCsr, MatrixSource, SortedCsr};
use groupfem::OwnershipWarning;
use nalgebra::DMatrix;
use nalgebra_sparse::CsrMatrix;
use proptest::prelude::*;
use std::collections::HashSet;
use util::{laplacian_2d, laplacian_2d_edge_count, tridiagonal_csr};

fn edge(i: usize, j: usize, ij: usize, ji: usize) -> Edge {
    Edge { i, j, ij, ji }
}

#[test]
fn sorted_csr_edge_list() {
    let matrix = SortedCsr::from(tridiagonal_csr(5));
    let edges = build_edge_list(&matrix, None).unwrap();
    assert_eq!(
        edges,
        vec![edge(0, 1, 1, 2), edge(1, 2, 4, 5), edge(2, 3, 7, 8), edge(3, 4, 10, 11)]
    );
}

#[test]
fn diagonal_first_csr_edge_list() {
    let matrix = DiagonalFirstCsr::from_csr(&tridiagonal_csr(5)).unwrap();
    let edges = build_edge_list(&matrix, None).unwrap();
    assert_eq!(
        edges,
        vec![edge(0, 1, 1, 3), edge(1, 2, 4, 6), edge(2, 3, 7, 9), edge(3, 4, 10, 12)]
    );
}

#[test]
fn dense_edge_list_uses_column_major_positions() {
    let matrix = DMatrix::<f64>::zeros(3, 3);
    let edges = build_edge_list(&matrix, None).unwrap();
    assert_eq!(edges, vec![edge(0, 1, 3, 1), edge(0, 2, 6, 2), edge(1, 2, 7, 5)]);
}

#[test]
fn restricted_edge_list_renumbers_nodes() {
    let matrix = SortedCsr::from(tridiagonal_csr(5));
    let edges = build_edge_list(&matrix, Some(&[4, 2, 1][..])).unwrap();
    // Only the edge between 1 and 2 survives, its positions refer to the full matrix
    assert_eq!(edges, vec![edge(0, 1, 4, 5)]);
}

#[test]
fn non_symmetric_structure_is_rejected() {
    let dense = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 0.0, 1.0]);
    let matrix = SortedCsr::from(CsrMatrix::from(&dense));
    assert_eq!(
        build_edge_list(&matrix, None),
        Err(GroupFemError::MissingTransposedEntry { row: 0, col: 1 })
    );

    let dense = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 1.0, 1.0]);
    let matrix = SortedCsr::from(CsrMatrix::from(&dense));
    assert_eq!(
        build_edge_list(&matrix, None),
        Err(GroupFemError::MissingTransposedEntry { row: 1, col: 0 })
    );
}

#[test]
fn non_square_matrix_is_rejected() {
    let matrix = DMatrix::<f64>::zeros(2, 3);
    assert_eq!(
        build_edge_list(&matrix, None),
        Err(GroupFemError::NotSquare { nrows: 2, ncols: 3 })
    );
}

#[test]
fn generation_adopts_edge_count() {
    let matrix = SortedCsr::from(tridiagonal_csr(5));
    let mut set = GroupFemSet::<f64>::from_layout(SetLayout {
        assembly: AssemblyKind::EdgeBased,
        dimensions: Dimensions::new(13, 5, 0),
        ncoeffs_at_edge: 2,
        ..SetLayout::default()
    })
    .unwrap();
    assert_eq!(set.edge_coefficients().unwrap().shape().dims(), &[2, 2, 0]);

    let warnings = set
        .generate_edge_list(&matrix, &EdgeListOptions::default())
        .unwrap();
    assert!(warnings.is_empty());
    assert_eq!(set.nedge(), 4);
    assert!(set.has(DataCategory::EdgeStructure));
    assert_eq!(set.edge_list().unwrap().len(), 4);
    assert_eq!(set.edge_groups().unwrap(), vec![0..4]);
    // Edge coefficients follow the adopted edge count
    assert_eq!(set.edge_coefficients().unwrap().shape().dims(), &[2, 2, 4]);
}

#[test]
fn generation_rejects_edge_count_mismatch() {
    let matrix = SortedCsr::from(tridiagonal_csr(5));
    let mut set = GroupFemSet::<f64>::from_layout(SetLayout {
        assembly: AssemblyKind::EdgeBased,
        dimensions: Dimensions::new(13, 5, 7),
        ..SetLayout::default()
    })
    .unwrap();
    assert_eq!(
        set.generate_edge_list(&matrix, &EdgeListOptions::default()),
        Err(GroupFemError::EdgeCountMismatch { expected: 7, generated: 4 })
    );
    assert!(set.edge_list().is_none());
    assert!(!set.has(DataCategory::EdgeStructure));
}

#[test]
fn generation_does_not_adopt_edge_count_into_aliased_structure() {
    let matrix = SortedCsr::from(tridiagonal_csr(5));
    let owner = GroupFemSet::<f64>::from_layout(SetLayout {
        assembly: AssemblyKind::EdgeBased,
        dimensions: Dimensions::new(13, 5, 0),
        ..SetLayout::default()
    })
    .unwrap();
    let mut set = GroupFemSet::new();
    set.duplicate_from(&owner, &TransferOptions::new(DuplicationMask::STRUCTURE));

    let warnings = set
        .generate_edge_list(&matrix, &EdgeListOptions::default())
        .unwrap();
    assert_eq!(
        warnings,
        vec![OwnershipWarning {
            category: DataCategory::Structure,
            operation: "edge list generation",
        }]
    );
    assert_eq!(set.nedge(), 0);
    assert!(set.edge_list().is_none());
    assert!(!set.has(DataCategory::EdgeStructure));
    assert_eq!(owner.nedge(), 0);
}

#[test]
fn generation_is_idempotent() {
    let matrix = SortedCsr::from(laplacian_2d(4, 3));
    let options = MatrixInitOptions {
        assembly: AssemblyKind::EdgeBased,
        ..MatrixInitOptions::default()
    };
    let mut set = GroupFemSet::<f64>::from_matrix(&matrix, &options).unwrap();
    let edge_options = EdgeListOptions {
        dofs: None,
        grouping: EdgeGrouping::Colored,
    };

    set.generate_edge_list(&matrix, &edge_options).unwrap();
    let edges = set.edge_list().unwrap().to_vec();
    let offsets = set.edge_group_offsets().unwrap().to_vec();
    set.generate_edge_list(&matrix, &edge_options).unwrap();

    assert_eq!(set.edge_list().unwrap().to_vec(), edges);
    assert_eq!(set.edge_group_offsets().unwrap().to_vec(), offsets);
    assert_eq!(edges.len(), laplacian_2d_edge_count(4, 3));
}

#[test]
fn aliased_edge_structure_is_not_regenerated() {
    let matrix = SortedCsr::from(tridiagonal_csr(5));
    let options = MatrixInitOptions {
        assembly: AssemblyKind::EdgeBased,
        ..MatrixInitOptions::default()
    };
    let mut owner = GroupFemSet::<f64>::from_matrix(&matrix, &options).unwrap();
    owner
        .generate_edge_list(&matrix, &EdgeListOptions::default())
        .unwrap();

    let mut alias = GroupFemSet::new();
    alias.duplicate_from(&owner, &TransferOptions::new(DuplicationMask::ALL));
    let colored = EdgeListOptions {
        dofs: None,
        grouping: EdgeGrouping::Colored,
    };
    let warnings = alias.generate_edge_list(&matrix, &colored).unwrap();
    assert_eq!(
        warnings,
        vec![OwnershipWarning {
            category: DataCategory::EdgeStructure,
            operation: "edge list generation",
        }]
    );
    assert_eq!(owner.edge_groups().unwrap(), vec![0..4]);
    assert_eq!(alias.edge_groups().unwrap(), vec![0..4]);
}

#[test]
fn restricted_generation_requires_matching_scope() {
    let matrix = SortedCsr::from(tridiagonal_csr(5));
    let options = MatrixInitOptions {
        assembly: AssemblyKind::EdgeBased,
        dofs: Some(vec![1, 2, 4]),
        ..MatrixInitOptions::default()
    };
    let mut set = GroupFemSet::<f64>::from_matrix(&matrix, &options).unwrap();
    assert_eq!(
        set.generate_edge_list(&matrix, &EdgeListOptions::default()),
        Err(GroupFemError::DofRestrictionMismatch)
    );

    let restricted = EdgeListOptions {
        dofs: Some(vec![1, 2, 4]),
        grouping: EdgeGrouping::Single,
    };
    set.generate_edge_list(&matrix, &restricted).unwrap();
    assert_eq!(set.edge_list().unwrap().to_vec(), vec![edge(0, 1, 4, 5)]);
}

#[test]
fn colored_laplacian_groups_are_conflict_free() {
    let matrix = SortedCsr::from(laplacian_2d(5, 4));
    let edges = build_edge_list(&matrix, None).unwrap();
    let (grouped, offsets) = group_edges(edges.clone(), EdgeGrouping::Colored);

    assert_eq!(offsets.first(), Some(&0));
    assert_eq!(offsets.last(), Some(&edges.len()));
    // A grid graph has maximum degree 4
    assert!(offsets.len() - 1 <= 7);
    for window in offsets.windows(2) {
        let mut nodes = HashSet::new();
        for edge in &grouped[window[0]..window[1]] {
            assert!(nodes.insert(edge.i));
            assert!(nodes.insert(edge.j));
        }
    }
}

proptest! {
    #[test]
    fn edge_count_matches_dimensions((matrix, dofs) in symmetric_csr_with_dofs(8)) {
        let matrix = SortedCsr::from(matrix);
        let dims = compute_dimensions(&matrix, Some(dofs.as_slice())).unwrap();
        let edges = build_edge_list(&matrix, Some(dofs.as_slice())).unwrap();
        prop_assert_eq!(edges.len(), dims.nedge);
        for edge in &edges {
            prop_assert!(edge.i < edge.j);
            prop_assert!(edge.j < dims.neq);
        }
    }

    #[test]
    fn formats_agree_on_edge_values(matrix in symmetric_csr(8)) {
        let sorted = SortedCsr::from(matrix.clone());
        let diagonal_first = DiagonalFirstCsr::from_csr(&matrix).unwrap();
        let sorted_edges = build_edge_list(&sorted, None).unwrap();
        let diagonal_first_edges = build_edge_list(&diagonal_first, None).unwrap();

        prop_assert_eq!(sorted_edges.len(), diagonal_first_edges.len());
        for (a, b) in sorted_edges.iter().zip(&diagonal_first_edges) {
            prop_assert_eq!((a.i, a.j), (b.i, b.j));
            prop_assert_eq!(sorted.values()[a.ij], diagonal_first.values()[b.ij]);
            prop_assert_eq!(sorted.values()[a.ji], diagonal_first.values()[b.ji]);
        }
    }

    #[test]
    fn colored_groups_partition_the_edges(matrix in symmetric_csr(10)) {
        let edges = build_edge_list(&SortedCsr::from(matrix), None).unwrap();
        let (grouped, offsets) = group_edges(edges.clone(), EdgeGrouping::Colored);

        let mut sorted_grouped = grouped.clone();
        sorted_grouped.sort_by_key(|edge| (edge.i, edge.j));
        prop_assert_eq!(sorted_grouped, edges);

        for window in offsets.windows(2) {
            let mut nodes = HashSet::new();
            for edge in &grouped[window[0]..window[1]] {
                prop_assert!(nodes.insert(edge.i));
                prop_assert!(nodes.insert(edge.j));
            }
        }
    }
}
