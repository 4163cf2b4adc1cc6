use groupfem::coefficients::CoefficientOptions;
use groupfem::edges::{Edge, EdgeGrouping, EdgeListOptions};
use groupfem::error::GroupFemError;
use groupfem::set::{AssemblyKind, GroupFemSet, MatrixInitOptions};
use groupfem::sparse::SortedCsr;
use matrixcompare::assert_matrix_eq;
use nalgebra::DVector;
use util::laplacian_2d;

fn laplacian_set(grouping: EdgeGrouping) -> (SortedCsr<f64>, GroupFemSet) {
    let matrix = SortedCsr::from(laplacian_2d(6, 5));
    let options = MatrixInitOptions {
        assembly: AssemblyKind::EdgeBased,
        ..MatrixInitOptions::default()
    };
    let mut set = GroupFemSet::from_matrix(&matrix, &options).unwrap();
    let coefficient_options = CoefficientOptions {
        grouping,
        ..CoefficientOptions::default()
    };
    set.init_coefficients_from_matrix(&matrix, &coefficient_options)
        .unwrap();
    (matrix, set)
}

/// Sum of the off-diagonal entries of every row.
fn off_diagonal_row_sums(matrix: &SortedCsr<f64>) -> DVector<f64> {
    let csr = matrix.csr();
    DVector::from_iterator(
        csr.nrows(),
        csr.row_iter().enumerate().map(|(i, row)| {
            row.col_indices()
                .iter()
                .zip(row.values())
                .filter(|(&j, _)| j != i)
                .map(|(_, v)| *v)
                .sum::<f64>()
        }),
    )
}

#[test]
fn edge_degrees() {
    let (matrix, set) = laplacian_set(EdgeGrouping::Colored);
    let mut degrees = vec![0.0; set.neq()];
    set.accumulate_edges(&mut degrees, |_, _| (1.0, 1.0)).unwrap();

    let csr = matrix.csr();
    for (i, degree) in degrees.iter().enumerate() {
        let row_len = csr.row_offsets()[i + 1] - csr.row_offsets()[i];
        assert_eq!(*degree, (row_len - 1) as f64);
    }
}

#[test]
fn parallel_accumulation_matches_sequential() {
    for grouping in [EdgeGrouping::Single, EdgeGrouping::Colored] {
        let (matrix, set) = laplacian_set(grouping);
        let coefficients = set.edge_coefficients().unwrap();
        let coefficients = coefficients.read();
        let kernel = |e: usize, _: &Edge| {
            let pair = coefficients.chunk(e);
            (pair[0], pair[1])
        };

        let mut sequential = vec![0.0; set.neq()];
        set.accumulate_edges(&mut sequential, kernel).unwrap();
        let mut parallel = vec![0.0; set.neq()];
        set.par_accumulate_edges(&mut parallel, kernel).unwrap();

        let sequential = DVector::from_vec(sequential);
        let parallel = DVector::from_vec(parallel);
        assert_matrix_eq!(sequential, parallel, comp = float);
        assert_matrix_eq!(parallel, off_diagonal_row_sums(&matrix), comp = float);
    }
}

#[test]
fn traversal_requires_edge_structure() {
    let set = GroupFemSet::<f64>::new();
    let mut output: Vec<f64> = Vec::new();
    assert_eq!(
        set.accumulate_edges(&mut output, |_, _| (0.0, 0.0)),
        Err(GroupFemError::MissingEdgeStructure)
    );
}

#[test]
fn traversal_requires_matching_output() {
    let (matrix, mut set) = laplacian_set(EdgeGrouping::Single);
    set.generate_edge_list(&matrix, &EdgeListOptions::default())
        .unwrap();
    let mut output = vec![0.0; 3];
    assert_eq!(
        set.par_accumulate_edges(&mut output, |_, _| (0.0, 0.0)),
        Err(GroupFemError::StructuralMismatch {
            quantity: "NEQ",
            expected: 30,
            found: 3
        })
    );
}
