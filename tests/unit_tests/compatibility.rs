use groupfem::dimensions::Dimensions;
use groupfem::error::{ErrorKind, GroupFemError};
use groupfem::set::{AssemblyKind, GroupFemSet, MatrixInitOptions, SetLayout};
use groupfem::sparse::{BlockMatrix, BlockMatrixKind, BlockVector, InterleavedVector, SortedCsr};
use nalgebra::DVector;
use util::tridiagonal_csr;

fn tridiagonal_set(nvar: usize) -> GroupFemSet {
    GroupFemSet::from_layout(SetLayout {
        assembly: AssemblyKind::EdgeBased,
        dimensions: Dimensions::new(13, 5, 4),
        nvar,
        ..SetLayout::default()
    })
    .unwrap()
}

#[test]
fn matrix_compatibility() {
    let set = tridiagonal_set(1);
    let matrix = SortedCsr::from(tridiagonal_csr(5));
    assert_eq!(set.check_matrix(&matrix), Ok(()));
    assert!(set.is_compatible_with_matrix(&matrix));

    let larger = SortedCsr::from(tridiagonal_csr(6));
    let error = set.check_matrix(&larger).unwrap_err();
    assert_eq!(
        error,
        GroupFemError::StructuralMismatch {
            quantity: "NA",
            expected: 13,
            found: 16
        }
    );
    assert_eq!(error.kind(), ErrorKind::StructuralMismatch);
    assert!(!set.is_compatible_with_matrix(&larger));
}

#[test]
fn restricted_set_checks_restricted_dimensions() {
    let matrix = SortedCsr::from(tridiagonal_csr(5));
    let options = MatrixInitOptions {
        assembly: AssemblyKind::NodeBased,
        dofs: Some(vec![1, 2, 4]),
        ..MatrixInitOptions::default()
    };
    let set = GroupFemSet::<f64>::from_matrix(&matrix, &options).unwrap();
    assert_eq!(set.dimensions(), Dimensions::new(5, 3, 1));
    assert!(set.is_compatible_with_matrix(&matrix));

    // The restriction does not fit into a smaller matrix
    let smaller = SortedCsr::from(tridiagonal_csr(4));
    assert!(!set.is_compatible_with_matrix(&smaller));
}

#[test]
fn vector_compatibility() {
    let set = tridiagonal_set(1);
    assert!(set.is_compatible_with_vector(&DVector::<f64>::zeros(5)));
    assert_eq!(
        set.check_vector(&DVector::<f64>::zeros(4)),
        Err(GroupFemError::StructuralMismatch {
            quantity: "NEQ",
            expected: 5,
            found: 4
        })
    );

    let interleaved = InterleavedVector::from_values(DVector::<f64>::zeros(10), 2);
    assert_eq!(
        set.check_vector(&interleaved),
        Err(GroupFemError::StructuralMismatch {
            quantity: "NVAR",
            expected: 1,
            found: 2
        })
    );
    assert!(tridiagonal_set(2).is_compatible_with_vector(&interleaved));
}

#[test]
fn block_matrix_compatibility() {
    let matrix = SortedCsr::from(tridiagonal_csr(5));
    let single = BlockMatrix::from_single(matrix.clone());
    assert!(tridiagonal_set(1).is_compatible_with_block_matrix(&single));

    let blocks = vec![matrix.clone(), matrix.clone(), matrix.clone(), matrix.clone()];
    let general = BlockMatrix::from_blocks(2, 2, blocks.clone(), BlockMatrixKind::General);
    assert_eq!(
        tridiagonal_set(2).check_block_matrix(&general),
        Err(GroupFemError::NotGroupMatrix(BlockMatrixKind::General))
    );

    let group = BlockMatrix::from_blocks(2, 2, blocks, BlockMatrixKind::GroupMatrix);
    assert!(tridiagonal_set(2).is_compatible_with_block_matrix(&group));
    assert_eq!(
        tridiagonal_set(1).check_block_matrix(&group),
        Err(GroupFemError::StructuralMismatch {
            quantity: "NVAR",
            expected: 1,
            found: 2
        })
    );

    let rectangular = BlockMatrix::from_blocks(2, 1, vec![matrix.clone(), matrix], BlockMatrixKind::GroupMatrix);
    assert!(!tridiagonal_set(2).is_compatible_with_block_matrix(&rectangular));
}

#[test]
fn block_vector_compatibility() {
    let single = BlockVector::from_blocks(vec![DVector::<f64>::zeros(5)]);
    assert!(tridiagonal_set(1).is_compatible_with_block_vector(&single));

    let two = BlockVector::from_blocks(vec![DVector::<f64>::zeros(5), DVector::zeros(5)]);
    assert!(tridiagonal_set(2).is_compatible_with_block_vector(&two));
    assert!(!tridiagonal_set(1).is_compatible_with_block_vector(&two));

    let uneven = BlockVector::from_blocks(vec![DVector::<f64>::zeros(5), DVector::zeros(4)]);
    assert_eq!(
        tridiagonal_set(2).check_block_vector(&uneven),
        Err(GroupFemError::StructuralMismatch {
            quantity: "NEQ",
            expected: 5,
            found: 4
        })
    );
}
