use groupfem::dimensions::{compute_dimensions, Dimensions};
use groupfem::error::GroupFemError;
use groupfem::proptest::symmetric_csr_with_dofs;
use groupfem::sparse::{DiagonalFirstCsr, SortedCsr};
use proptest::prelude::*;
use util::tridiagonal_csr;

#[test]
fn tridiagonal_dimensions() {
    let matrix = SortedCsr::from(tridiagonal_csr(5));
    let dims = compute_dimensions(&matrix, None).unwrap();
    assert_eq!(dims, Dimensions::new(13, 5, 4));
}

#[test]
fn restricted_tridiagonal_dimensions() {
    // Keeping 0, 1 and 3 leaves the entries (0, 0), (0, 1), (1, 0), (1, 1) and (3, 3)
    let matrix = SortedCsr::from(tridiagonal_csr(5));
    let dims = compute_dimensions(&matrix, Some(&[3, 0, 1, 3][..])).unwrap();
    assert_eq!(dims, Dimensions::new(5, 3, 1));
}

#[test]
fn restriction_out_of_bounds_is_rejected() {
    let matrix = SortedCsr::from(tridiagonal_csr(3));
    assert_eq!(
        compute_dimensions(&matrix, Some(&[1, 3][..])),
        Err(GroupFemError::DofOutOfBounds { dof: 3, bound: 3 })
    );
}

#[test]
fn empty_matrix_has_no_edges() {
    let matrix = SortedCsr::from(tridiagonal_csr(0));
    assert_eq!(compute_dimensions(&matrix, None).unwrap(), Dimensions::default());
}

proptest! {
    #[test]
    fn restricted_dimensions_are_consistent((matrix, dofs) in symmetric_csr_with_dofs(8)) {
        let sorted = SortedCsr::from(matrix.clone());
        let diagonal_first = DiagonalFirstCsr::from_csr(&matrix).unwrap();

        let dims = compute_dimensions(&sorted, Some(dofs.as_slice())).unwrap();
        prop_assert_eq!(dims, compute_dimensions(&diagonal_first, Some(dofs.as_slice())).unwrap());
        prop_assert_eq!(dims.neq, dofs.len());
        // Every active row keeps its diagonal, the remaining entries come in pairs
        prop_assert!(dims.na >= dims.neq);
        prop_assert_eq!((dims.na - dims.neq) % 2, 0);
        prop_assert_eq!(dims.nedge, (dims.na - dims.neq) / 2);

        let full = compute_dimensions(&sorted, None).unwrap();
        prop_assert!(dims.na <= full.na);
        prop_assert!(dims.nedge <= full.nedge);
    }
}
