//! Builds an edge-based set for a 2D Laplacian, colors its edges and applies the off-diagonal
//! part of the operator edge by edge.
use groupfem::coefficients::CoefficientOptions;
use groupfem::edges::EdgeGrouping;
use groupfem::set::{AssemblyKind, GroupFemSet, MatrixInitOptions};
use groupfem::sparse::SortedCsr;
use util::laplacian_2d;

fn main() -> eyre::Result<()> {
    let matrix = SortedCsr::from(laplacian_2d(16, 16));
    let options = MatrixInitOptions {
        assembly: AssemblyKind::EdgeBased,
        ..MatrixInitOptions::default()
    };
    let mut set = GroupFemSet::<f64>::from_matrix(&matrix, &options)?;
    let coefficient_options = CoefficientOptions {
        grouping: EdgeGrouping::Colored,
        ..CoefficientOptions::default()
    };
    set.init_coefficients_from_matrix(&matrix, &coefficient_options)?;
    println!("{set}");

    let groups = set
        .edge_groups()
        .ok_or_else(|| eyre::eyre!("edge groups were not generated"))?;
    for (k, group) in groups.iter().enumerate() {
        println!("group {k}: {} edges", group.len());
    }

    let u: Vec<f64> = (0..set.neq()).map(|i| i as f64).collect();
    let coefficients = set
        .edge_coefficients()
        .ok_or_else(|| eyre::eyre!("edge coefficients were not initialized"))?;
    let coefficients = coefficients.read();
    let mut y = vec![0.0; set.neq()];
    set.par_accumulate_edges(&mut y, |e, edge| {
        let pair = coefficients.chunk(e);
        (pair[0] * u[edge.j], pair[1] * u[edge.i])
    })?;

    let norm = y.iter().map(|v| v * v).sum::<f64>().sqrt();
    println!("|A_offdiag u| = {norm:.6}");
    Ok(())
}
