//! CLT Solver Example - Quasi-isotropic panel under combined loading

use clt_solver::prelude::*;

fn main() {
    env_logger::init();

    println!("=== CLT Solver Example: Quasi-Isotropic Panel ===\n");

    let mat = Material::t300_5208();
    let half = Laminate::from_angles(0, mat.ply_thickness(), &[0.0, 45.0, -45.0, 90.0])
        .expect("Invalid layup");

    let mut model = LaminateModel::new(vec![mat], half.symmetric())
        .expect("Failed to create model")
        .with_geometry(Geometry::FlatPanel { width: 0.15 });

    // Running loads in N/m and N·m/m
    model
        .add_load_case(LoadCase::axial("Compression", -4.0e4).with_description("Axial compression"))
        .unwrap();
    model.add_load_case(LoadCase::shear("Shear", 2.5e4)).unwrap();
    model
        .add_load_case(LoadCase::forces("Combined", [1.0e5, 2.0e4, 1.0e4, 5.0, 0.0, 0.0]))
        .unwrap();

    for theory in [FailureTheory::MaxStress, FailureTheory::TsaiWu, FailureTheory::HashinRotem] {
        let options = AnalysisOptions::default().with_theory(theory);
        let results = model.analyze(&options).expect("Analysis failed");

        println!("--- Failure theory: {} ---\n", theory);

        if theory == FailureTheory::MaxStress {
            let p = &results.properties;
            println!("Laminate:");
            println!("  h = {:.3}mm, areal density = {:.3}kg/m²", results.thickness * 1e3, results.areal_density);
            println!("  Ex = {:.2}GPa, Ey = {:.2}GPa, Gxy = {:.2}GPa, nuxy = {:.3}", p.ex / 1e9, p.ey / 1e9, p.gxy / 1e9, p.nuxy);
            println!("  Exb = {:.2}GPa, Eyb = {:.2}GPa", p.exb / 1e9, p.eyb / 1e9);

            if let Some(BucklingResults::FlatPanel { uniaxial, shear }) = results.buckling {
                println!("\nBuckling (b = 150mm):");
                println!("  Nx_cr = {:.2}kN/m (strain {:.0}µε)", uniaxial.load / 1e3, uniaxial.strain * 1e6);
                println!("  Nxy_cr = {:.2}kN/m (strain {:.0}µε)", shear.load / 1e3, shear.strain * 1e6);
            }
            println!();
        }

        for case in &results.load_cases {
            let critical = &case.plies[case.critical_ply];
            println!(
                "  {}: SF = {:.3} in ply {} ({} deg, {})",
                case.name,
                case.min_safety_factor,
                critical.group,
                critical.angle,
                critical.failure.critical_mode()
            );
            if let Some(margin) = case.buckling_margin {
                println!("    buckling margin = {:.3}", margin);
            }
        }
        println!();
    }

    println!("=== Analysis Complete ===");
}
