//! Long, simply supported flat panels
//!
//! Both formulas assume a balanced, symmetric laminate (no A16/A26/D16/D26,
//! no B) on a plate much longer than its width `b`. See A. Johnson,
//! "Structural Component Design Techniques", section 6.2.

use std::f64::consts::PI;

use super::{check_dimension, check_stiffness, BucklingLoad};
use crate::error::CltResult;
use crate::math::Mat3;

/// Uniaxial compression buckling load and strain of a long plate of width `b`
///
/// N = 2 pi^2 / b^2 (sqrt(D11 D22) + D12 + 2 D66)
pub fn plate_uniaxial_local_buckling(a: &Mat3, d: &Mat3, b: f64) -> CltResult<BucklingLoad> {
    check_dimension("panel width", b)?;
    check_stiffness(a, d)?;

    let load = 2.0 * PI.powi(2) / b.powi(2)
        * ((d[(0, 0)] * d[(1, 1)]).sqrt() + d[(0, 1)] + 2.0 * d[(2, 2)]);

    // Axial stiffness with the transverse edges free to expand
    let axial = a[(0, 0)] - a[(0, 1)].powi(2) / a[(1, 1)];

    Ok(BucklingLoad {
        load,
        strain: (load / axial).abs(),
    })
}

/// Shear buckling load and shear strain of a long plate of width `b`
///
/// With theta = sqrt(D11 D22) / (D12 + 2 D66):
/// - theta >= 1: N = 4 / b^2 (D11 D22^3)^(1/4) (8.125 + 5.045 / theta)
/// - theta < 1: N = 4 / b^2 sqrt(D22 (D12 + 2 D66)) (11.7 + 0.532 theta + 0.938 theta^2)
pub fn plate_shear_local_buckling(a: &Mat3, d: &Mat3, b: f64) -> CltResult<BucklingLoad> {
    check_dimension("panel width", b)?;
    check_stiffness(a, d)?;

    let (d11, d22) = (d[(0, 0)], d[(1, 1)]);
    let d3 = d[(0, 1)] + 2.0 * d[(2, 2)];
    let geometric = (d11 * d22).sqrt();

    let load = if d3 <= geometric {
        // theta >= 1, written with 1/theta so d3 <= 0 stays finite
        4.0 / b.powi(2) * (d11 * d22.powi(3)).powf(0.25) * (8.125 + 5.045 * d3 / geometric)
    } else {
        let theta = geometric / d3;
        4.0 / b.powi(2) * (d22 * d3).sqrt() * (11.7 + 0.532 * theta + 0.938 * theta.powi(2))
    };

    Ok(BucklingLoad {
        load,
        strain: (load / a[(2, 2)]).abs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Laminate;
    use crate::math::{reduced_stiffness, AbdMatrix};
    use approx::assert_relative_eq;

    fn isotropic_abd(e: f64, nu: f64, h: f64) -> AbdMatrix {
        let q = reduced_stiffness(e, e, e / (2.0 * (1.0 + nu)), nu).unwrap();
        let laminate = Laminate::from_angles(0, h, &[0.0]).unwrap();
        AbdMatrix::assemble(&laminate, &[q]).unwrap()
    }

    #[test]
    fn test_isotropic_uniaxial_k4() {
        let (e, nu, h, b) = (70e9, 0.3, 2e-3, 0.2);
        let abd = isotropic_abd(e, nu, h);
        let result = plate_uniaxial_local_buckling(&abd.a, &abd.d, b).unwrap();

        let d = e * h.powi(3) / (12.0 * (1.0 - nu * nu));
        assert_relative_eq!(result.load, 4.0 * PI * PI * d / (b * b), max_relative = 1e-9);
        assert_relative_eq!(result.strain, result.load / (e * h), max_relative = 1e-9);
    }

    #[test]
    fn test_isotropic_shear_coefficient() {
        let (e, nu, h, b) = (70e9, 0.3, 2e-3, 0.2);
        let abd = isotropic_abd(e, nu, h);
        let result = plate_shear_local_buckling(&abd.a, &abd.d, b).unwrap();

        let d = e * h.powi(3) / (12.0 * (1.0 - nu * nu));
        // k_s = 4 (8.125 + 5.045) / pi^2, about 5.34 for a long plate
        assert_relative_eq!(result.load, 4.0 * 13.17 * d / (b * b), max_relative = 1e-9);
        assert_relative_eq!(result.strain, result.load / abd.a[(2, 2)], max_relative = 1e-9);
    }

    #[test]
    fn test_shear_branches_meet_at_theta_one() {
        // D11 = D22 = D12 + 2 D66 gives theta = 1 on both branches
        let a = Mat3::from_diagonal_element(1e8);
        let d = Mat3::new(
            10.0, 2.0, 0.0,
            2.0, 10.0, 0.0,
            0.0, 0.0, 4.0,
        );
        let at_one = plate_shear_local_buckling(&a, &d, 0.1).unwrap();

        let mut d_above = d;
        d_above[(2, 2)] += 1e-9;
        let just_below_one = plate_shear_local_buckling(&a, &d_above, 0.1).unwrap();
        assert_relative_eq!(at_one.load, just_below_one.load, max_relative = 1e-6);
    }

    #[test]
    fn test_strains_are_positive() {
        let abd = isotropic_abd(70e9, 0.3, 1e-3);
        // Negative coupling terms in A must not flip the reported strain sign
        let mut a = abd.a;
        a[(0, 1)] = -a[(0, 1)];
        a[(1, 0)] = a[(0, 1)];
        for result in [
            plate_uniaxial_local_buckling(&a, &abd.d, 0.15).unwrap(),
            plate_shear_local_buckling(&a, &abd.d, 0.15).unwrap(),
        ] {
            assert!(result.load > 0.0);
            assert!(result.strain > 0.0);
        }
    }

    #[test]
    fn test_invalid_width() {
        let abd = isotropic_abd(70e9, 0.3, 1e-3);
        assert!(plate_uniaxial_local_buckling(&abd.a, &abd.d, 0.0).is_err());
        assert!(plate_shear_local_buckling(&abd.a, &abd.d, f64::NAN).is_err());
    }
}
