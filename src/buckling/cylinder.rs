//! Infinitely long, simply supported laminated cylinders
//!
//! Donnell shell theory with a sinusoidal buckle of axial wave number lx and
//! circumferential wave number ly gives
//!
//! ```text
//! N lx^2 = d(lx, ly) + lx^4 / (R^2 a(lx, ly))
//! d = D11 lx^4 + 2 (D12 + 2 D66) lx^2 ly^2 + D22 ly^4
//! a = a22 lx^4 + (2 a12 + a66) lx^2 ly^2 + a11 ly^4      (a = A^-1)
//! ```
//!
//! Treating both wave numbers as continuous, minimizing over lx^2 leaves
//! N = (2 / R) sqrt(d(s) / a(s)) with s = (ly / lx)^2, which is then minimized
//! over s >= 0 in closed form. See M. P. Nemeth, "An Approximate Solution and
//! Master Curves for Buckling of Symmetrically Laminated Composite Cylinders".
//! Knockdown factors follow NASA SP-8001.

use log::debug;

use super::{check_dimension, check_stiffness, BucklingLoad};
use crate::error::{CltError, CltResult};
use crate::math::Mat3;

/// SP-8001 knockdown coefficient for axial compression
const AXIAL_KNOCKDOWN: f64 = 0.901;
/// SP-8001 knockdown coefficient for bending
const BENDING_KNOCKDOWN: f64 = 0.731;

/// Axial compression buckling of an infinitely long cylinder of radius `r`
/// and wall thickness `h`.
///
/// The SP-8001 correlation factor is applied unless `correlation` is false.
pub fn cylinder_uniaxial_local_buckling(
    a: &Mat3,
    d: &Mat3,
    r: f64,
    h: f64,
    correlation: bool,
) -> CltResult<BucklingLoad> {
    let theoretical = theoretical_axial_load(a, d, r, h)?;
    let gamma = if correlation {
        knockdown(AXIAL_KNOCKDOWN, r, h)
    } else {
        1.0
    };
    finish(a, theoretical * gamma)
}

/// Bending buckling of an infinitely long cylinder: the axial compression
/// load with the SP-8001 bending correlation factor. The load is the peak
/// compressive running load in the cylinder wall.
pub fn cylinder_bending_local_buckling(a: &Mat3, d: &Mat3, r: f64, h: f64) -> CltResult<BucklingLoad> {
    let theoretical = theoretical_axial_load(a, d, r, h)?;
    finish(a, theoretical * knockdown(BENDING_KNOCKDOWN, r, h))
}

/// gamma = 1 - c (1 - exp(-phi)) with phi = sqrt(R / h) / 16
fn knockdown(c: f64, r: f64, h: f64) -> f64 {
    let phi = (r / h).sqrt() / 16.0;
    1.0 - c * (1.0 - (-phi).exp())
}

fn theoretical_axial_load(a: &Mat3, d: &Mat3, r: f64, h: f64) -> CltResult<f64> {
    check_dimension("cylinder radius", r)?;
    check_dimension("wall thickness", h)?;
    check_stiffness(a, d)?;

    let compliance = a.try_inverse().ok_or(CltError::SingularMatrix)?;

    let bending = [d[(0, 0)], 2.0 * (d[(0, 1)] + 2.0 * d[(2, 2)]), d[(1, 1)]];
    let membrane = [
        compliance[(1, 1)],
        2.0 * compliance[(0, 1)] + compliance[(2, 2)],
        compliance[(0, 0)],
    ];

    let ratio = min_ratio(bending, membrane);
    debug!("cylinder buckling: min d/a = {:.6e}, R = {}", ratio, r);

    Ok(2.0 / r * ratio.sqrt())
}

fn finish(a: &Mat3, load: f64) -> CltResult<BucklingLoad> {
    let compliance = a.try_inverse().ok_or(CltError::SingularMatrix)?;
    Ok(BucklingLoad {
        load,
        strain: (compliance[(0, 0)] * load).abs(),
    })
}

/// Evaluate p0 + p1 s + p2 s^2
fn poly(p: [f64; 3], s: f64) -> f64 {
    p[0] + s * (p[1] + s * p[2])
}

/// Minimum over s in [0, inf] of (d0 + d1 s + d2 s^2) / (a0 + a1 s + a2 s^2).
///
/// The cubic terms of the stationarity condition d' a - d a' = 0 cancel, so the
/// interior candidates are the non-negative roots of a quadratic; the two ends
/// contribute d0/a0 and the limit d2/a2.
fn min_ratio(d: [f64; 3], a: [f64; 3]) -> f64 {
    let c2 = d[2] * a[1] - d[1] * a[2];
    let c1 = 2.0 * (d[2] * a[0] - d[0] * a[2]);
    let c0 = d[1] * a[0] - d[0] * a[1];

    let mut candidates = vec![0.0];
    let scale = c0.abs() + c1.abs() + c2.abs();

    if scale > 0.0 {
        if c2.abs() > 1e-12 * scale {
            let discriminant = c1 * c1 - 4.0 * c2 * c0;
            if discriminant >= 0.0 {
                let root = discriminant.sqrt();
                candidates.push((-c1 + root) / (2.0 * c2));
                candidates.push((-c1 - root) / (2.0 * c2));
            }
        } else if c1.abs() > 1e-12 * scale {
            candidates.push(-c0 / c1);
        }
    }

    candidates
        .into_iter()
        .filter(|s| s.is_finite() && *s >= 0.0)
        .map(|s| poly(d, s) / poly(a, s))
        .fold(d[2] / a[2], f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Laminate, Material};
    use crate::math::{reduced_stiffness, AbdMatrix};
    use approx::assert_relative_eq;

    fn isotropic_abd(e: f64, nu: f64, h: f64) -> AbdMatrix {
        let q = reduced_stiffness(e, e, e / (2.0 * (1.0 + nu)), nu).unwrap();
        let laminate = Laminate::from_angles(0, h, &[0.0]).unwrap();
        AbdMatrix::assemble(&laminate, &[q]).unwrap()
    }

    #[test]
    fn test_isotropic_classical_load() {
        let (e, nu, h, r) = (70e9, 0.3, 1e-3, 0.5);
        let abd = isotropic_abd(e, nu, h);
        let result = cylinder_uniaxial_local_buckling(&abd.a, &abd.d, r, h, false).unwrap();

        let classical = e * h * h / (r * (3.0 * (1.0 - nu * nu)).sqrt());
        assert_relative_eq!(result.load, classical, max_relative = 1e-9);
        assert_relative_eq!(result.strain, classical / (e * h), max_relative = 1e-9);
    }

    #[test]
    fn test_correlation_factor() {
        let (e, nu, h, r) = (70e9, 0.3, 1e-3, 0.5);
        let abd = isotropic_abd(e, nu, h);
        let raw = cylinder_uniaxial_local_buckling(&abd.a, &abd.d, r, h, false).unwrap();
        let knocked = cylinder_uniaxial_local_buckling(&abd.a, &abd.d, r, h, true).unwrap();
        let bending = cylinder_bending_local_buckling(&abd.a, &abd.d, r, h).unwrap();

        let phi = (r / h).sqrt() / 16.0;
        let gamma = 1.0 - 0.901 * (1.0 - (-phi).exp());
        assert_relative_eq!(knocked.load, raw.load * gamma, max_relative = 1e-12);
        assert!(knocked.load < raw.load);
        assert!(bending.load > knocked.load);
        assert!(bending.load < raw.load);
    }

    #[test]
    fn test_closed_form_minimum_matches_scan() {
        let mat = Material::t300_5208();
        let laminate = Laminate::from_angles(0, mat.ply_thickness(), &[0.0, 0.0, 90.0, 90.0, 0.0, 0.0])
            .unwrap();
        let abd = AbdMatrix::from_materials(&laminate, &[mat]).unwrap();
        let compliance = abd.a.try_inverse().unwrap();

        let d = [
            abd.d[(0, 0)],
            2.0 * (abd.d[(0, 1)] + 2.0 * abd.d[(2, 2)]),
            abd.d[(1, 1)],
        ];
        let a = [
            compliance[(1, 1)],
            2.0 * compliance[(0, 1)] + compliance[(2, 2)],
            compliance[(0, 0)],
        ];

        let closed = min_ratio(d, a);
        let scanned = (0..=200_000)
            .map(|i| i as f64 * 1e-3)
            .map(|s| poly(d, s) / poly(a, s))
            .fold(d[2] / a[2], f64::min);

        assert!(closed <= scanned * (1.0 + 1e-12));
        assert_relative_eq!(closed, scanned, max_relative = 1e-6);
    }

    #[test]
    fn test_positive_strain_and_invalid_geometry() {
        let abd = isotropic_abd(70e9, 0.3, 1e-3);
        let result = cylinder_bending_local_buckling(&abd.a, &abd.d, 0.3, 1e-3).unwrap();
        assert!(result.strain > 0.0);

        assert!(cylinder_uniaxial_local_buckling(&abd.a, &abd.d, -0.3, 1e-3, true).is_err());
        assert!(cylinder_bending_local_buckling(&abd.a, &abd.d, 0.3, 0.0).is_err());
    }
}
