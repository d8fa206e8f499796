//! Stiffness transformation utilities for laminate calculations

pub mod abd;

use nalgebra::{Matrix3, Matrix6, Vector3, Vector6};

use crate::error::{CltError, CltResult};

pub use abd::{abd_from_arrays, compliance, AbdMatrix, Compliance, EffectiveProperties};

pub type Mat3 = Matrix3<f64>;
pub type Mat6 = Matrix6<f64>;
pub type Vec3 = Vector3<f64>;
/// Resultant vector [Nx, Ny, Nxy, Mx, My, Mxy] or [eps_x, eps_y, gamma_xy, kx, ky, kxy]
pub type Vec6 = Vector6<f64>;

/// Compute the reduced stiffness matrix [Q] of an orthotropic ply in its
/// material axes
///
/// # Arguments
/// * `e1` - Longitudinal modulus
/// * `e2` - Transverse modulus
/// * `g12` - In-plane shear modulus
/// * `nu12` - Major Poisson's ratio
pub fn reduced_stiffness(e1: f64, e2: f64, g12: f64, nu12: f64) -> CltResult<Mat3> {
    for (name, value) in [("e1", e1), ("e2", e2), ("g12", g12)] {
        if !(value.is_finite() && value > 0.0) {
            return Err(CltError::InvalidMaterial(format!(
                "{} must be positive, got {}",
                name, value
            )));
        }
    }
    if !nu12.is_finite() {
        return Err(CltError::InvalidMaterial("nu12 is not finite".into()));
    }

    let denom = 1.0 - nu12 * nu12 * e2 / e1;
    if denom <= 0.0 {
        return Err(CltError::InvalidMaterial(format!(
            "1 - nu12^2 * E2/E1 = {} must be positive",
            denom
        )));
    }

    Ok(orthotropic_q(e1, e2, g12, nu12))
}

/// Reduced stiffness without admissibility checks, for already validated materials
pub(crate) fn orthotropic_q(e1: f64, e2: f64, g12: f64, nu12: f64) -> Mat3 {
    let nu21 = nu12 * e2 / e1;
    let denom = 1.0 - nu12 * nu21;

    Mat3::new(
        e1 / denom,         nu12 * e2 / denom,  0.0,
        nu12 * e2 / denom,  e2 / denom,         0.0,
        0.0,                0.0,                g12,
    )
}

/// Engineering-strain transformation [T] from laminate axes to axes rotated
/// `theta` degrees counter-clockwise.
///
/// eps' = T eps with eps = [eps_x, eps_y, gamma_xy]
pub fn strain_transformation(theta: f64) -> Mat3 {
    let (s, c) = theta.to_radians().sin_cos();
    let (c2, s2, cs) = (c * c, s * s, c * s);

    Mat3::new(
        c2,         s2,         cs,
        s2,         c2,         -cs,
        -2.0 * cs,  2.0 * cs,   c2 - s2,
    )
}

/// Stress transformation from laminate axes to axes rotated `theta` degrees
///
/// sigma' = T sigma with sigma = [sigma_x, sigma_y, tau_xy]
pub fn stress_transformation(theta: f64) -> Mat3 {
    let (s, c) = theta.to_radians().sin_cos();
    let (c2, s2, cs) = (c * c, s * s, c * s);

    Mat3::new(
        c2,   s2,   2.0 * cs,
        s2,   c2,   -2.0 * cs,
        -cs,  cs,   c2 - s2,
    )
}

/// Rotate a stiffness matrix by `theta` degrees.
///
/// Computes Qbar = T^T Q T with T the strain transformation, which is the
/// usual fourth-order tensor rotation written in contracted notation. Because
/// the full matrix product is used, already rotated (fully populated) matrices
/// rotate correctly too, so `rotate_q(&rotate_q(q, a), b) == rotate_q(q, a + b)`.
pub fn rotate_q(q: &Mat3, theta: f64) -> Mat3 {
    let t = strain_transformation(theta);
    t.transpose() * q * t
}

/// Rotate in-plane strain [eps_x, eps_y, gamma_xy] into axes rotated `theta` degrees
pub fn rotate_strain(strain: &Vec3, theta: f64) -> Vec3 {
    strain_transformation(theta) * strain
}

/// Rotate in-plane stress [sigma_x, sigma_y, tau_xy] into axes rotated `theta` degrees
pub fn rotate_stress(stress: &Vec3, theta: f64) -> Vec3 {
    stress_transformation(theta) * stress
}

/// Largest absolute difference between the upper and lower triangles
pub fn asymmetry<const N: usize>(m: &nalgebra::SMatrix<f64, N, N>) -> f64 {
    let mut max = 0.0_f64;
    for i in 0..N {
        for j in (i + 1)..N {
            max = max.max((m[(i, j)] - m[(j, i)]).abs());
        }
    }
    max
}
