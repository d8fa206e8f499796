//! Laminate stiffness (ABD) assembly and compliance extraction
//!
//! The laminate constitutive relation is
//!
//! ```text
//! | N |   | A  B | | eps0  |
//! |   | = |      | |       |
//! | M |   | B  D | | kappa |
//! ```
//!
//! with A, B and D obtained by integrating the rotated ply stiffness through
//! the thickness. z is measured from the laminate mid-plane.

use log::debug;
use serde::{Deserialize, Serialize};

use super::{rotate_q, Mat3, Mat6, Vec6};
use crate::elements::{Laminate, Material};
use crate::error::{CltError, CltResult};

/// Extensional (A), coupling (B) and bending (D) stiffness of a laminate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbdMatrix {
    /// Extensional stiffness, N/m
    pub a: Mat3,
    /// Extension-bending coupling, N
    pub b: Mat3,
    /// Bending stiffness, N·m
    pub d: Mat3,
}

impl AbdMatrix {
    /// Assemble A, B and D for a laminate.
    ///
    /// # Arguments
    /// * `laminate` - Stacking sequence, bottom to top
    /// * `q` - Unrotated stiffness matrix of each material, indexed by material id
    pub fn assemble(laminate: &Laminate, q: &[Mat3]) -> CltResult<Self> {
        laminate.check_materials(q.len())?;

        let mut a = Mat3::zeros();
        let mut b = Mat3::zeros();
        let mut d = Mat3::zeros();

        for (i, (group, (z_bot, z_top))) in laminate
            .groups()
            .iter()
            .zip(laminate.lamina_bounds())
            .enumerate()
        {
            let qbar = rotate_q(&q[group.material], group.angle);

            a += qbar * (z_top - z_bot);
            b += qbar * ((z_top.powi(2) - z_bot.powi(2)) / 2.0);
            d += qbar * ((z_top.powi(3) - z_bot.powi(3)) / 3.0);

            debug!(
                "lamina {}: material {}, {} deg, z = [{:.4e}, {:.4e}]",
                i, group.material, group.angle, z_bot, z_top
            );
        }

        Ok(Self { a, b, d })
    }

    /// Assemble using the stiffness of each material in `materials`
    pub fn from_materials(laminate: &Laminate, materials: &[Material]) -> CltResult<Self> {
        let q: Vec<Mat3> = materials.iter().map(Material::q).collect();
        Self::assemble(laminate, &q)
    }

    /// Full 6x6 stiffness matrix
    pub fn as_matrix(&self) -> Mat6 {
        let mut abd = Mat6::zeros();
        abd.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.a);
        abd.fixed_view_mut::<3, 3>(0, 3).copy_from(&self.b);
        abd.fixed_view_mut::<3, 3>(3, 0).copy_from(&self.b);
        abd.fixed_view_mut::<3, 3>(3, 3).copy_from(&self.d);
        abd
    }

    /// Invert the laminate stiffness
    pub fn compliance(&self) -> CltResult<Compliance> {
        let inverse = self
            .as_matrix()
            .try_inverse()
            .filter(|m| m.iter().all(|v| v.is_finite()))
            .ok_or(CltError::SingularMatrix)?;

        Ok(Compliance {
            alpha: inverse.fixed_view::<3, 3>(0, 0).into_owned(),
            beta: inverse.fixed_view::<3, 3>(0, 3).into_owned(),
            delta: inverse.fixed_view::<3, 3>(3, 3).into_owned(),
        })
    }

    /// Mid-plane strains and curvatures produced by resultant forces and moments
    pub fn resultant_strain(&self, loads: &Vec6) -> CltResult<Vec6> {
        Ok(self.compliance()?.as_matrix() * loads)
    }

    /// Resultant forces and moments produced by mid-plane strains and curvatures
    pub fn resultant_loads(&self, strain: &Vec6) -> Vec6 {
        self.as_matrix() * strain
    }

    /// True when the coupling matrix is negligible relative to sqrt(|A| |D|)
    pub fn is_uncoupled(&self, tol: f64) -> bool {
        let scale = (self.a.abs().max() * self.d.abs().max()).sqrt();
        self.b.abs().max() <= tol * scale
    }
}

/// Partitioned inverse of the ABD matrix
///
/// ```text
/// | eps0  |   | alpha   beta  | | N |
/// |       | = |               | |   |
/// | kappa |   | beta^T  delta | | M |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Compliance {
    pub alpha: Mat3,
    pub beta: Mat3,
    pub delta: Mat3,
}

impl Compliance {
    /// Full 6x6 compliance matrix
    pub fn as_matrix(&self) -> Mat6 {
        let mut m = Mat6::zeros();
        m.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.alpha);
        m.fixed_view_mut::<3, 3>(0, 3).copy_from(&self.beta);
        m.fixed_view_mut::<3, 3>(3, 0).copy_from(&self.beta.transpose());
        m.fixed_view_mut::<3, 3>(3, 3).copy_from(&self.delta);
        m
    }

    /// Engineering constants of the laminate with total thickness `h`
    pub fn effective_properties(&self, h: f64) -> CltResult<EffectiveProperties> {
        if !(h.is_finite() && h > 0.0) {
            return Err(CltError::InvalidGeometry(format!(
                "laminate thickness must be positive, got {}",
                h
            )));
        }

        let a = &self.alpha;
        let d = &self.delta;
        let h3 = h.powi(3);

        Ok(EffectiveProperties {
            ex: 1.0 / (h * a[(0, 0)]),
            ey: 1.0 / (h * a[(1, 1)]),
            gxy: 1.0 / (h * a[(2, 2)]),
            nuxy: -a[(0, 1)] / a[(0, 0)],
            nuyx: -a[(0, 1)] / a[(1, 1)],
            exb: 12.0 / (h3 * d[(0, 0)]),
            eyb: 12.0 / (h3 * d[(1, 1)]),
            gxyb: 12.0 / (h3 * d[(2, 2)]),
        })
    }
}

/// Homogenized in-plane and flexural engineering constants of a laminate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveProperties {
    /// In-plane modulus along x
    pub ex: f64,
    /// In-plane modulus along y
    pub ey: f64,
    /// In-plane shear modulus
    pub gxy: f64,
    /// In-plane Poisson's ratio (contraction along y under x load)
    pub nuxy: f64,
    pub nuyx: f64,
    /// Flexural modulus about x bending
    pub exb: f64,
    pub eyb: f64,
    pub gxyb: f64,
}

/// Compliance sub-blocks from A, B and D
pub fn compliance(a: &Mat3, b: &Mat3, d: &Mat3) -> CltResult<Compliance> {
    AbdMatrix { a: *a, b: *b, d: *d }.compliance()
}

/// Assemble A, B and D from parallel layup arrays
///
/// # Arguments
/// * `matid` - Material id of each lamina
/// * `nply` - Number of plies in each lamina
/// * `tply` - Ply thickness (m) in each lamina
/// * `theta` - Orientation (degrees) of each lamina
/// * `q` - Unrotated stiffness matrix of each material
pub fn abd_from_arrays(
    matid: &[usize],
    nply: &[u32],
    tply: &[f64],
    theta: &[f64],
    q: &[Mat3],
) -> CltResult<AbdMatrix> {
    let laminate = Laminate::new(matid, nply, tply, theta)?;
    AbdMatrix::assemble(&laminate, q)
}
