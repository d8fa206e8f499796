//! Ply strain and stress recovery from laminate resultant strains

use crate::elements::Laminate;
use crate::error::{CltError, CltResult};
use crate::math::{rotate_strain, Mat3, Vec3, Vec6};

/// Strain in each lamina group's material axes at its mid-plane.
///
/// eps(z) = eps0 + z kappa, evaluated at the group mid-plane and rotated by
/// the group orientation.
///
/// # Arguments
/// * `laminate` - Stacking sequence
/// * `resultant` - [eps_x, eps_y, gamma_xy, kappa_x, kappa_y, kappa_xy]
pub fn ply_strains(laminate: &Laminate, resultant: &Vec6) -> Vec<Vec3> {
    let midplane = resultant.fixed_rows::<3>(0).into_owned();
    let curvature = resultant.fixed_rows::<3>(3).into_owned();

    laminate
        .groups()
        .iter()
        .zip(laminate.lamina_midplanes())
        .map(|(group, z)| {
            let strain = midplane + curvature * z;
            rotate_strain(&strain, group.angle)
        })
        .collect()
}

/// [`ply_strains`] for a layup given as parallel arrays
pub fn ply_strains_from_arrays(
    nply: &[u32],
    tply: &[f64],
    theta: &[f64],
    resultant: &Vec6,
) -> CltResult<Vec<Vec3>> {
    let matid = vec![0; nply.len()];
    let laminate = Laminate::new(&matid, nply, tply, theta)?;
    Ok(ply_strains(&laminate, resultant))
}

/// Stress in each lamina group's material axes.
///
/// `strains` are already in material axes (see [`ply_strains`]), so each
/// group's stress is its material's unrotated Q times the strain.
///
/// # Arguments
/// * `strains` - Material-axis strain of each lamina group
/// * `q` - Unrotated stiffness matrix of each material
/// * `laminate` - Stacking sequence that produced `strains`
pub fn ply_stresses(strains: &[Vec3], q: &[Mat3], laminate: &Laminate) -> CltResult<Vec<Vec3>> {
    ply_stresses_from_arrays(strains, q, &laminate.matid())
}

/// [`ply_stresses`] with the material id of each lamina group given directly
pub fn ply_stresses_from_arrays(
    strains: &[Vec3],
    q: &[Mat3],
    matid: &[usize],
) -> CltResult<Vec<Vec3>> {
    if strains.len() != matid.len() {
        return Err(CltError::InvalidInput(format!(
            "{} ply strains given for {} laminas",
            strains.len(),
            matid.len()
        )));
    }

    strains
        .iter()
        .zip(matid)
        .map(|(strain, &id)| {
            let q = q.get(id).ok_or(CltError::MaterialNotFound(id))?;
            Ok(q * strain)
        })
        .collect()
}
