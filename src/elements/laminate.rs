//! Laminate stacking sequence

use serde::{Deserialize, Serialize};

use crate::elements::Material;
use crate::error::{CltError, CltResult};

/// A contiguous run of identical plies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaminaGroup {
    /// Index into the material list
    pub material: usize,
    /// Number of plies in the group
    pub plies: u32,
    /// Thickness of a single ply in m
    pub ply_thickness: f64,
    /// Fiber orientation in degrees
    pub angle: f64,
}

impl LaminaGroup {
    pub fn new(material: usize, plies: u32, ply_thickness: f64, angle: f64) -> Self {
        Self {
            material,
            plies,
            ply_thickness,
            angle,
        }
    }

    /// Group thickness (plies x ply thickness)
    pub fn thickness(&self) -> f64 {
        self.plies as f64 * self.ply_thickness
    }

    fn validate(&self, index: usize) -> CltResult<()> {
        if self.plies == 0 {
            return Err(CltError::InvalidInput(format!(
                "lamina {} has zero plies",
                index
            )));
        }
        if !(self.ply_thickness.is_finite() && self.ply_thickness > 0.0) {
            return Err(CltError::InvalidInput(format!(
                "lamina {} ply thickness must be positive, got {}",
                index, self.ply_thickness
            )));
        }
        if !self.angle.is_finite() {
            return Err(CltError::InvalidInput(format!(
                "lamina {} orientation is not finite",
                index
            )));
        }
        Ok(())
    }
}

/// Ordered stack of lamina groups, listed from the bottom surface to the top.
///
/// The group list is validated on construction and cannot change afterwards,
/// so downstream calculations never re-check lengths or thicknesses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LaminateData", into = "LaminateData")]
pub struct Laminate {
    groups: Vec<LaminaGroup>,
}

/// Parallel-array form used in model files
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LaminateData {
    matid: Vec<usize>,
    nply: Vec<u32>,
    tply: Vec<f64>,
    theta: Vec<f64>,
}

impl TryFrom<LaminateData> for Laminate {
    type Error = CltError;

    fn try_from(data: LaminateData) -> CltResult<Self> {
        Laminate::new(&data.matid, &data.nply, &data.tply, &data.theta)
    }
}

impl From<Laminate> for LaminateData {
    fn from(lam: Laminate) -> Self {
        Self {
            matid: lam.matid(),
            nply: lam.nply(),
            tply: lam.tply(),
            theta: lam.theta(),
        }
    }
}

impl Laminate {
    /// Build a laminate from parallel arrays of material id, ply count,
    /// ply thickness and orientation (degrees)
    pub fn new(matid: &[usize], nply: &[u32], tply: &[f64], theta: &[f64]) -> CltResult<Self> {
        let n = matid.len();
        if nply.len() != n || tply.len() != n || theta.len() != n {
            return Err(CltError::InvalidInput(format!(
                "layup arrays differ in length: matid={}, nply={}, tply={}, theta={}",
                n,
                nply.len(),
                tply.len(),
                theta.len()
            )));
        }

        let groups = (0..n)
            .map(|i| LaminaGroup::new(matid[i], nply[i], tply[i], theta[i]))
            .collect();
        Self::from_groups(groups)
    }

    /// Build a laminate from lamina groups
    pub fn from_groups(groups: Vec<LaminaGroup>) -> CltResult<Self> {
        if groups.is_empty() {
            return Err(CltError::InvalidInput("laminate has no lamina groups".into()));
        }
        for (i, group) in groups.iter().enumerate() {
            group.validate(i)?;
        }
        Ok(Self { groups })
    }

    /// Single-material laminate with one ply per listed angle, using the
    /// material's nominal ply thickness
    pub fn from_angles(material: usize, ply_thickness: f64, angles: &[f64]) -> CltResult<Self> {
        Self::from_groups(
            angles
                .iter()
                .map(|&angle| LaminaGroup::new(material, 1, ply_thickness, angle))
                .collect(),
        )
    }

    /// Mirror the layup about its top surface, giving a symmetric laminate
    /// ([0/45] becomes [0/45/45/0])
    pub fn symmetric(&self) -> Self {
        let mut groups = self.groups.clone();
        groups.extend(self.groups.iter().rev().copied());
        Self { groups }
    }

    pub fn groups(&self) -> &[LaminaGroup] {
        &self.groups
    }

    /// Number of lamina groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Always false; an empty laminate cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn matid(&self) -> Vec<usize> {
        self.groups.iter().map(|g| g.material).collect()
    }

    pub fn nply(&self) -> Vec<u32> {
        self.groups.iter().map(|g| g.plies).collect()
    }

    pub fn tply(&self) -> Vec<f64> {
        self.groups.iter().map(|g| g.ply_thickness).collect()
    }

    pub fn theta(&self) -> Vec<f64> {
        self.groups.iter().map(|g| g.angle).collect()
    }

    /// Total number of plies
    pub fn ply_count(&self) -> usize {
        self.groups.iter().map(|g| g.plies as usize).sum()
    }

    /// Total laminate thickness
    pub fn thickness(&self) -> f64 {
        self.groups.iter().map(LaminaGroup::thickness).sum()
    }

    /// Ply interface coordinates measured from the mid-plane
    pub fn z_coordinates(&self) -> Vec<f64> {
        let mut z = Vec::with_capacity(self.ply_count() + 1);
        let mut current = -self.thickness() / 2.0;
        z.push(current);
        for group in &self.groups {
            for _ in 0..group.plies {
                current += group.ply_thickness;
                z.push(current);
            }
        }
        z
    }

    /// Bottom and top z of each lamina group
    pub fn lamina_bounds(&self) -> Vec<(f64, f64)> {
        let mut z = -self.thickness() / 2.0;
        self.groups
            .iter()
            .map(|g| {
                let bottom = z;
                z += g.thickness();
                (bottom, z)
            })
            .collect()
    }

    /// Mid-plane z of each lamina group
    pub fn lamina_midplanes(&self) -> Vec<f64> {
        self.lamina_bounds()
            .into_iter()
            .map(|(bottom, top)| (bottom + top) / 2.0)
            .collect()
    }

    /// Check that every material id refers to an entry of a list with `count` items
    pub fn check_materials(&self, count: usize) -> CltResult<()> {
        match self.groups.iter().find(|g| g.material >= count) {
            Some(g) => Err(CltError::MaterialNotFound(g.material)),
            None => Ok(()),
        }
    }

    /// Mass per unit area in kg/m²
    pub fn areal_density(&self, materials: &[Material]) -> CltResult<f64> {
        self.check_materials(materials.len())?;
        Ok(self
            .groups
            .iter()
            .map(|g| materials[g.material].rho() * g.thickness())
            .sum())
    }
}

/// Ply interface z-coordinates for a stack described by ply counts and ply
/// thicknesses per lamina group.
///
/// Returns one entry per interface (total plies + 1), increasing from -h/2
/// to +h/2. The arrays are checked like [`Laminate::new`].
pub fn z_coordinates(nply: &[u32], tply: &[f64]) -> CltResult<Vec<f64>> {
    let matid = vec![0; nply.len()];
    let theta = vec![0.0; nply.len()];
    Ok(Laminate::new(&matid, nply, tply, &theta)?.z_coordinates())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_z_coordinates() {
        let z = z_coordinates(&[2, 1], &[0.1, 0.2]).unwrap();
        assert_eq!(z.len(), 4);
        assert_relative_eq!(z[0], -0.2, epsilon = 1e-12);
        assert_relative_eq!(z[1], -0.1, epsilon = 1e-12);
        assert_relative_eq!(z[2], 0.0, epsilon = 1e-12);
        assert_relative_eq!(z[3], 0.2, epsilon = 1e-12);
        assert!(z.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_z_coordinates_rejects_bad_arrays() {
        let result = z_coordinates(&[1, 1], &[0.1]);
        assert!(matches!(result, Err(CltError::InvalidInput(_))));

        let result = z_coordinates(&[2], &[0.0]);
        assert!(matches!(result, Err(CltError::InvalidInput(_))));
        assert!(z_coordinates(&[], &[]).is_err());
    }

    #[test]
    fn test_laminate_z_matches_array_form() {
        let lam = Laminate::new(&[0, 0], &[3, 2], &[1e-4, 2e-4], &[0.0, 45.0]).unwrap();
        let z = lam.z_coordinates();
        assert_eq!(z.len(), lam.ply_count() + 1);
        assert_eq!(z, z_coordinates(&lam.nply(), &lam.tply()).unwrap());
        assert_relative_eq!(z[5], lam.thickness() / 2.0, epsilon = 1e-15);
    }

    #[test]
    fn test_mismatched_arrays() {
        let result = Laminate::new(&[0, 0], &[1], &[1e-4, 1e-4], &[0.0, 90.0]);
        assert!(matches!(result, Err(CltError::InvalidInput(_))));
    }

    #[test]
    fn test_empty_laminate() {
        assert!(Laminate::new(&[], &[], &[], &[]).is_err());
    }

    #[test]
    fn test_zero_plies_rejected() {
        assert!(Laminate::new(&[0], &[0], &[1e-4], &[0.0]).is_err());
    }

    #[test]
    fn test_symmetric_and_bounds() {
        let half = Laminate::from_angles(0, 0.125e-3, &[0.0, 45.0]).unwrap();
        let lam = half.symmetric();
        assert_eq!(lam.theta(), vec![0.0, 45.0, 45.0, 0.0]);
        assert_relative_eq!(lam.thickness(), 0.5e-3, epsilon = 1e-15);

        let bounds = lam.lamina_bounds();
        assert_relative_eq!(bounds[0].0, -0.25e-3, epsilon = 1e-15);
        assert_relative_eq!(bounds[3].1, 0.25e-3, epsilon = 1e-15);
        assert_relative_eq!(lam.lamina_midplanes()[1], -0.0625e-3, epsilon = 1e-15);
    }

    #[test]
    fn test_check_materials() {
        let lam = Laminate::new(&[0, 2], &[1, 1], &[1e-4, 1e-4], &[0.0, 90.0]).unwrap();
        assert!(matches!(lam.check_materials(2), Err(CltError::MaterialNotFound(2))));
        assert!(lam.check_materials(3).is_ok());
    }

    #[test]
    fn test_serde_parallel_arrays() {
        let json = r#"{"matid": [0, 0], "nply": [2, 2], "tply": [1e-4, 1e-4], "theta": [0, 90]}"#;
        let lam: Laminate = serde_json::from_str(json).unwrap();
        assert_eq!(lam.ply_count(), 4);

        let bad = r#"{"matid": [0], "nply": [2, 2], "tply": [1e-4, 1e-4], "theta": [0, 90]}"#;
        assert!(serde_json::from_str::<Laminate>(bad).is_err());
    }
}
