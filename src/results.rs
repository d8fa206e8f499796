//! Result types for laminate analysis
//!
//! Infinite safety factors (unloaded modes) serialize to JSON `null`.

use serde::{Deserialize, Serialize};

use crate::buckling::BucklingLoad;
use crate::failure::FailureEvaluation;
use crate::math::{AbdMatrix, Compliance, EffectiveProperties, Vec3};

/// Strain, stress and failure of one lamina group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlyResult {
    /// Lamina group index, bottom to top
    pub group: usize,
    /// Material id
    pub material: usize,
    /// Orientation in degrees
    pub angle: f64,
    /// Mid-plane z of the group
    pub z: f64,
    /// Material-axis strain [eps1, eps2, gamma12]
    pub strain: [f64; 3],
    /// Material-axis stress [sigma1, sigma2, tau12]
    pub stress: [f64; 3],
    pub failure: FailureEvaluation,
}

impl PlyResult {
    pub(crate) fn new(
        group: usize,
        material: usize,
        angle: f64,
        z: f64,
        strain: &Vec3,
        stress: &Vec3,
        failure: FailureEvaluation,
    ) -> Self {
        Self {
            group,
            material,
            angle,
            z,
            strain: [strain[0], strain[1], strain[2]],
            stress: [stress[0], stress[1], stress[2]],
            failure,
        }
    }
}

/// Ply results of a single load case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadCaseResult {
    /// Name of the load case
    pub name: String,
    /// Mid-plane strains and curvatures [eps_x, eps_y, gamma_xy, kappa_x, kappa_y, kappa_xy]
    pub resultant_strain: [f64; 6],
    /// Running forces and moments [Nx, Ny, Nxy, Mx, My, Mxy]
    pub resultant_loads: [f64; 6],
    /// One entry per lamina group
    pub plies: Vec<PlyResult>,
    /// Group with the smallest safety factor
    pub critical_ply: usize,
    /// Smallest safety factor over all plies and modes
    pub min_safety_factor: f64,
    /// Critical buckling load over the applied compressive (or shear) load
    pub buckling_margin: Option<f64>,
}

impl LoadCaseResult {
    /// Groups whose failure index exceeds one
    pub fn failed_plies(&self) -> Vec<usize> {
        self.plies
            .iter()
            .filter(|p| p.failure.is_failed())
            .map(|p| p.group)
            .collect()
    }

    /// Largest failure index over all plies and modes
    pub fn max_failure_index(&self) -> f64 {
        self.plies
            .iter()
            .map(|p| p.failure.failure_index())
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Local buckling estimates for the model geometry
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BucklingResults {
    FlatPanel {
        uniaxial: BucklingLoad,
        shear: BucklingLoad,
    },
    /// `bending` is the allowable peak compressive running load under
    /// bending. Laminate moments are not shell bending moments, so it is
    /// reported but not checked against the load cases.
    Cylinder {
        uniaxial: BucklingLoad,
        bending: BucklingLoad,
    },
}

impl BucklingResults {
    /// Axial compression buckling load
    pub fn uniaxial(&self) -> BucklingLoad {
        match self {
            Self::FlatPanel { uniaxial, .. } | Self::Cylinder { uniaxial, .. } => *uniaxial,
        }
    }

    /// Smallest margin over the loads this geometry is checked for.
    ///
    /// Only compressive Nx and (for panels) Nxy count; tension never buckles.
    /// Cylinders are checked against the uniaxial load only.
    pub fn margin(&self, loads: &[f64; 6]) -> Option<f64> {
        let axial = (loads[0] < 0.0).then(|| self.uniaxial().margin(loads[0]));
        let shear = match self {
            Self::FlatPanel { shear, .. } if loads[2] != 0.0 => Some(shear.margin(loads[2])),
            _ => None,
        };

        match (axial, shear) {
            (Some(a), Some(s)) => Some(a.min(s)),
            (a, s) => a.or(s),
        }
    }
}

/// Complete results of a laminate analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaminateResults {
    pub abd: AbdMatrix,
    pub compliance: Compliance,
    pub properties: EffectiveProperties,
    /// Total laminate thickness
    pub thickness: f64,
    /// Mass per unit area in kg/m²
    pub areal_density: f64,
    /// True when B is negligible
    pub uncoupled: bool,
    pub load_cases: Vec<LoadCaseResult>,
    pub buckling: Option<BucklingResults>,
}

impl LaminateResults {
    /// Results of the named load case
    pub fn load_case(&self, name: &str) -> Option<&LoadCaseResult> {
        self.load_cases.iter().find(|c| c.name == name)
    }

    /// Smallest ply safety factor over all load cases
    pub fn min_safety_factor(&self) -> f64 {
        self.load_cases
            .iter()
            .map(|c| c.min_safety_factor)
            .fold(f64::INFINITY, f64::min)
    }
}
