//! Load cases

use serde::{Deserialize, Serialize};

use crate::error::CltResult;
use crate::math::{AbdMatrix, Vec6};

/// Laminate resultant applied in a load case
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resultant {
    /// Mid-plane strains and curvatures
    /// [eps_x, eps_y, gamma_xy, kappa_x, kappa_y, kappa_xy]
    Strain([f64; 6]),
    /// Running forces and moments [Nx, Ny, Nxy, Mx, My, Mxy]
    Force([f64; 6]),
}

impl Resultant {
    /// Mid-plane strains and curvatures of the laminate under this resultant
    pub fn strain(&self, abd: &AbdMatrix) -> CltResult<Vec6> {
        match self {
            Self::Strain(strain) => Ok(Vec6::from_row_slice(strain)),
            Self::Force(loads) => abd.resultant_strain(&Vec6::from_row_slice(loads)),
        }
    }

    /// Running forces and moments of the laminate under this resultant
    pub fn loads(&self, abd: &AbdMatrix) -> Vec6 {
        match self {
            Self::Strain(strain) => abd.resultant_loads(&Vec6::from_row_slice(strain)),
            Self::Force(loads) => Vec6::from_row_slice(loads),
        }
    }
}

/// A named laminate resultant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCase {
    /// Name of the load case
    pub name: String,
    /// Description of the load case
    #[serde(default)]
    pub description: Option<String>,
    pub resultant: Resultant,
}

impl LoadCase {
    /// Load case with applied mid-plane strains and curvatures
    pub fn strains(name: &str, strain: [f64; 6]) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            resultant: Resultant::Strain(strain),
        }
    }

    /// Load case with applied running forces and moments
    pub fn forces(name: &str, loads: [f64; 6]) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            resultant: Resultant::Force(loads),
        }
    }

    /// Uniaxial running load Nx (negative in compression)
    pub fn axial(name: &str, nx: f64) -> Self {
        Self::forces(name, [nx, 0.0, 0.0, 0.0, 0.0, 0.0])
    }

    /// In-plane shear running load Nxy
    pub fn shear(name: &str, nxy: f64) -> Self {
        Self::forces(name, [0.0, 0.0, nxy, 0.0, 0.0, 0.0])
    }

    /// Attach a description
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}
