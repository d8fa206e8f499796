//! Analysis options and ply recovery

pub mod recovery;

use serde::{Deserialize, Serialize};

use crate::failure::FailureTheory;

pub use recovery::{ply_strains, ply_strains_from_arrays, ply_stresses, ply_stresses_from_arrays};

/// Options for a laminate analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Failure theory applied to every ply
    pub failure_theory: FailureTheory,
    /// Normalized Tsai-Wu interaction coefficient f12* (None = -1/2)
    pub tsai_wu_interaction: Option<f64>,
    /// Apply the SP-8001 knockdown to cylinder axial buckling
    pub cylinder_correlation: bool,
    /// Tolerance on |B| relative to sqrt(|A| |D|) below which the laminate
    /// counts as uncoupled
    pub coupling_tolerance: f64,
    /// Enable logging/progress output
    pub log: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            failure_theory: FailureTheory::MaxStress,
            tsai_wu_interaction: None,
            cylinder_correlation: true,
            coupling_tolerance: 1e-9,
            log: false,
        }
    }
}

impl AnalysisOptions {
    /// Default options with the given failure theory
    pub fn with_theory(mut self, theory: FailureTheory) -> Self {
        self.failure_theory = theory;
        self
    }

    /// Tsai-Wu with an explicit normalized interaction coefficient
    pub fn with_tsai_wu_interaction(mut self, f12_star: f64) -> Self {
        self.failure_theory = FailureTheory::TsaiWu;
        self.tsai_wu_interaction = Some(f12_star);
        self
    }

    /// Report theoretical cylinder buckling loads without the knockdown factor
    pub fn without_correlation(mut self) -> Self {
        self.cylinder_correlation = false;
        self
    }

    /// Enable logging
    pub fn with_logging(mut self) -> Self {
        self.log = true;
        self
    }
}
