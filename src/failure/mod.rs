//! Ply failure criteria
//!
//! Each theory maps a material-axis ply stress [sigma1, sigma2, tau12] and the
//! ply strengths to one or more failure indices. An index above one means the
//! ply fails in that mode. Safety factors give the load multiplier that brings
//! each mode's index to one (infinite for modes the stress state does not load).

pub mod hashin_rotem;
pub mod max_stress;
pub mod tsai_wu;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::elements::{Laminate, Material, Strengths};
use crate::error::{CltError, CltResult};
use crate::math::Vec3;

pub use tsai_wu::TsaiWuCoefficients;

/// Supported failure theories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureTheory {
    /// Maximum stress, six independent modes
    #[default]
    MaxStress,
    /// Tsai-Wu quadratic interaction, single index
    TsaiWu,
    /// Hashin-Rotem fiber/matrix modes
    HashinRotem,
}

impl FailureTheory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaxStress => "maxstress",
            Self::TsaiWu => "tsaiwu",
            Self::HashinRotem => "hashinrotem",
        }
    }

    /// Names of the modes reported by this theory, in output order
    pub fn mode_names(&self) -> &'static [&'static str] {
        match self {
            Self::MaxStress => &max_stress::MODES,
            Self::TsaiWu => &tsai_wu::MODES,
            Self::HashinRotem => &hashin_rotem::MODES,
        }
    }
}

impl fmt::Display for FailureTheory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailureTheory {
    type Err = CltError;

    fn from_str(s: &str) -> CltResult<Self> {
        match s {
            "maxstress" => Ok(Self::MaxStress),
            "tsaiwu" => Ok(Self::TsaiWu),
            "hashinrotem" => Ok(Self::HashinRotem),
            other => Err(CltError::UnknownFailureTheory(other.to_string())),
        }
    }
}

/// Failure indices and safety factors of one ply under one theory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureEvaluation {
    pub theory: FailureTheory,
    /// Failure index of each mode (see [`FailureTheory::mode_names`])
    pub indices: Vec<f64>,
    /// Safety factor of each mode
    pub safety_factors: Vec<f64>,
}

impl FailureEvaluation {
    /// Governing failure index (largest over all modes)
    pub fn failure_index(&self) -> f64 {
        self.indices.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Governing safety factor (smallest over all modes)
    pub fn safety_factor(&self) -> f64 {
        self.safety_factors.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Name of the mode with the largest index
    pub fn critical_mode(&self) -> &'static str {
        let names = self.theory.mode_names();
        let (i, _) = self
            .indices
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, &v)| {
                if v > best.1 {
                    (i, v)
                } else {
                    best
                }
            });
        names.get(i).copied().unwrap_or("unknown")
    }

    pub fn is_failed(&self) -> bool {
        self.failure_index() > 1.0
    }
}

/// Load multiplier of a mode whose index scales linearly with load
pub(crate) fn linear_safety_factor(index: f64) -> f64 {
    if index > 0.0 {
        1.0 / index
    } else {
        f64::INFINITY
    }
}

/// Load multiplier of a mode whose index scales with the square of the load
pub(crate) fn quadratic_safety_factor(index: f64) -> f64 {
    if index > 0.0 {
        1.0 / index.sqrt()
    } else {
        f64::INFINITY
    }
}

/// Evaluate a ply stress [sigma1, sigma2, tau12] with the given theory
pub fn evaluate(stress: &Vec3, strengths: &Strengths, theory: FailureTheory) -> FailureEvaluation {
    match theory {
        FailureTheory::MaxStress => max_stress::evaluate(stress, strengths),
        FailureTheory::TsaiWu => tsai_wu::evaluate(stress, strengths),
        FailureTheory::HashinRotem => hashin_rotem::evaluate(stress, strengths),
    }
}

/// [`evaluate`] with the stress given as separate components.
/// Unlike [`evaluate`], the strengths are checked first.
pub fn evaluate_components(
    sigma1: f64,
    sigma2: f64,
    tau12: f64,
    strengths: &Strengths,
    theory: FailureTheory,
) -> CltResult<FailureEvaluation> {
    strengths.validate()?;
    Ok(evaluate(&Vec3::new(sigma1, sigma2, tau12), strengths, theory))
}

/// [`evaluate`] using a material's strengths
pub fn evaluate_material(stress: &Vec3, material: &Material, theory: FailureTheory) -> FailureEvaluation {
    evaluate(stress, &material.strengths(), theory)
}

/// [`evaluate`] with an explicit Tsai-Wu interaction coefficient.
/// `tsai_wu_interaction` is ignored by the other theories.
pub fn evaluate_with_interaction(
    stress: &Vec3,
    strengths: &Strengths,
    theory: FailureTheory,
    tsai_wu_interaction: Option<f64>,
) -> CltResult<FailureEvaluation> {
    strengths.validate()?;
    match (theory, tsai_wu_interaction) {
        (FailureTheory::TsaiWu, Some(f12_star)) => {
            let coefficients = TsaiWuCoefficients::with_interaction(strengths, f12_star)?;
            Ok(tsai_wu::evaluate_with(stress, &coefficients))
        }
        _ => Ok(evaluate(stress, strengths, theory)),
    }
}

/// Evaluate every lamina group of a laminate.
///
/// # Arguments
/// * `stresses` - Material-axis stress of each lamina group
/// * `materials` - Material list indexed by the laminate's material ids
/// * `laminate` - Stacking sequence
/// * `theory` - Failure theory
pub fn evaluate_laminate(
    stresses: &[Vec3],
    materials: &[Material],
    laminate: &Laminate,
    theory: FailureTheory,
) -> CltResult<Vec<FailureEvaluation>> {
    if stresses.len() != laminate.len() {
        return Err(CltError::InvalidInput(format!(
            "{} ply stresses given for {} laminas",
            stresses.len(),
            laminate.len()
        )));
    }
    laminate.check_materials(materials.len())?;

    Ok(stresses
        .iter()
        .zip(laminate.groups())
        .map(|(stress, group)| evaluate_material(stress, &materials[group.material], theory))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strengths() -> Strengths {
        Strengths::new(1500e6, 1200e6, 50e6, 200e6, 70e6)
    }

    #[test]
    fn test_parse_theory() {
        assert_eq!("maxstress".parse::<FailureTheory>().unwrap(), FailureTheory::MaxStress);
        assert_eq!("tsaiwu".parse::<FailureTheory>().unwrap(), FailureTheory::TsaiWu);
        assert_eq!("hashinrotem".parse::<FailureTheory>().unwrap(), FailureTheory::HashinRotem);
        assert!(matches!(
            "vonmises".parse::<FailureTheory>(),
            Err(CltError::UnknownFailureTheory(_))
        ));
        for theory in [FailureTheory::MaxStress, FailureTheory::TsaiWu, FailureTheory::HashinRotem] {
            assert_eq!(theory.to_string().parse::<FailureTheory>().unwrap(), theory);
        }
    }

    #[test]
    fn test_mode_counts() {
        let stress = Vec3::new(100e6, 10e6, 5e6);
        for theory in [FailureTheory::MaxStress, FailureTheory::TsaiWu, FailureTheory::HashinRotem] {
            let eval = evaluate(&stress, &strengths(), theory);
            assert_eq!(eval.indices.len(), theory.mode_names().len());
            assert_eq!(eval.safety_factors.len(), theory.mode_names().len());
        }
    }

    #[test]
    fn test_critical_mode() {
        let eval = evaluate_components(0.0, 60e6, 0.0, &strengths(), FailureTheory::MaxStress).unwrap();
        assert_eq!(eval.critical_mode(), "transverse tension");
        assert!(eval.is_failed());
    }

    #[test]
    fn test_components_reject_invalid_strengths() {
        let zero_shear = Strengths::new(1500e6, 1200e6, 50e6, 200e6, 0.0);
        for theory in [FailureTheory::MaxStress, FailureTheory::TsaiWu, FailureTheory::HashinRotem] {
            let result = evaluate_components(0.0, 0.0, 10e6, &zero_shear, theory);
            assert!(matches!(result, Err(CltError::InvalidMaterial(_))));
        }
        let result = evaluate_with_interaction(&Vec3::zeros(), &zero_shear, FailureTheory::TsaiWu, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_interaction_only_affects_tsai_wu() {
        let stress = Vec3::new(500e6, 20e6, 10e6);
        let a = evaluate_with_interaction(&stress, &strengths(), FailureTheory::MaxStress, Some(0.0)).unwrap();
        assert_eq!(a, evaluate(&stress, &strengths(), FailureTheory::MaxStress));

        let b = evaluate_with_interaction(&stress, &strengths(), FailureTheory::TsaiWu, Some(0.0)).unwrap();
        let c = evaluate(&stress, &strengths(), FailureTheory::TsaiWu);
        // Negative default interaction relieves biaxial tension
        assert!(b.failure_index() > c.failure_index());
    }

    #[test]
    fn test_laminate_uses_each_groups_material() {
        let weak = Material::isotropic(70e9, 0.3, 2700.0, 100e6, 1e-3).unwrap();
        let materials = [Material::t300_5208(), weak];
        let laminate = Laminate::new(&[0, 1, 0], &[1, 2, 1], &[1e-4, 5e-4, 1e-4], &[0.0, 0.0, 90.0]).unwrap();
        let stresses = [
            Vec3::new(300e6, 10e6, 5e6),
            Vec3::new(50e6, -20e6, 10e6),
            Vec3::new(-100e6, 30e6, -5e6),
        ];

        for theory in [FailureTheory::MaxStress, FailureTheory::TsaiWu, FailureTheory::HashinRotem] {
            let evals = evaluate_laminate(&stresses, &materials, &laminate, theory).unwrap();
            assert_eq!(evals.len(), 3);
            for (eval, (stress, group)) in evals.iter().zip(stresses.iter().zip(laminate.groups())) {
                let strengths = materials[group.material].strengths();
                assert_eq!(*eval, evaluate(stress, &strengths, theory));
                assert_eq!(*eval, evaluate_material(stress, &materials[group.material], theory));
            }
        }

        // Middle group is judged against the isotropic 100 MPa strength
        let evals = evaluate_laminate(&stresses, &materials, &laminate, FailureTheory::MaxStress).unwrap();
        assert_eq!(evals[1].indices[0], 0.5);
        assert_eq!(evals[0].indices[0], 300e6 / 1500e6);
    }

    #[test]
    fn test_laminate_unknown_material() {
        let laminate = Laminate::new(&[0, 2], &[1, 1], &[1e-4, 1e-4], &[0.0, 90.0]).unwrap();
        let stresses = [Vec3::zeros(), Vec3::zeros()];
        let result = evaluate_laminate(&stresses, &[Material::default()], &laminate, FailureTheory::MaxStress);
        assert!(matches!(result, Err(CltError::MaterialNotFound(2))));
    }

    #[test]
    fn test_laminate_length_mismatch() {
        let laminate = Laminate::from_angles(0, 1e-4, &[0.0, 90.0]).unwrap();
        let result = evaluate_laminate(&[Vec3::zeros()], &[Material::default()], &laminate, FailureTheory::TsaiWu);
        assert!(matches!(result, Err(CltError::InvalidInput(_))));
    }
}
