//! Maximum stress criterion

use super::{linear_safety_factor, FailureEvaluation, FailureTheory};
use crate::elements::Strengths;
use crate::math::Vec3;

pub const MODES: [&str; 6] = [
    "longitudinal tension",
    "longitudinal compression",
    "transverse tension",
    "transverse compression",
    "positive shear",
    "negative shear",
];

/// Six independent stress ratios. Tension strengths only apply to positive
/// normal stress and compression strengths only to negative normal stress, so
/// at most three modes are active for any stress state.
pub fn evaluate(stress: &Vec3, strengths: &Strengths) -> FailureEvaluation {
    let (sigma1, sigma2, tau12) = (stress[0], stress[1], stress[2]);

    let indices = vec![
        (sigma1 / strengths.xt).max(0.0),
        (-sigma1 / strengths.xc).max(0.0),
        (sigma2 / strengths.yt).max(0.0),
        (-sigma2 / strengths.yc).max(0.0),
        (tau12 / strengths.s).max(0.0),
        (-tau12 / strengths.s).max(0.0),
    ];
    let safety_factors = indices.iter().copied().map(linear_safety_factor).collect();

    FailureEvaluation {
        theory: FailureTheory::MaxStress,
        indices,
        safety_factors,
    }
}
