//! Hashin-Rotem criterion: separate fiber and matrix failure modes

use super::{linear_safety_factor, quadratic_safety_factor, FailureEvaluation, FailureTheory};
use crate::elements::Strengths;
use crate::math::Vec3;

pub const MODES: [&str; 4] = [
    "fiber tension",
    "fiber compression",
    "matrix tension",
    "matrix compression",
];

/// Fiber modes depend on sigma1 alone; matrix modes combine sigma2 and tau12.
/// Only one fiber mode and one matrix mode are active for a given stress, the
/// inactive ones report an index of zero.
pub fn evaluate(stress: &Vec3, strengths: &Strengths) -> FailureEvaluation {
    let (sigma1, sigma2, tau12) = (stress[0], stress[1], stress[2]);
    let shear = (tau12 / strengths.s).powi(2);

    let mut indices = vec![0.0; 4];
    let mut safety_factors = vec![f64::INFINITY; 4];

    if sigma1 >= 0.0 {
        indices[0] = sigma1 / strengths.xt;
        safety_factors[0] = linear_safety_factor(indices[0]);
    } else {
        indices[1] = -sigma1 / strengths.xc;
        safety_factors[1] = linear_safety_factor(indices[1]);
    }

    if sigma2 >= 0.0 {
        indices[2] = (sigma2 / strengths.yt).powi(2) + shear;
        safety_factors[2] = quadratic_safety_factor(indices[2]);
    } else {
        indices[3] = (sigma2 / strengths.yc).powi(2) + shear;
        safety_factors[3] = quadratic_safety_factor(indices[3]);
    }

    FailureEvaluation {
        theory: FailureTheory::HashinRotem,
        indices,
        safety_factors,
    }
}
