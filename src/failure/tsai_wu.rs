//! Tsai-Wu quadratic interaction criterion
//!
//! F1 s1 + F2 s2 + F11 s1^2 + F22 s2^2 + F66 t12^2 + 2 F12 s1 s2 = 1 at failure.
//! The linear and quadratic terms come from the five ply strengths. The
//! interaction term needs a biaxial test; without one F12 = f12* sqrt(F11 F22)
//! with f12* = -1/2.

use serde::{Deserialize, Serialize};

use super::{FailureEvaluation, FailureTheory};
use crate::elements::Strengths;
use crate::error::{CltError, CltResult};
use crate::math::Vec3;

pub const MODES: [&str; 1] = ["tsai-wu"];

/// Strength tensor coefficients of the Tsai-Wu criterion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TsaiWuCoefficients {
    pub f1: f64,
    pub f2: f64,
    pub f11: f64,
    pub f22: f64,
    pub f66: f64,
    pub f12: f64,
}

impl TsaiWuCoefficients {
    /// Default normalized interaction coefficient f12*
    pub const DEFAULT_INTERACTION: f64 = -0.5;

    /// Coefficients from the ply strengths with f12* = -1/2
    pub fn from_strengths(strengths: &Strengths) -> Self {
        Self::build(strengths, Self::DEFAULT_INTERACTION)
    }

    /// Coefficients from the ply strengths with an explicit normalized
    /// interaction coefficient. The failure surface is a closed ellipsoid only
    /// for -1 < f12* < 1.
    pub fn with_interaction(strengths: &Strengths, f12_star: f64) -> CltResult<Self> {
        if !(f12_star.is_finite() && f12_star.abs() < 1.0) {
            return Err(CltError::InvalidInput(format!(
                "Tsai-Wu interaction coefficient must lie in (-1, 1), got {}",
                f12_star
            )));
        }
        Ok(Self::build(strengths, f12_star))
    }

    fn build(strengths: &Strengths, f12_star: f64) -> Self {
        let Strengths { xt, xc, yt, yc, s } = *strengths;
        let f11 = 1.0 / (xt * xc);
        let f22 = 1.0 / (yt * yc);

        Self {
            f1: 1.0 / xt - 1.0 / xc,
            f2: 1.0 / yt - 1.0 / yc,
            f11,
            f22,
            f66: 1.0 / (s * s),
            f12: f12_star * (f11 * f22).sqrt(),
        }
    }

    /// Linear part of the criterion
    fn linear(&self, stress: &Vec3) -> f64 {
        self.f1 * stress[0] + self.f2 * stress[1]
    }

    /// Quadratic part of the criterion
    fn quadratic(&self, stress: &Vec3) -> f64 {
        let (s1, s2, t12) = (stress[0], stress[1], stress[2]);
        self.f11 * s1 * s1 + self.f22 * s2 * s2 + self.f66 * t12 * t12 + 2.0 * self.f12 * s1 * s2
    }

    /// Value of the quadratic form
    pub fn index(&self, stress: &Vec3) -> f64 {
        self.linear(stress) + self.quadratic(stress)
    }

    /// Smallest positive load multiplier k with index(k stress) = 1,
    /// i.e. the positive root of a k^2 + b k - 1 = 0
    pub fn safety_factor(&self, stress: &Vec3) -> f64 {
        let a = self.quadratic(stress);
        let b = self.linear(stress);

        if a.abs() <= f64::EPSILON * b.abs().max(f64::MIN_POSITIVE) {
            return if b > 0.0 { 1.0 / b } else { f64::INFINITY };
        }

        let discriminant = b * b + 4.0 * a;
        if discriminant < 0.0 {
            return f64::INFINITY;
        }

        let root = discriminant.sqrt();
        [(-b + root) / (2.0 * a), (-b - root) / (2.0 * a)]
            .into_iter()
            .filter(|k| *k > 0.0)
            .fold(f64::INFINITY, f64::min)
    }
}

/// Tsai-Wu with coefficients derived from the strengths (f12* = -1/2)
pub fn evaluate(stress: &Vec3, strengths: &Strengths) -> FailureEvaluation {
    evaluate_with(stress, &TsaiWuCoefficients::from_strengths(strengths))
}

/// Tsai-Wu with caller-supplied coefficients
pub fn evaluate_with(stress: &Vec3, coefficients: &TsaiWuCoefficients) -> FailureEvaluation {
    FailureEvaluation {
        theory: FailureTheory::TsaiWu,
        indices: vec![coefficients.index(stress)],
        safety_factors: vec![coefficients.safety_factor(stress)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn strengths() -> Strengths {
        Strengths::new(1500e6, 1200e6, 50e6, 200e6, 70e6)
    }

    #[test]
    fn test_uniaxial_strengths_on_surface() {
        let s = strengths();
        for stress in [
            Vec3::new(s.xt, 0.0, 0.0),
            Vec3::new(-s.xc, 0.0, 0.0),
            Vec3::new(0.0, s.yt, 0.0),
            Vec3::new(0.0, -s.yc, 0.0),
            Vec3::new(0.0, 0.0, s.s),
        ] {
            let eval = evaluate(&stress, &s);
            assert_relative_eq!(eval.failure_index(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(eval.safety_factor(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sign_flip_with_swapped_strengths() {
        let s = strengths();
        let stress = Vec3::new(700e6, -30e6, 25e6);
        let flipped = Vec3::new(-700e6, 30e6, 25e6);

        let a = evaluate(&stress, &s);
        let b = evaluate(&flipped, &s.swapped());
        assert_relative_eq!(a.failure_index(), b.failure_index(), max_relative = 1e-12);
        assert_relative_eq!(a.safety_factor(), b.safety_factor(), max_relative = 1e-12);
    }

    #[test]
    fn test_safety_factor_scales_to_surface() {
        let s = strengths();
        let stress = Vec3::new(300e6, 15e6, -20e6);
        let coefficients = TsaiWuCoefficients::from_strengths(&s);
        let k = coefficients.safety_factor(&stress);
        assert!(k > 1.0);
        assert_relative_eq!(coefficients.index(&(stress * k)), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_stress() {
        let eval = evaluate(&Vec3::zeros(), &strengths());
        assert_eq!(eval.failure_index(), 0.0);
        assert!(eval.safety_factor().is_infinite());
    }

    #[test]
    fn test_interaction_bounds() {
        assert!(TsaiWuCoefficients::with_interaction(&strengths(), 1.0).is_err());
        let c = TsaiWuCoefficients::with_interaction(&strengths(), 0.0).unwrap();
        assert_eq!(c.f12, 0.0);
    }
}
