//! Ply material properties

use serde::{Deserialize, Serialize};

use crate::error::{CltError, CltResult};
use crate::math::{self, Mat3};

/// Ultimate in-plane strengths of a unidirectional ply, all positive magnitudes in Pa
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Strengths {
    /// Longitudinal tensile strength
    pub xt: f64,
    /// Longitudinal compressive strength
    pub xc: f64,
    /// Transverse tensile strength
    pub yt: f64,
    /// Transverse compressive strength
    pub yc: f64,
    /// In-plane shear strength
    pub s: f64,
}

impl Strengths {
    pub fn new(xt: f64, xc: f64, yt: f64, yc: f64, s: f64) -> Self {
        Self { xt, xc, yt, yc, s }
    }

    /// [`Strengths::new`] rejecting non-positive or non-finite values
    pub fn try_new(xt: f64, xc: f64, yt: f64, yc: f64, s: f64) -> CltResult<Self> {
        let strengths = Self::new(xt, xc, yt, yc, s);
        strengths.validate()?;
        Ok(strengths)
    }

    /// Tension and compression strengths swapped in both directions
    pub fn swapped(&self) -> Self {
        Self {
            xt: self.xc,
            xc: self.xt,
            yt: self.yc,
            yc: self.yt,
            s: self.s,
        }
    }

    /// Every strength must be a positive finite magnitude
    pub fn validate(&self) -> CltResult<()> {
        for (name, value) in [
            ("xt", self.xt),
            ("xc", self.xc),
            ("yt", self.yt),
            ("yc", self.yc),
            ("s", self.s),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CltError::InvalidMaterial(format!(
                    "strength {} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Orthotropic ply material for in-plane laminate analysis.
///
/// Moduli and strengths are in Pa, density in kg/m³ and the nominal ply
/// thickness in m. Values are validated once in [`Material::new`] and the
/// struct cannot be mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MaterialData")]
pub struct Material {
    e1: f64,
    e2: f64,
    g12: f64,
    nu12: f64,
    rho: f64,
    xt: f64,
    xc: f64,
    yt: f64,
    yc: f64,
    s: f64,
    t: f64,
}

/// Unvalidated material record as it appears in model files
#[derive(Debug, Clone, Deserialize)]
struct MaterialData {
    e1: f64,
    e2: f64,
    g12: f64,
    nu12: f64,
    #[serde(default)]
    rho: f64,
    xt: f64,
    xc: f64,
    yt: f64,
    yc: f64,
    s: f64,
    t: f64,
}

impl TryFrom<MaterialData> for Material {
    type Error = CltError;

    fn try_from(data: MaterialData) -> CltResult<Self> {
        Material::new(
            data.e1,
            data.e2,
            data.g12,
            data.nu12,
            data.rho,
            Strengths::new(data.xt, data.xc, data.yt, data.yc, data.s),
            data.t,
        )
    }
}

impl Material {
    /// Create a new material, checking that it is physically admissible
    pub fn new(
        e1: f64,
        e2: f64,
        g12: f64,
        nu12: f64,
        rho: f64,
        strengths: Strengths,
        t: f64,
    ) -> CltResult<Self> {
        // Elastic constants share their checks with the stiffness builder
        math::reduced_stiffness(e1, e2, g12, nu12)?;
        strengths.validate()?;

        if !(rho.is_finite() && rho >= 0.0) {
            return Err(CltError::InvalidMaterial(format!(
                "density must be non-negative, got {}",
                rho
            )));
        }
        if !(t.is_finite() && t > 0.0) {
            return Err(CltError::InvalidMaterial(format!(
                "ply thickness must be positive, got {}",
                t
            )));
        }

        Ok(Self {
            e1,
            e2,
            g12,
            nu12,
            rho,
            xt: strengths.xt,
            xc: strengths.xc,
            yt: strengths.yt,
            yc: strengths.yc,
            s: strengths.s,
            t,
        })
    }

    /// Quasi-isotropic stand-in with E1 = E2 and G = E / (2 (1 + nu)).
    /// The same strength is used for every mode.
    pub fn isotropic(e: f64, nu: f64, rho: f64, strength: f64, t: f64) -> CltResult<Self> {
        let g = e / (2.0 * (1.0 + nu));
        Self::new(
            e,
            e,
            g,
            nu,
            rho,
            Strengths::new(strength, strength, strength, strength, strength),
            t,
        )
    }

    /// T300/5208 carbon/epoxy (Tsai)
    pub fn t300_5208() -> Self {
        Self {
            e1: 181e9,
            e2: 10.3e9,
            g12: 7.17e9,
            nu12: 0.28,
            rho: 1600.0,
            xt: 1500e6,
            xc: 1500e6,
            yt: 40e6,
            yc: 246e6,
            s: 68e6,
            t: 0.125e-3,
        }
    }

    /// AS4/3501-6 carbon/epoxy (Daniel & Ishai)
    pub fn as4_3501_6() -> Self {
        Self {
            e1: 147e9,
            e2: 10.3e9,
            g12: 7.0e9,
            nu12: 0.27,
            rho: 1580.0,
            xt: 2280e6,
            xc: 1440e6,
            yt: 57e6,
            yc: 228e6,
            s: 71e6,
            t: 0.13e-3,
        }
    }

    pub fn e1(&self) -> f64 {
        self.e1
    }

    pub fn e2(&self) -> f64 {
        self.e2
    }

    pub fn g12(&self) -> f64 {
        self.g12
    }

    pub fn nu12(&self) -> f64 {
        self.nu12
    }

    /// Minor Poisson's ratio nu21 = nu12 E2 / E1
    pub fn nu21(&self) -> f64 {
        self.nu12 * self.e2 / self.e1
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Nominal ply thickness
    pub fn ply_thickness(&self) -> f64 {
        self.t
    }

    pub fn strengths(&self) -> Strengths {
        Strengths::new(self.xt, self.xc, self.yt, self.yc, self.s)
    }

    /// Reduced stiffness matrix in material axes
    pub fn q(&self) -> Mat3 {
        math::orthotropic_q(self.e1, self.e2, self.g12, self.nu12)
    }

    /// Reduced stiffness matrix rotated `theta` degrees
    pub fn q_rotated(&self, theta: f64) -> Mat3 {
        math::rotate_q(&self.q(), theta)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::t300_5208()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_presets_are_valid() {
        for mat in [Material::t300_5208(), Material::as4_3501_6()] {
            let rebuilt = Material::new(
                mat.e1(),
                mat.e2(),
                mat.g12(),
                mat.nu12(),
                mat.rho(),
                mat.strengths(),
                mat.ply_thickness(),
            )
            .unwrap();
            assert_eq!(rebuilt, mat);
        }
    }

    #[test]
    fn test_isotropic_shear_modulus() {
        let mat = Material::isotropic(70e9, 0.3, 2700.0, 300e6, 1e-3).unwrap();
        assert_relative_eq!(mat.g12(), 70e9 / 2.6, max_relative = 1e-12);
        assert_relative_eq!(mat.nu21(), 0.3, max_relative = 1e-12);
    }

    #[test]
    fn test_rejects_non_physical_poisson_ratio() {
        // nu12^2 * E2 / E1 = 4 * 0.5 = 2 > 1
        let result = Material::new(
            10e9,
            5e9,
            2e9,
            2.0,
            1500.0,
            Strengths::new(1.0, 1.0, 1.0, 1.0, 1.0),
            1e-4,
        );
        assert!(matches!(result, Err(CltError::InvalidMaterial(_))));
    }

    #[test]
    fn test_rejects_non_positive_strength() {
        let result = Material::new(
            100e9,
            10e9,
            5e9,
            0.3,
            1500.0,
            Strengths::new(1e9, 1e9, 0.0, 1e8, 5e7),
            1e-4,
        );
        assert!(matches!(result, Err(CltError::InvalidMaterial(_))));
    }

    #[test]
    fn test_strengths_try_new() {
        assert!(Strengths::try_new(1e9, 1e9, 5e7, 2e8, 7e7).is_ok());
        assert!(matches!(
            Strengths::try_new(1e9, -1e9, 5e7, 2e8, 7e7),
            Err(CltError::InvalidMaterial(_))
        ));
        assert!(Strengths::new(1e9, 1e9, 5e7, 2e8, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"e1": 1e11, "e2": 1e10, "g12": 5e9, "nu12": 0.3,
            "xt": 1e9, "xc": 1e9, "yt": 5e7, "yc": 2e8, "s": 7e7, "t": -1e-4}"#;
        assert!(serde_json::from_str::<Material>(json).is_err());

        let json = json.replace("-1e-4", "1e-4");
        let mat: Material = serde_json::from_str(&json).unwrap();
        assert_eq!(mat.rho(), 0.0);
        assert_eq!(mat.strengths().yt, 5e7);
    }
}
