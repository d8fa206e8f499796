//! Closed-form local buckling estimates for laminated panels and shells
//!
//! All models treat the buckle wave numbers as continuous rather than integer
//! so they can be eliminated analytically. This is an approximation that
//! slightly underestimates the critical load of short panels; it is kept on
//! purpose and no discrete wave-number search is performed.

pub mod cylinder;
pub mod plate;

use serde::{Deserialize, Serialize};

use crate::error::{CltError, CltResult};
use crate::math::Mat3;

pub use cylinder::{cylinder_bending_local_buckling, cylinder_uniaxial_local_buckling};
pub use plate::{plate_shear_local_buckling, plate_uniaxial_local_buckling};

/// Critical running load (N/m) and the matching strain magnitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucklingLoad {
    /// Critical load per unit width, positive
    pub load: f64,
    /// Strain at the critical load, reported as a positive magnitude
    pub strain: f64,
}

impl BucklingLoad {
    /// Load factor of an applied running load (critical / applied)
    pub fn margin(&self, applied: f64) -> f64 {
        if applied.abs() > 0.0 {
            self.load / applied.abs()
        } else {
            f64::INFINITY
        }
    }
}

pub(crate) fn check_dimension(name: &str, value: f64) -> CltResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CltError::InvalidGeometry(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

/// The closed-form models need positive direct stiffness terms
pub(crate) fn check_stiffness(a: &Mat3, d: &Mat3) -> CltResult<()> {
    for (name, value) in [
        ("A11", a[(0, 0)]),
        ("A22", a[(1, 1)]),
        ("A66", a[(2, 2)]),
        ("D11", d[(0, 0)]),
        ("D22", d[(1, 1)]),
        ("D66", d[(2, 2)]),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(CltError::InvalidInput(format!(
                "{} must be positive for buckling, got {}",
                name, value
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin() {
        let buckling = BucklingLoad { load: 2000.0, strain: 1e-3 };
        assert_eq!(buckling.margin(-500.0), 4.0);
        assert!(buckling.margin(0.0).is_infinite());
    }

    #[test]
    fn test_rejects_zero_stiffness() {
        let result = check_stiffness(&Mat3::identity(), &Mat3::zeros());
        assert!(matches!(result, Err(CltError::InvalidInput(_))));
        assert!(check_dimension("b", -1.0).is_err());
    }
}
