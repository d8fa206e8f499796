//! CLT Solver - Classical Lamination Theory for composite laminates
//!
//! This library provides the in-plane analysis of thin laminated composites:
//! - Ply stiffness and its rotation to arbitrary fiber angles
//! - ABD stiffness assembly and compliance
//! - Ply strain and stress recovery from laminate resultants
//! - Failure criteria (maximum stress, Tsai-Wu, Hashin-Rotem)
//! - Closed-form local buckling of long flat panels and cylinders
//!
//! ## Example
//! ```rust
//! use clt_solver::prelude::*;
//!
//! let mat = Material::t300_5208();
//! let half = Laminate::from_angles(0, mat.ply_thickness(), &[0.0, 45.0, -45.0, 90.0]).unwrap();
//!
//! let mut model = LaminateModel::new(vec![mat], half.symmetric())
//!     .unwrap()
//!     .with_geometry(Geometry::FlatPanel { width: 0.15 });
//!
//! // Running loads in N/m
//! model.add_load_case(LoadCase::axial("Compression", -5.0e4)).unwrap();
//!
//! let options = AnalysisOptions::default().with_theory(FailureTheory::TsaiWu);
//! let results = model.analyze(&options).unwrap();
//!
//! let case = results.load_case("Compression").unwrap();
//! assert!(case.min_safety_factor > 1.0);
//! ```

pub mod analysis;
pub mod buckling;
pub mod elements;
pub mod error;
pub mod failure;
pub mod loads;
pub mod math;
pub mod model;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::AnalysisOptions;
    pub use crate::buckling::BucklingLoad;
    pub use crate::elements::{LaminaGroup, Laminate, Material, Strengths};
    pub use crate::error::{CltError, CltResult};
    pub use crate::failure::{FailureEvaluation, FailureTheory};
    pub use crate::loads::{LoadCase, Resultant};
    pub use crate::math::{AbdMatrix, Compliance, EffectiveProperties};
    pub use crate::model::{Geometry, LaminateModel};
    pub use crate::results::{BucklingResults, LaminateResults, LoadCaseResult, PlyResult};
}
