//! Material and laminate data model

mod laminate;
mod material;

pub use laminate::{z_coordinates, LaminaGroup, Laminate};
pub use material::{Material, Strengths};
