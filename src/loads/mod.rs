//! Laminate load cases

mod load_case;

pub use load_case::{LoadCase, Resultant};
