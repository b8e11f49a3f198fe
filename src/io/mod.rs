//! Reading aircraft definitions and writing simulation output.

pub mod csv;
pub mod json;
