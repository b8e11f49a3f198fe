//! Linearized fixed-wing flight dynamics.
//!
//! Body-axis stability derivatives are rotated into the stability axes,
//! assembled into lateral and longitudinal state-space models, and stepped
//! with forward Euler behind per-surface actuator models.

pub mod aircraft;
pub mod controls;
pub mod derivatives;
pub mod dynamics;
pub mod error;
pub mod io;
pub mod presets;
pub mod sim;

pub use aircraft::{Aircraft, AircraftAttributes, AircraftBuilder, Control, ControlInputs};
pub use derivatives::{AircraftDefinition, DerivativeSet, TrimCondition};
pub use error::{Error, Result};
