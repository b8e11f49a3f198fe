pub mod lateral;
pub mod linear;
pub mod longitudinal;

pub use lateral::{LateralInput, LateralModel, LateralState};
pub use linear::{LinearSystem, Lti};
pub use longitudinal::{LongitudinalInput, LongitudinalModel, LongitudinalState};
