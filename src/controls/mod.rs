pub mod actuator;
pub mod first_order;
pub mod second_order;

pub use actuator::{Actuator, ActuatorOutput};
pub use first_order::FirstOrderSurface;
pub use second_order::{SecondOrderSurface, SecondOrderSurfaceBuilder};
