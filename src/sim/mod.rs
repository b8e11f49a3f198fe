//! Fixed-step simulation loop around an [`Aircraft`](crate::aircraft::Aircraft).

pub mod config;
pub mod pid;
pub mod pilot;
pub mod runner;

pub use config::SimConfig;
pub use pid::Pid;
pub use pilot::{AttitudeHoldPilot, HoldPilot, Pilot, StepPilot};
pub use runner::{simulate, simulate_with, Snapshot};
