use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::derivatives::{AircraftDefinition, DerivativeSet, TrimCondition};
use crate::dynamics::linear::{LinearSystem, Lti};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Lateral state and input
// ---------------------------------------------------------------------------

/// Lateral perturbation state: `[v, p, r, roll, yaw, y]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LateralState {
    pub v: f64,    // sideslip velocity
    pub p: f64,    // roll rate, rad/s
    pub r: f64,    // yaw rate, rad/s
    pub roll: f64, // rad
    pub yaw: f64,  // rad
    pub y: f64,    // lateral position
}

impl LateralState {
    pub const NAMES: [&'static str; 6] = ["v", "p", "r", "roll", "yaw", "y"];

    fn from_vector(x: &DVector<f64>) -> Self {
        Self {
            v: x[0],
            p: x[1],
            r: x[2],
            roll: x[3],
            yaw: x[4],
            y: x[5],
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "v" => Some(self.v),
            "p" => Some(self.p),
            "r" => Some(self.r),
            "roll" => Some(self.roll),
            "yaw" => Some(self.yaw),
            "y" => Some(self.y),
            _ => None,
        }
    }
}

/// Lateral control input, in B column order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LateralInput {
    pub aileron: f64,
    pub rudder: f64,
}

impl LateralInput {
    fn to_vector(self) -> DVector<f64> {
        DVector::from_vec(vec![self.aileron, self.rudder])
    }
}

// ---------------------------------------------------------------------------
// Lateral model
// ---------------------------------------------------------------------------

/// Linear roll/yaw/sideslip dynamics about a trim condition.
#[derive(Debug, Clone)]
pub struct LateralModel {
    system: LinearSystem,
    trim: TrimCondition,
    state: LateralState,
}

impl LateralModel {
    pub const N_STATES: usize = 6;
    pub const N_INPUTS: usize = 2;

    /// Build from a definition whose stability block is populated.
    pub fn new(definition: &AircraftDefinition) -> Result<Self> {
        Self::from_derivatives(&definition.stability, definition.trim)
    }

    pub fn from_derivatives(s: &DerivativeSet, trim: TrimCondition) -> Result<Self> {
        trim.validate()?;
        let (a, b) = system_matrices(s, &trim)?;
        let system = LinearSystem::new(a, b)?;
        let state = LateralState::from_vector(system.state());
        Ok(Self { system, trim, state })
    }

    pub fn update(&mut self, dt: f64, input: LateralInput) -> Result<()> {
        self.system.update(dt, Some(&input.to_vector()))?;
        self.state = LateralState::from_vector(self.system.state());
        Ok(())
    }

    pub fn state(&self) -> &LateralState {
        &self.state
    }

    /// Input applied on the most recent step.
    pub fn input(&self) -> LateralInput {
        let u = self.system.input();
        LateralInput {
            aileron: u[0],
            rudder: u[1],
        }
    }

    pub fn system(&self) -> &LinearSystem {
        &self.system
    }

    pub fn trim(&self) -> &TrimCondition {
        &self.trim
    }

    pub fn lti(&self) -> Result<Lti> {
        self.system.lti(None, None)
    }

    pub fn reset(&mut self) {
        self.system.reset();
        self.state = LateralState::default();
    }
}

/// A and B for state `[v, p, r, roll, yaw, y]`, input `[aileron, rudder]`.
fn system_matrices(s: &DerivativeSet, trim: &TrimCondition) -> Result<(DMatrix<f64>, DMatrix<f64>)> {
    let u0 = trim.airspeed;
    let g = trim.g;
    let theta = trim.theta();

    let (yv, yp, yr) = (s.get("Y", "v")?, s.get("Y", "p")?, s.get("Y", "r")?);
    let (lv, lp, lr) = (s.get("Lprime", "v")?, s.get("Lprime", "p")?, s.get("Lprime", "r")?);
    let (nv, np, nr) = (s.get("Nprime", "v")?, s.get("Nprime", "p")?, s.get("Nprime", "r")?);

    #[rustfmt::skip]
    let a = DMatrix::from_row_slice(6, 6, &[
        yv,  yp,  yr - u0,           g * theta.cos(), 0.0, 0.0,
        lv,  lp,  lr,                g * theta.sin(), 0.0, 0.0,
        nv,  np,  nr,                0.0,             0.0, 0.0,
        0.0, 1.0, theta.tan(),       0.0,             0.0, 0.0,
        0.0, 0.0, 1.0 / theta.cos(), 0.0,             0.0, 0.0,
        1.0, 0.0, 0.0,               0.0,             u0,  0.0,
    ]);

    #[rustfmt::skip]
    let b = DMatrix::from_row_slice(6, 2, &[
        s.get("Y", "delta_a")?,      s.get("Y", "delta_r")?,
        s.get("Lprime", "delta_a")?, s.get("Lprime", "delta_r")?,
        s.get("Nprime", "delta_a")?, s.get("Nprime", "delta_r")?,
        0.0, 0.0,
        0.0, 0.0,
        0.0, 0.0,
    ]);

    Ok((a, b))
}
