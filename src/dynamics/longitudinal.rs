use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::derivatives::{AircraftDefinition, DerivativeSet, TrimCondition};
use crate::dynamics::linear::{LinearSystem, Lti};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Longitudinal state and input
// ---------------------------------------------------------------------------

/// Longitudinal state `[u, w, q, pitch, z]` plus the position and altitude
/// integrated outside the matrix update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LongitudinalState {
    pub u: f64,     // axial velocity perturbation
    pub w: f64,     // vertical velocity perturbation
    pub q: f64,     // pitch rate, rad/s
    pub pitch: f64, // rad
    pub z: f64,     // vertical position perturbation
    pub x: f64,     // distance flown
    pub h: f64,     // altitude, h0 + z
}

impl LongitudinalState {
    pub const NAMES: [&'static str; 7] = ["u", "w", "q", "pitch", "z", "x", "h"];

    fn from_vector(s: &DVector<f64>, x: f64, h0: f64) -> Self {
        Self {
            u: s[0],
            w: s[1],
            q: s[2],
            pitch: s[3],
            z: s[4],
            x,
            h: h0 + s[4],
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "u" => Some(self.u),
            "w" => Some(self.w),
            "q" => Some(self.q),
            "pitch" => Some(self.pitch),
            "z" => Some(self.z),
            "x" => Some(self.x),
            "h" => Some(self.h),
            _ => None,
        }
    }
}

/// Longitudinal control input, in B column order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LongitudinalInput {
    pub elevator: f64,
    pub thrust: f64,
}

impl LongitudinalInput {
    fn to_vector(self) -> DVector<f64> {
        DVector::from_vec(vec![self.elevator, self.thrust])
    }
}

// ---------------------------------------------------------------------------
// Longitudinal model
// ---------------------------------------------------------------------------

/// Linear pitch/climb/airspeed dynamics about a trim condition.
#[derive(Debug, Clone)]
pub struct LongitudinalModel {
    system: LinearSystem,
    trim: TrimCondition,
    position: f64,
    state: LongitudinalState,
}

impl LongitudinalModel {
    pub const N_STATES: usize = 5;
    pub const N_INPUTS: usize = 2;

    /// Build from a definition whose stability block is populated.
    pub fn new(definition: &AircraftDefinition) -> Result<Self> {
        Self::from_derivatives(&definition.stability, definition.trim)
    }

    pub fn from_derivatives(s: &DerivativeSet, trim: TrimCondition) -> Result<Self> {
        trim.validate()?;
        let (a, b) = system_matrices(s, &trim)?;
        let system = LinearSystem::new(a, b)?;
        let state = LongitudinalState::from_vector(system.state(), 0.0, trim.altitude);
        Ok(Self {
            system,
            trim,
            position: 0.0,
            state,
        })
    }

    /// Step the matrix system, then integrate distance flown at `U0 + u`.
    pub fn update(&mut self, dt: f64, input: LongitudinalInput) -> Result<()> {
        self.system.update(dt, Some(&input.to_vector()))?;
        let u = self.system.state()[0];
        self.position += (u + self.trim.airspeed) * dt;
        self.state = LongitudinalState::from_vector(self.system.state(), self.position, self.trim.altitude);
        Ok(())
    }

    pub fn state(&self) -> &LongitudinalState {
        &self.state
    }

    /// Input applied on the most recent step.
    pub fn input(&self) -> LongitudinalInput {
        let u = self.system.input();
        LongitudinalInput {
            elevator: u[0],
            thrust: u[1],
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
        self.position = 0.0;
        self.state = LongitudinalState::from_vector(self.system.state(), 0.0, self.trim.altitude);
    }
}

/// A and B for state `[u, w, q, pitch, z]`, input `[elevator, thrust]`.
///
/// The pitch row folds in the `M_wdot` coupling through the Z equation.
fn system_matrices(s: &DerivativeSet, trim: &TrimCondition) -> Result<(DMatrix<f64>, DMatrix<f64>)> {
    let u0 = trim.airspeed;
    let g = trim.g;
    let theta = trim.theta();

    let (xu, xw, xq) = (s.get("X", "u")?, s.get("X", "w")?, s.get("X", "q")?);
    let (zu, zw, zq) = (s.get("Z", "u")?, s.get("Z", "w")?, s.get("Z", "q")?);
    let (mu, mw, mq) = (s.get("M", "u")?, s.get("M", "w")?, s.get("M", "q")?);
    let mwdot = s.get("M", "wdot")?;

    #[rustfmt::skip]
    let a = DMatrix::from_row_slice(5, 5, &[
        xu,              xw,              xq,                        -g * theta.cos(), 0.0,
        zu,              zw,              zq + u0,                   -g * theta.sin(), 0.0,
        mu + mwdot * zu, mw + mwdot * zw, mq + mwdot * (zq + u0),    0.0,              0.0,
        0.0,             0.0,             1.0,                       0.0,              0.0,
        0.0,             -1.0,            0.0,                       u0,               0.0,
    ]);

    let (xde, xdth) = (s.get("X", "delta_e")?, s.get("X", "delta_th")?);
    let (zde, zdth) = (s.get("Z", "delta_e")?, s.get("Z", "delta_th")?);
    let (mde, mdth) = (s.get("M", "delta_e")?, s.get("M", "delta_th")?);

    #[rustfmt::skip]
    let b = DMatrix::from_row_slice(5, 2, &[
        xde,               xdth,
        zde,               zdth,
        mde + mwdot * zde, mdth + mwdot * zdth,
        0.0,               0.0,
        0.0,               0.0,
    ]);

    Ok((a, b))
}
