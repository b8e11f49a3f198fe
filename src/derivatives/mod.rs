//! Aerodynamic stability derivatives and the trim condition they are
//! evaluated at.
//!
//! Derivatives are kept as a nested mapping `axis -> variable -> value`
//! (for example `Lprime.p` is the roll-moment derivative with respect to roll
//! rate). An [`AircraftDefinition`] carries the body-axis set, which is the
//! source of truth, alongside the stability-axis set derived from it.

pub mod assemble;
pub mod transform;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use assemble::{assemble_stability, backfill_body};
pub use transform::{
    lateral_to_body_axis, lateral_to_stability_axis, longitudinal_to_body_axis,
    longitudinal_to_stability_axis, AxisGroup,
};

// ---------------------------------------------------------------------------
// Derivative set
// ---------------------------------------------------------------------------

/// Nested mapping from axis name to variable name to derivative value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DerivativeSet(BTreeMap<String, BTreeMap<String, f64>>);

impl DerivativeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a derivative, failing if either the axis or the variable is absent.
    pub fn get(&self, axis: &str, variable: &str) -> Result<f64> {
        self.try_get(axis, variable)
            .ok_or_else(|| Error::missing(axis, variable))
    }

    pub fn try_get(&self, axis: &str, variable: &str) -> Option<f64> {
        self.0.get(axis).and_then(|vars| vars.get(variable)).copied()
    }

    pub fn contains(&self, axis: &str, variable: &str) -> bool {
        self.try_get(axis, variable).is_some()
    }

    pub fn set(&mut self, axis: &str, variable: &str, value: f64) {
        self.0
            .entry(axis.to_string())
            .or_default()
            .insert(variable.to_string(), value);
    }

    /// Chainable form of [`DerivativeSet::set`].
    pub fn with(mut self, axis: &str, variable: &str, value: f64) -> Self {
        self.set(axis, variable, value);
        self
    }

    /// Copy every entry of `other` into `self`, overwriting shared keys.
    pub fn merge(&mut self, other: &DerivativeSet) {
        for (axis, vars) in &other.0 {
            let target = self.0.entry(axis.clone()).or_default();
            for (variable, value) in vars {
                target.insert(variable.clone(), *value);
            }
        }
    }

    pub fn axis(&self, axis: &str) -> Option<&BTreeMap<String, f64>> {
        self.0.get(axis)
    }

    pub fn axes(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeMap::is_empty)
    }

    /// Total number of scalar entries across all axes.
    pub fn len(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }
}

// ---------------------------------------------------------------------------
// Trim condition
// ---------------------------------------------------------------------------

/// Steady reference flight state the derivatives are linearized about.
///
/// Angles are stored in degrees, as published; use [`TrimCondition::alpha`]
/// and [`TrimCondition::theta`] for radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimCondition {
    /// Nominal airspeed.
    #[serde(rename = "U0")]
    pub airspeed: f64,
    /// Trim angle of attack, deg.
    #[serde(rename = "alpha0")]
    pub alpha_deg: f64,
    /// Trim pitch angle, deg.
    #[serde(rename = "theta0")]
    pub theta_deg: f64,
    /// Reference altitude.
    #[serde(rename = "h0")]
    pub altitude: f64,
    /// Gravitational acceleration.
    pub g: f64,
}

impl TrimCondition {
    pub fn alpha(&self) -> f64 {
        self.alpha_deg.to_radians()
    }

    pub fn theta(&self) -> f64 {
        self.theta_deg.to_radians()
    }

    /// Reject trims the linear models cannot be built around.
    pub fn validate(&self) -> Result<()> {
        if !(self.airspeed.is_finite() && self.airspeed > 0.0) {
            return Err(Error::InvalidTrim {
                field: "U0",
                value: self.airspeed,
            });
        }
        // Lateral kinematics divide by cos(theta0).
        if !self.theta_deg.is_finite() || self.theta().cos().abs() < 1e-9 {
            return Err(Error::InvalidTrim {
                field: "theta0",
                value: self.theta_deg,
            });
        }
        for (field, value) in [("alpha0", self.alpha_deg), ("h0", self.altitude), ("g", self.g)] {
            if !value.is_finite() {
                return Err(Error::InvalidTrim { field, value });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Aircraft definition
// ---------------------------------------------------------------------------

/// Everything needed to build the linear models of one aircraft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub trim: TrimCondition,
    /// Body-axis derivatives (source of truth).
    pub body: DerivativeSet,
    /// Stability-axis derivatives, derived from `body`.
    #[serde(default)]
    pub stability: DerivativeSet,
}

impl AircraftDefinition {
    pub fn new(trim: TrimCondition, body: DerivativeSet) -> Self {
        Self {
            name: None,
            trim,
            body,
            stability: DerivativeSet::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Make sure the stability-axis block is populated.
    ///
    /// Recomputes it from the body block when one is present. A definition
    /// carrying only a complete stability block is accepted as is.
    pub fn ensure_stability(&mut self) -> Result<()> {
        let stability_only = self.body.is_empty()
            && AxisGroup::Lateral.is_complete(&self.stability)
            && AxisGroup::Longitudinal.is_complete(&self.stability);
        if stability_only {
            return Ok(());
        }
        assemble_stability(self)
    }
}
