use super::actuator::{Actuator, ActuatorOutput};

// ---------------------------------------------------------------------------
// Damped second-order surface
// ---------------------------------------------------------------------------

/// Surface with damped second-order response to its command:
///
/// ```text
/// acc   = -2 wn zeta rate - wn^2 angle + wn^2 commanded
/// rate += acc dt      (clamped to +/- rate_limit)
/// angle += rate dt    (clamped to +/- displacement_limit)
/// ```
#[derive(Debug, Clone)]
pub struct SecondOrderSurface {
    pub natural_frequency: f64, // rad/s
    pub damping: f64,
    pub rate_limit: Option<f64>,
    pub displacement_limit: Option<f64>,
    out: ActuatorOutput,
}

impl SecondOrderSurface {
    pub fn new(natural_frequency: f64, damping: f64) -> Self {
        Self {
            natural_frequency,
            damping,
            rate_limit: None,
            displacement_limit: None,
            out: ActuatorOutput::default(),
        }
    }

    pub fn builder(natural_frequency: f64, damping: f64) -> SecondOrderSurfaceBuilder {
        SecondOrderSurfaceBuilder::new(natural_frequency, damping)
    }
}

fn clamp_symmetric(value: f64, limit: Option<f64>) -> f64 {
    match limit {
        Some(l) => value.clamp(-l, l),
        None => value,
    }
}

impl Actuator for SecondOrderSurface {
    fn update(&mut self, dt: f64, commanded: f64) -> ActuatorOutput {
        let wn = self.natural_frequency;
        let out = &mut self.out;
        out.commanded = commanded;

        out.acceleration =
            -2.0 * wn * self.damping * out.rate - wn * wn * out.angle + wn * wn * commanded;

        out.rate = clamp_symmetric(out.rate + out.acceleration * dt, self.rate_limit);
        out.angle = clamp_symmetric(out.angle + out.rate * dt, self.displacement_limit);
        *out
    }

    fn output(&self) -> ActuatorOutput {
        self.out
    }

    fn reset(&mut self) {
        self.out = ActuatorOutput::default();
    }

    fn name(&self) -> &str {
        "SecondOrderSurface"
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

pub struct SecondOrderSurfaceBuilder {
    natural_frequency: f64,
    damping: f64,
    rate_limit: Option<f64>,
    displacement_limit: Option<f64>,
}

impl SecondOrderSurfaceBuilder {
    pub fn new(natural_frequency: f64, damping: f64) -> Self {
        Self {
            natural_frequency,
            damping,
            rate_limit: None,
            displacement_limit: None,
        }
    }

    /// Symmetric rate limit; the magnitude is used.
    pub fn rate_limit(mut self, v: f64) -> Self { self.rate_limit = Some(v.abs()); self }
    /// Symmetric displacement limit; the magnitude is used.
    pub fn displacement_limit(mut self, v: f64) -> Self { self.displacement_limit = Some(v.abs()); self }

    pub fn build(self) -> SecondOrderSurface {
        SecondOrderSurface {
            natural_frequency: self.natural_frequency,
            damping: self.damping,
            rate_limit: self.rate_limit,
            displacement_limit: self.displacement_limit,
            out: ActuatorOutput::default(),
        }
    }
}
