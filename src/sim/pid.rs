// ---------------------------------------------------------------------------
// PID controller (single loop)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Pid {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    /// Magnitude bound on the accumulated integral.
    pub integral_limit: f64,
    /// Magnitude bound on the output, if any.
    pub output_limit: Option<f64>,
    integral: f64,
    prev_error: f64,
}

impl Pid {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self {
            kp,
            ki,
            kd,
            integral_limit: 1.0,
            output_limit: None,
            integral: 0.0,
            prev_error: 0.0,
        }
    }

    pub fn integral_limit(mut self, v: f64) -> Self { self.integral_limit = v.abs(); self }
    pub fn output_limit(mut self, v: f64) -> Self { self.output_limit = Some(v.abs()); self }

    pub fn update(&mut self, error: f64, dt: f64) -> f64 {
        self.integral = (self.integral + error * dt).clamp(-self.integral_limit, self.integral_limit);
        let derivative = if dt > 0.0 { (error - self.prev_error) / dt } else { 0.0 };
        self.prev_error = error;

        let out = self.kp * error + self.ki * self.integral + self.kd * derivative;
        match self.output_limit {
            Some(l) => out.clamp(-l, l),
            None => out,
        }
    }

    pub fn integral(&self) -> f64 {
        self.integral
    }

    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = 0.0;
    }
}
