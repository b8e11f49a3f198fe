/// Fixed-step run settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub dt: f64,
    pub max_time: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.015,       // ~67 Hz
            max_time: 60.0,
        }
    }
}

impl SimConfig {
    /// Number of ticks needed to cover `max_time`.
    pub fn steps(&self) -> usize {
        if !(self.max_time.is_finite() && self.max_time > 0.0 && self.dt > 0.0) {
            return 0;
        }
        (self.max_time / self.dt).round() as usize
    }
}
