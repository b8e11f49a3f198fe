use linflight::aircraft::AircraftAttributes;
use linflight::sim::{self, Pilot, SimConfig};
use linflight::{presets, Aircraft, ControlInputs, Result};

/// Aileron doublet: right for `width` seconds, left for `width`, then
/// neutral, with a small rudder trim held throughout.
struct DoubletPilot {
    start: f64,
    width: f64,
    amplitude: f64,
}

impl Pilot for DoubletPilot {
    fn command(&mut self, attributes: &AircraftAttributes, _dt: f64) -> ControlInputs {
        let t = attributes.time - self.start;
        let aileron = if (0.0..self.width).contains(&t) {
            self.amplitude
        } else if (self.width..2.0 * self.width).contains(&t) {
            -self.amplitude
        } else {
            0.0
        };
        ControlInputs::new().aileron(aileron).rudder(0.002)
    }

    fn name(&self) -> &str {
        "Doublet"
    }
}

fn main() -> Result<()> {
    let mut aircraft = Aircraft::new(presets::b747_cruise())?;
    let config = SimConfig { dt: 0.015, max_time: 10.0 };

    let mut pilot = DoubletPilot {
        start: 1.0,
        width: 1.0,
        amplitude: 0.05,
    };

    println!("Simulating with {} pilot...", pilot.name());
    let trace = sim::simulate_with(&mut aircraft, &config, &mut pilot)?;

    let peak_roll = trace
        .iter()
        .map(|s| s.attributes.lateral.roll.abs())
        .fold(0.0_f64, f64::max);
    let last = trace.last().map(|s| s.attributes).unwrap_or_default();

    println!("Peak roll: {:.4} rad ({:.2} deg)", peak_roll, peak_roll.to_degrees());
    println!("Final heading: {:.4} rad", last.lateral.yaw);
    println!("Final sideslip velocity: {:.3} m/s", last.lateral.v);
    println!("Trace points: {}", trace.len());
    Ok(())
}
