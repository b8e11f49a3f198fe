use linflight::controls::SecondOrderSurface;
use linflight::io::json::TraceSummary;
use linflight::sim::{self, AttitudeHoldPilot, SimConfig, StepPilot};
use linflight::{presets, Aircraft, Control, ControlInputs, Result};

fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // Aircraft: B747-class transport in cruise, lagged elevator
    // -----------------------------------------------------------------------
    let definition = presets::b747_cruise();
    let name = definition.name.clone().unwrap_or_default();
    let trim = definition.trim;

    let mut aircraft = Aircraft::builder(definition)
        .actuator(
            Control::Elevator,
            SecondOrderSurface::builder(20.0, 0.7)
                .rate_limit(0.5)          // rad/s
                .displacement_limit(0.35) // rad
                .build(),
        )
        .build()?;

    let config = SimConfig {
        dt: 0.015,
        max_time: 30.0,
    };

    // -----------------------------------------------------------------------
    // Open-loop modes
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  LINEAR FLIGHT DYNAMICS: {}", name);
    println!("====================================================================");
    println!();
    println!(
        "  Trim: U0={:.1} m/s   alpha0={:.1} deg   theta0={:.1} deg   h0={:.0} m",
        trim.airspeed, trim.alpha_deg, trim.theta_deg, trim.altitude
    );
    println!();

    let longitudinal = aircraft.longitudinal().lti()?;
    let lateral = aircraft.lateral().lti()?;
    for (label, lti) in [("Longitudinal", &longitudinal), ("Lateral", &lateral)] {
        println!("  {} poles ({})", label, if lti.is_stable() { "stable" } else { "unstable" });
        println!("  ──────────────────────────────────────────────────────────────────");
        for pole in lti.eigenvalues().iter() {
            println!("    {:>10.5} {:+10.5}j", pole.re, pole.im);
        }
        println!();
    }

    // -----------------------------------------------------------------------
    // Elevator step
    // -----------------------------------------------------------------------
    let mut pilot = StepPilot::new(Control::Elevator, 1.0, -0.02);
    let trace = sim::simulate_with(&mut aircraft, &config, &mut pilot)?;

    println!("  Elevator step (-0.02 rad at t=1 s)");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>6}  {:>9}  {:>9}  {:>9}  {:>9}  {:>10}",
        "t [s]", "elev", "q", "pitch", "u", "h [m]"
    );
    for s in trace.iter().step_by(100) {
        let a = &s.attributes;
        println!(
            "  {:>6.2}  {:>9.5}  {:>9.5}  {:>9.5}  {:>9.4}  {:>10.2}",
            a.time, a.elevator.angle, a.longitudinal.q, a.longitudinal.pitch,
            a.longitudinal.u, a.longitudinal.h
        );
    }
    println!();

    let summary = TraceSummary::from_trace(&trace);
    println!(
        "  Peak pitch {:.4} rad   altitude {:.1} .. {:.1} m   distance {:.0} m",
        summary.max_abs_pitch, summary.min_altitude, summary.max_altitude, summary.distance
    );
    println!();

    // -----------------------------------------------------------------------
    // Attitude hold
    // -----------------------------------------------------------------------
    aircraft.reset();
    let mut pilot = AttitudeHoldPilot::new(0.02, 0.05);
    let trace = sim::simulate_with(&mut aircraft, &SimConfig::default(), &mut pilot)?;

    let last = trace.last().map(|s| s.attributes).unwrap_or_default();
    println!("  Attitude hold (pitch 0.02 rad, roll 0.05 rad)");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  t={:.1}s   pitch={:.4} rad   roll={:.4} rad   elevator={:.4}   aileron={:.4}",
        last.time, last.longitudinal.pitch, last.lateral.roll,
        last.elevator.angle, last.aileron.angle
    );
    println!();

    // -----------------------------------------------------------------------
    // One manual tick
    // -----------------------------------------------------------------------
    aircraft.reset();
    aircraft.update(config.dt, &ControlInputs::new().rudder(0.01))?;
    println!(
        "  Rudder kick: r={:.6} rad/s after one tick",
        aircraft.attribute("r")?
    );
    println!();

    Ok(())
}
