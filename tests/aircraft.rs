use approx::assert_relative_eq;

use linflight::controls::SecondOrderSurface;
use linflight::derivatives::{AxisGroup, DerivativeSet};
use linflight::dynamics::LateralState;
use linflight::io::json;
use linflight::sim::{simulate_with, HoldPilot, SimConfig, StepPilot};
use linflight::{presets, Aircraft, AircraftDefinition, Control, ControlInputs, Error};

fn cruise() -> Aircraft {
    Aircraft::new(presets::b747_cruise()).unwrap()
}

#[test]
fn limited_elevator_bounds_what_the_airframe_sees() {
    let mut ac = Aircraft::builder(presets::b747_cruise())
        .actuator(
            Control::Elevator,
            SecondOrderSurface::builder(25.0, 0.7)
                .rate_limit(0.2)
                .displacement_limit(0.05)
                .build(),
        )
        .build()
        .unwrap();

    let mut pilot = HoldPilot::new(ControlInputs::new().elevator(0.3));
    let config = SimConfig { dt: 0.01, max_time: 2.0 };
    let trace = simulate_with(&mut ac, &config, &mut pilot).unwrap();

    for s in &trace {
        let e = s.attributes.elevator;
        assert!(e.rate.abs() <= 0.2, "rate {} at t={}", e.rate, s.time());
        assert!(e.angle.abs() <= 0.05, "angle {} at t={}", e.angle, s.time());
    }
    let last = trace.last().unwrap();
    assert_eq!(last.attributes.elevator.angle, 0.05);
    assert_eq!(last.attributes.elevator.commanded, 0.3);
    assert_eq!(ac.longitudinal().input().elevator, 0.05);
}

#[test]
fn axes_stay_decoupled() {
    let mut ac = cruise();
    for _ in 0..200 {
        ac.update(0.015, &ControlInputs::new().elevator(-0.02)).unwrap();
    }
    assert_eq!(ac.attributes().lateral, LateralState::default());

    ac.reset();
    for _ in 0..200 {
        ac.update(0.015, &ControlInputs::new().aileron(0.02).rudder(-0.01)).unwrap();
    }
    let lon = ac.attributes().longitudinal;
    assert_eq!((lon.u, lon.w, lon.q, lon.pitch, lon.z), (0.0, 0.0, 0.0, 0.0, 0.0));
    assert!(ac.attributes().lateral.roll != 0.0);
}

#[test]
fn reset_replays_identically() {
    let mut ac = cruise();
    let config = SimConfig { dt: 0.015, max_time: 3.0 };
    let mut pilot = StepPilot::new(Control::Rudder, 0.5, 0.01);
    let first = simulate_with(&mut ac, &config, &mut pilot).unwrap();

    ac.reset();
    let second = simulate_with(&mut ac, &config, &mut pilot).unwrap();
    assert_eq!(first, second);
}

#[test]
fn definition_loaded_from_json_flies_like_the_preset() {
    let mut text = Vec::new();
    json::write_definition(&mut text, &presets::b747_cruise()).unwrap();
    let loaded = json::definition_from_reader(text.as_slice()).unwrap();

    let mut from_json = Aircraft::new(loaded).unwrap();
    let mut preset = cruise();
    let inputs = ControlInputs::new().elevator(-0.01).aileron(0.01);
    for _ in 0..100 {
        from_json.update(0.015, &inputs).unwrap();
        preset.update(0.015, &inputs).unwrap();
    }
    assert_relative_eq!(
        from_json.attribute("pitch").unwrap(),
        preset.attribute("pitch").unwrap(),
        max_relative = 1e-9
    );
    assert_relative_eq!(
        from_json.attribute("roll").unwrap(),
        preset.attribute("roll").unwrap(),
        max_relative = 1e-9
    );
}

#[test]
fn stability_only_definition_is_accepted() {
    let mut assembled = presets::b747_cruise();
    assembled.ensure_stability().unwrap();

    let def = AircraftDefinition {
        name: Some("stability only".into()),
        trim: assembled.trim,
        body: DerivativeSet::new(),
        stability: assembled.stability.clone(),
    };
    let ac = Aircraft::new(def).unwrap();
    assert!(ac.definition().body.is_empty());
    assert!(AxisGroup::Longitudinal.is_complete(&ac.definition().stability));
}

#[test]
fn bad_trim_is_rejected() {
    let mut def = presets::b747_cruise();
    def.trim.airspeed = 0.0;
    assert!(matches!(
        Aircraft::new(def),
        Err(Error::InvalidTrim { field: "U0", .. })
    ));

    let mut def = presets::b747_cruise();
    def.trim.theta_deg = 90.0;
    assert!(matches!(
        Aircraft::new(def),
        Err(Error::InvalidTrim { field: "theta0", .. })
    ));
}
