//! Ready-made aircraft definitions.

use crate::derivatives::{AircraftDefinition, DerivativeSet, TrimCondition};

// ---------------------------------------------------------------------------
// Preset aircraft
// ---------------------------------------------------------------------------

/// Large transport in high-altitude cruise (Boeing 747 class), SI units.
///
/// Body-axis derivatives only; the stability block is filled in when the
/// definition is assembled.
pub fn b747_cruise() -> AircraftDefinition {
    let trim = TrimCondition {
        airspeed: 235.9,
        alpha_deg: 2.5,
        theta_deg: 2.5,
        altitude: 6096.0,
        g: 9.81,
    };

    let body = DerivativeSet::new()
        // Longitudinal
        .with("X", "u", -0.0059)
        .with("X", "w", 0.0391)
        .with("X", "q", 0.0)
        .with("X", "delta_e", 0.0)
        .with("X", "delta_th", 2.0)
        .with("Z", "u", -0.0937)
        .with("Z", "w", -0.361)
        .with("Z", "q", -3.0)
        .with("Z", "delta_e", -5.62)
        .with("Z", "delta_th", 0.0)
        .with("M", "u", 0.0)
        .with("M", "w", -0.0051)
        .with("M", "wdot", -0.0003)
        .with("M", "q", -0.36)
        .with("M", "delta_e", -1.16)
        .with("M", "delta_th", 0.0)
        // Lateral
        .with("Y", "v", -0.0558)
        .with("Y", "p", 0.0)
        .with("Y", "r", 0.0)
        .with("Y", "delta_a", 0.0)
        .with("Y", "delta_r", 4.46)
        .with("Lprime", "v", -1.7 / trim.airspeed)
        .with("Lprime", "p", -0.4)
        .with("Lprime", "r", 0.36)
        .with("Lprime", "delta_a", 0.136)
        .with("Lprime", "delta_r", 0.0876)
        .with("Nprime", "v", 0.58 / trim.airspeed)
        .with("Nprime", "p", -0.03)
        .with("Nprime", "r", -0.15)
        .with("Nprime", "delta_a", 0.0102)
        .with("Nprime", "delta_r", -0.33)
        // Inertia, kg m^2
        .with("I", "x", 2.47e7)
        .with("I", "z", 6.73e7)
        .with("I", "xz", 1.32e6);

    AircraftDefinition::new(trim, body).named("B747 cruise")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivatives::AxisGroup;

    #[test]
    fn preset_body_block_is_complete() {
        let def = b747_cruise();
        assert!(AxisGroup::Lateral.is_complete(&def.body));
        assert!(AxisGroup::Longitudinal.is_complete(&def.body));
        assert!(def.stability.is_empty());
        def.trim.validate().unwrap();
    }
}
