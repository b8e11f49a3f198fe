use log::{debug, warn};

use crate::derivatives::{AircraftDefinition, AxisGroup, DerivativeSet};
use crate::error::Result;

/// Fill canonical body-axis entries that are published in an alternate form.
///
/// - `Lprime.v`, `Nprime.v` from the sideslip-angle forms `beta / U0`;
/// - `Y.delta_a`, `Y.delta_r` from the normalized `Ystar` forms `* U0`.
///
/// Entries already present are left untouched.
pub fn backfill_body(definition: &mut AircraftDefinition) {
    backfill(&mut definition.body, definition.trim.airspeed);
}

fn backfill(body: &mut DerivativeSet, u0: f64) {
    for axis in ["Lprime", "Nprime"] {
        fill(body, (axis, "v"), (axis, "beta"), |beta| beta / u0);
    }
    for control in ["delta_a", "delta_r"] {
        fill(body, ("Y", control), ("Ystar", control), |ystar| ystar * u0);
    }
}

fn fill(
    body: &mut DerivativeSet,
    (axis, variable): (&str, &str),
    (alt_axis, alt_variable): (&str, &str),
    convert: impl Fn(f64) -> f64,
) {
    let Some(alternate) = body.try_get(alt_axis, alt_variable) else {
        return;
    };
    let derived = convert(alternate);
    match body.try_get(axis, variable) {
        None => body.set(axis, variable, derived),
        Some(existing) => {
            if (existing - derived).abs() > 1e-9 * existing.abs().max(derived.abs()).max(1.0) {
                warn!(
                    "{axis}.{variable} = {existing} disagrees with {alt_axis}.{alt_variable} \
                     (implies {derived}); keeping {axis}.{variable}"
                );
            }
        }
    }
}

/// Derive the stability-axis block of a definition from its body-axis block.
///
/// Back-fills alternate body-axis fields, then transforms both the lateral
/// and the longitudinal groups at the trim angle of attack and merges the
/// results into `definition.stability`. On error the definition, body block
/// included, is left as it was. Calling this again with unchanged inputs
/// gives the same result.
pub fn assemble_stability(definition: &mut AircraftDefinition) -> Result<()> {
    definition.trim.validate()?;
    let mut body = definition.body.clone();
    backfill(&mut body, definition.trim.airspeed);

    let alpha = definition.trim.alpha();
    let lateral = AxisGroup::Lateral.to_stability_axis(&body, alpha)?;
    let longitudinal = AxisGroup::Longitudinal.to_stability_axis(&body, alpha)?;

    definition.body = body;
    definition.stability.merge(&lateral);
    definition.stability.merge(&longitudinal);

    debug!(
        "assembled stability derivatives for {} at alpha0 = {} deg ({} entries)",
        definition.name.as_deref().unwrap_or("unnamed aircraft"),
        definition.trim.alpha_deg,
        definition.stability.len()
    );
    Ok(())
}
