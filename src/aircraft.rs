//! Coupled aircraft: lateral and longitudinal models driven through four
//! control-surface actuators.

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::Serialize;

use crate::controls::{Actuator, ActuatorOutput, FirstOrderSurface};
use crate::derivatives::AircraftDefinition;
use crate::dynamics::linear::check_time_step;
use crate::dynamics::{
    LateralInput, LateralModel, LateralState, LongitudinalInput, LongitudinalModel,
    LongitudinalState,
};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Controls and per-tick inputs
// ---------------------------------------------------------------------------

/// The four pilot controls, in actuator slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    Elevator,
    Thrust,
    Aileron,
    Rudder,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::Elevator,
        Control::Thrust,
        Control::Aileron,
        Control::Rudder,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Control::Elevator => "elevator",
            Control::Thrust => "thrust",
            Control::Aileron => "aileron",
            Control::Rudder => "rudder",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Control {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Control::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| Error::UnknownControl(s.to_string()))
    }
}

/// Commanded values for one tick. Unset controls command zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ControlInputs {
    pub elevator: f64, // rad
    pub thrust: f64,
    pub aileron: f64, // rad
    pub rudder: f64,  // rad
}

impl ControlInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, value)` pairs, rejecting unknown control names.
    pub fn from_named<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Result<Self> {
        let mut inputs = Self::default();
        for (name, value) in pairs {
            inputs = inputs.with(name.parse()?, value);
        }
        Ok(inputs)
    }

    pub fn get(&self, control: Control) -> f64 {
        match control {
            Control::Elevator => self.elevator,
            Control::Thrust => self.thrust,
            Control::Aileron => self.aileron,
            Control::Rudder => self.rudder,
        }
    }

    pub fn with(mut self, control: Control, value: f64) -> Self {
        match control {
            Control::Elevator => self.elevator = value,
            Control::Thrust => self.thrust = value,
            Control::Aileron => self.aileron = value,
            Control::Rudder => self.rudder = value,
        }
        self
    }

    /// Reject NaN or infinite commands.
    pub fn validate(&self) -> Result<()> {
        for control in Control::ALL {
            let value = self.get(control);
            if !value.is_finite() {
                return Err(Error::InvalidCommand {
                    control: control.name(),
                    value,
                });
            }
        }
        Ok(())
    }

    pub fn elevator(self, v: f64) -> Self { self.with(Control::Elevator, v) }
    pub fn thrust(self, v: f64) -> Self { self.with(Control::Thrust, v) }
    pub fn aileron(self, v: f64) -> Self { self.with(Control::Aileron, v) }
    pub fn rudder(self, v: f64) -> Self { self.with(Control::Rudder, v) }
}

// ---------------------------------------------------------------------------
// Merged attribute view
// ---------------------------------------------------------------------------

/// Everything a caller reads after a tick: both axis states, the achieved
/// surface deflections and the simulated time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AircraftAttributes {
    pub time: f64,
    pub lateral: LateralState,
    pub longitudinal: LongitudinalState,
    pub elevator: ActuatorOutput,
    pub thrust: ActuatorOutput,
    pub aileron: ActuatorOutput,
    pub rudder: ActuatorOutput,
}

impl AircraftAttributes {
    pub fn actuator(&self, control: Control) -> &ActuatorOutput {
        match control {
            Control::Elevator => &self.elevator,
            Control::Thrust => &self.thrust,
            Control::Aileron => &self.aileron,
            Control::Rudder => &self.rudder,
        }
    }

    /// Look up a scalar by name: lateral state, then longitudinal state,
    /// then control deflection angles, then `time`.
    pub fn get(&self, name: &str) -> Result<f64> {
        if let Some(v) = self.lateral.get(name) {
            return Ok(v);
        }
        if let Some(v) = self.longitudinal.get(name) {
            return Ok(v);
        }
        if let Ok(control) = name.parse::<Control>() {
            return Ok(self.actuator(control).angle);
        }
        match name {
            "time" => Ok(self.time),
            _ => Err(Error::UnknownAttribute(name.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Aircraft
// ---------------------------------------------------------------------------

type ActuatorSlots = [Box<dyn Actuator>; 4];

/// One lateral model, one longitudinal model and four actuators stepped as a
/// single unit.
#[derive(Debug)]
pub struct Aircraft {
    definition: AircraftDefinition,
    lateral: LateralModel,
    longitudinal: LongitudinalModel,
    actuators: ActuatorSlots,
    attributes: AircraftAttributes,
}

impl Aircraft {
    /// Aircraft with zero-lag actuators on every control.
    pub fn new(definition: AircraftDefinition) -> Result<Self> {
        Self::builder(definition).build()
    }

    pub fn builder(definition: AircraftDefinition) -> AircraftBuilder {
        AircraftBuilder::new(definition)
    }

    /// Advance one tick.
    ///
    /// Each actuator is stepped with its commanded value first; the achieved
    /// angles are what the lateral `[aileron, rudder]` and longitudinal
    /// `[elevator, thrust]` models see.
    pub fn update(&mut self, dt: f64, inputs: &ControlInputs) -> Result<()> {
        check_time_step(dt)?;
        inputs.validate()?;

        let mut achieved = [ActuatorOutput::default(); 4];
        for control in Control::ALL {
            let i = control.index();
            achieved[i] = self.actuators[i].update(dt, inputs.get(control));
        }
        let angle = |c: Control| achieved[c.index()].angle;

        self.lateral.update(
            dt,
            LateralInput {
                aileron: angle(Control::Aileron),
                rudder: angle(Control::Rudder),
            },
        )?;
        self.longitudinal.update(
            dt,
            LongitudinalInput {
                elevator: angle(Control::Elevator),
                thrust: angle(Control::Thrust),
            },
        )?;

        let time = self.attributes.time + dt;
        self.publish(time);
        Ok(())
    }

    /// Return both axis models and every actuator to the trim state.
    pub fn reset(&mut self) {
        self.lateral.reset();
        self.longitudinal.reset();
        for actuator in self.actuators.iter_mut() {
            actuator.reset();
        }
        self.publish(0.0);
    }

    pub fn attributes(&self) -> &AircraftAttributes {
        &self.attributes
    }

    /// Named scalar lookup, see [`AircraftAttributes::get`].
    pub fn attribute(&self, name: &str) -> Result<f64> {
        self.attributes.get(name)
    }

    pub fn time(&self) -> f64 {
        self.attributes.time
    }

    pub fn lateral(&self) -> &LateralModel {
        &self.lateral
    }

    pub fn longitudinal(&self) -> &LongitudinalModel {
        &self.longitudinal
    }

    pub fn actuator(&self, control: Control) -> &dyn Actuator {
        self.actuators[control.index()].as_ref()
    }

    /// Definition the models were built from, stability block included.
    pub fn definition(&self) -> &AircraftDefinition {
        &self.definition
    }

    fn publish(&mut self, time: f64) {
        let out = |c: Control| self.actuators[c.index()].output();
        self.attributes = AircraftAttributes {
            time,
            lateral: *self.lateral.state(),
            longitudinal: *self.longitudinal.state(),
            elevator: out(Control::Elevator),
            thrust: out(Control::Thrust),
            aileron: out(Control::Aileron),
            rudder: out(Control::Rudder),
        };
    }
}

// ---------------------------------------------------------------------------
// Aircraft builder
// ---------------------------------------------------------------------------

pub struct AircraftBuilder {
    definition: AircraftDefinition,
    overrides: [Option<Box<dyn Actuator>>; 4],
}

impl AircraftBuilder {
    pub fn new(definition: AircraftDefinition) -> Self {
        Self {
            definition,
            overrides: Default::default(),
        }
    }

    /// Replace the default zero-lag actuator on one control.
    pub fn actuator(mut self, control: Control, actuator: impl Actuator + 'static) -> Self {
        self.overrides[control.index()] = Some(Box::new(actuator));
        self
    }

    pub fn boxed_actuator(mut self, control: Control, actuator: Box<dyn Actuator>) -> Self {
        self.overrides[control.index()] = Some(actuator);
        self
    }

    /// Overrides keyed by control name, rejecting unknown names.
    pub fn named_actuators<'a>(
        mut self,
        overrides: impl IntoIterator<Item = (&'a str, Box<dyn Actuator>)>,
    ) -> Result<Self> {
        for (name, actuator) in overrides {
            let control: Control = name.parse()?;
            self.overrides[control.index()] = Some(actuator);
        }
        Ok(self)
    }

    pub fn build(self) -> Result<Aircraft> {
        let mut definition = self.definition;
        definition.ensure_stability()?;

        let lateral = LateralModel::new(&definition)?;
        let longitudinal = LongitudinalModel::new(&definition)?;

        let actuators: ActuatorSlots = self.overrides.map(|slot| {
            slot.unwrap_or_else(|| Box::new(FirstOrderSurface::new()) as Box<dyn Actuator>)
        });

        debug!(
            "built aircraft {}: elevator={}, thrust={}, aileron={}, rudder={}",
            definition.name.as_deref().unwrap_or("unnamed"),
            actuators[0].name(),
            actuators[1].name(),
            actuators[2].name(),
            actuators[3].name(),
        );

        let mut aircraft = Aircraft {
            definition,
            lateral,
            longitudinal,
            actuators,
            attributes: AircraftAttributes::default(),
        };
        aircraft.publish(0.0);
        Ok(aircraft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::SecondOrderSurface;
    use crate::presets;
    use approx::assert_relative_eq;

    fn aircraft() -> Aircraft {
        Aircraft::new(presets::b747_cruise()).unwrap()
    }

    #[test]
    fn inputs_route_through_actuators() {
        let mut ac = aircraft();
        let inputs = ControlInputs::new().elevator(0.01).aileron(-0.02);
        ac.update(0.015, &inputs).unwrap();

        let lon = ac.longitudinal().input();
        let lat = ac.lateral().input();
        assert_eq!(lon.elevator, ac.attributes().elevator.angle);
        assert_eq!(lon.elevator, 0.01);
        assert_eq!(lon.thrust, 0.0);
        assert_eq!(lat.aileron, ac.attributes().aileron.angle);
        assert_eq!(lat.aileron, -0.02);
        assert_eq!(lat.rudder, 0.0);
    }

    #[test]
    fn lagged_actuator_feeds_its_angle_not_the_command() {
        let mut ac = Aircraft::builder(presets::b747_cruise())
            .actuator(Control::Elevator, SecondOrderSurface::new(20.0, 1.0))
            .build()
            .unwrap();
        ac.update(0.015, &ControlInputs::new().elevator(0.1)).unwrap();

        let achieved = ac.attributes().elevator.angle;
        assert!(achieved > 0.0 && achieved < 0.1);
        assert_eq!(ac.longitudinal().input().elevator, achieved);
        assert_eq!(ac.actuator(Control::Elevator).name(), "SecondOrderSurface");
        assert_eq!(ac.actuator(Control::Rudder).name(), "FirstOrderSurface");
    }

    #[test]
    fn zero_inputs_hold_trim() {
        let mut ac = aircraft();
        for _ in 0..500 {
            ac.update(0.015, &ControlInputs::default()).unwrap();
        }
        let a = ac.attributes();
        assert_eq!(a.lateral, LateralState::default());
        assert_eq!(a.longitudinal.w, 0.0);
        assert_eq!(a.longitudinal.h, ac.definition().trim.altitude);
        assert_relative_eq!(a.time, 7.5, epsilon = 1e-9);
    }

    #[test]
    fn attribute_lookup_probes_both_axes() {
        let mut ac = aircraft();
        ac.update(0.015, &ControlInputs::new().elevator(0.02).rudder(0.01)).unwrap();
        let a = ac.attributes();
        assert_eq!(ac.attribute("r").unwrap(), a.lateral.r);
        assert_eq!(ac.attribute("q").unwrap(), a.longitudinal.q);
        assert_eq!(ac.attribute("h").unwrap(), a.longitudinal.h);
        assert_eq!(ac.attribute("elevator").unwrap(), 0.02);
        assert_eq!(ac.attribute("time").unwrap(), 0.015);
        assert!(matches!(ac.attribute("flaps"), Err(Error::UnknownAttribute(name)) if name == "flaps"));
    }

    #[test]
    fn invalid_time_step_leaves_state_untouched() {
        let mut ac = aircraft();
        let err = ac.update(-0.01, &ControlInputs::new().elevator(0.1)).unwrap_err();
        assert!(matches!(err, Error::InvalidTimeStep(_)));
        assert_eq!(ac.attributes().elevator.angle, 0.0);
        assert_eq!(ac.time(), 0.0);
    }

    #[test]
    fn non_finite_command_is_rejected_before_stepping() {
        let mut ac = aircraft();
        ac.update(0.015, &ControlInputs::new().elevator(0.01)).unwrap();
        let before = *ac.attributes();

        let err = ac
            .update(0.015, &ControlInputs::new().aileron(f64::NAN).elevator(0.02))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCommand { control: "aileron", .. }));
        assert_eq!(*ac.attributes(), before);
        assert_eq!(ac.longitudinal().input().elevator, 0.01);

        let err = ac
            .update(0.015, &ControlInputs::new().thrust(f64::INFINITY))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCommand { control: "thrust", .. }));

        ac.update(0.015, &ControlInputs::new().elevator(0.02)).unwrap();
        assert!(ac.attributes().longitudinal.q.is_finite());
    }

    #[test]
    fn named_inputs_reject_unknown_controls() {
        let inputs = ControlInputs::from_named([("elevator", 0.1), ("rudder", -0.2)]).unwrap();
        assert_eq!(inputs.elevator, 0.1);
        assert_eq!(inputs.rudder, -0.2);
        assert_eq!(inputs.thrust, 0.0);
        let err = ControlInputs::from_named([("spoiler", 1.0)]).unwrap_err();
        assert!(matches!(err, Error::UnknownControl(_)));
    }

    #[test]
    fn reset_restores_trim() {
        let mut ac = aircraft();
        for _ in 0..50 {
            ac.update(0.015, &ControlInputs::new().aileron(0.05).thrust(1.0)).unwrap();
        }
        ac.reset();
        assert_eq!(ac.time(), 0.0);
        assert_eq!(ac.attributes().lateral, LateralState::default());
        assert_eq!(ac.attributes().thrust, ActuatorOutput::default());
        assert_eq!(ac.attributes().longitudinal.x, 0.0);
    }

    #[test]
    fn incomplete_definition_fails_fast() {
        let mut def = presets::b747_cruise();
        def.body = crate::derivatives::DerivativeSet::new();
        assert!(Aircraft::new(def).is_err());
    }

    #[test]
    fn actuators_can_be_overridden_by_name() {
        let ac = Aircraft::builder(presets::b747_cruise())
            .named_actuators([(
                "aileron",
                Box::new(SecondOrderSurface::new(15.0, 0.8)) as Box<dyn Actuator>,
            )])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(ac.actuator(Control::Aileron).name(), "SecondOrderSurface");

        let err = Aircraft::builder(presets::b747_cruise())
            .named_actuators([("flaps", Box::new(FirstOrderSurface::new()) as Box<dyn Actuator>)])
            .err();
        assert!(matches!(err, Some(Error::UnknownControl(name)) if name == "flaps"));
    }

    #[test]
    fn aircraft_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Aircraft>();
    }
}
