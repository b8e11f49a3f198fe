use std::fs::File;
use std::io::{BufReader, Read, Write};

use serde::Serialize;

use crate::derivatives::AircraftDefinition;
use crate::error::Result;
use crate::sim::Snapshot;

// ---------------------------------------------------------------------------
// Aircraft definitions
// ---------------------------------------------------------------------------

/// Parse a definition and fill in its stability-axis block.
pub fn definition_from_str(text: &str) -> Result<AircraftDefinition> {
    let mut definition: AircraftDefinition = serde_json::from_str(text)?;
    definition.ensure_stability()?;
    Ok(definition)
}

pub fn definition_from_reader<R: Read>(reader: R) -> Result<AircraftDefinition> {
    let mut definition: AircraftDefinition = serde_json::from_reader(reader)?;
    definition.ensure_stability()?;
    Ok(definition)
}

pub fn definition_from_file(path: &str) -> Result<AircraftDefinition> {
    let file = File::open(path)?;
    definition_from_reader(BufReader::new(file))
}

/// Write a definition as pretty-printed JSON.
pub fn write_definition<W: Write>(writer: &mut W, definition: &AircraftDefinition) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, definition)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_definition_file(path: &str, definition: &AircraftDefinition) -> Result<()> {
    let mut file = File::create(path)?;
    write_definition(&mut file, definition)
}

// ---------------------------------------------------------------------------
// Run summary
// ---------------------------------------------------------------------------

/// Peak excursions over a simulation trace.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TraceSummary {
    pub duration_s: f64,
    pub samples: usize,
    pub max_abs_pitch: f64,
    pub max_abs_roll: f64,
    pub max_abs_pitch_rate: f64,
    pub max_abs_roll_rate: f64,
    pub min_altitude: f64,
    pub max_altitude: f64,
    pub final_altitude: f64,
    pub distance: f64,
}

impl TraceSummary {
    /// Summarize a trace; an empty trace gives an all-zero summary.
    pub fn from_trace(trace: &[Snapshot]) -> Self {
        let (Some(first), Some(last)) = (trace.first(), trace.last()) else {
            return Self::default();
        };

        let altitudes = trace.iter().map(|s| s.attributes.longitudinal.h);

        TraceSummary {
            duration_s: last.time() - first.time(),
            samples: trace.len(),
            max_abs_pitch: peak(trace, |s| s.attributes.longitudinal.pitch),
            max_abs_roll: peak(trace, |s| s.attributes.lateral.roll),
            max_abs_pitch_rate: peak(trace, |s| s.attributes.longitudinal.q),
            max_abs_roll_rate: peak(trace, |s| s.attributes.lateral.p),
            min_altitude: altitudes.clone().fold(f64::INFINITY, f64::min),
            max_altitude: altitudes.fold(f64::NEG_INFINITY, f64::max),
            final_altitude: last.attributes.longitudinal.h,
            distance: last.attributes.longitudinal.x - first.attributes.longitudinal.x,
        }
    }
}

fn peak(trace: &[Snapshot], f: impl Fn(&Snapshot) -> f64) -> f64 {
    trace.iter().map(f).fold(0.0_f64, |m, v| m.max(v.abs()))
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    aircraft: &'a str,
    summary: &'a TraceSummary,
}

/// Write a run summary as JSON.
pub fn write_summary<W: Write>(writer: &mut W, aircraft: &str, summary: &TraceSummary) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &SummaryDocument { aircraft, summary })?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_summary_file(path: &str, aircraft: &str, summary: &TraceSummary) -> Result<()> {
    let mut file = File::create(path)?;
    write_summary(&mut file, aircraft, summary)
}
