use std::io::{self, Write};

use crate::sim::Snapshot;

/// Write a simulation trace in CSV format.
///
/// Columns: time, v, p, r, roll, yaw, y, u, w, q, pitch, z, x, h,
///          then commanded and achieved angle for elevator, thrust,
///          aileron, rudder
pub fn write_trace<W: Write>(writer: &mut W, trace: &[Snapshot]) -> io::Result<()> {
    writeln!(
        writer,
        "time,v,p,r,roll,yaw,y,u,w,q,pitch,z,x,h,\
         elevator_cmd,elevator,thrust_cmd,thrust,\
         aileron_cmd,aileron,rudder_cmd,rudder"
    )?;

    for s in trace {
        let a = &s.attributes;
        let (lat, lon) = (&a.lateral, &a.longitudinal);
        writeln!(
            writer,
            "{:.4},{:.6},{:.6},{:.6},{:.6},{:.6},{:.3},\
             {:.6},{:.6},{:.6},{:.6},{:.3},{:.3},{:.3},\
             {:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
            a.time,
            lat.v, lat.p, lat.r, lat.roll, lat.yaw, lat.y,
            lon.u, lon.w, lon.q, lon.pitch, lon.z, lon.x, lon.h,
            s.inputs.elevator, a.elevator.angle,
            s.inputs.thrust, a.thrust.angle,
            s.inputs.aileron, a.aileron.angle,
            s.inputs.rudder, a.rudder.angle,
        )?;
    }

    Ok(())
}

/// Write a trace to a CSV file at the given path.
pub fn write_trace_file(path: &str, trace: &[Snapshot]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_trace(&mut file, trace)
}
