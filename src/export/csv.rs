//! Trajectory CSV files: `time,x,y,z` per line.

use std::io::Write;

use crate::track::Trajectory;
use crate::util::{format::fixed, Result};

/// Write a trajectory with `%f` formatting.
pub fn write_trajectory<W: Write>(out: &mut W, trajectory: &Trajectory) -> Result<()> {
    for sample in trajectory {
        let p = sample.position;
        writeln!(
            out,
            "{},{},{},{}",
            fixed(sample.time, 6),
            fixed(p.x, 6),
            fixed(p.y, 6),
            fixed(p.z, 6)
        )?;
    }
    Ok(())
}
