//! Driving the hierarchy from raw input values and writing each block out.

use std::{io::Write, path::Path};

use crate::{error::SimResult, hierarchy::Hierarchy, input::to_address, report};

/// Runs one raw address through the hierarchy and writes its report block.
/// Rejected addresses get a single line and leave the hierarchy unchanged.
pub fn simulate(hierarchy: &mut Hierarchy, raw: i64, out: &mut impl Write) -> SimResult<()> {
    let trace = match to_address(raw).and_then(|addr| hierarchy.access_address(addr)) {
        Ok(trace) => trace,
        Err(err) => {
            log::warn!("{}", err);
            writeln!(out, "Access to address: {} rejected: {}\n", raw, err)?;
            return Ok(());
        }
    };
    write!(out, "{}", report::render_access(&trace, &hierarchy.snapshots()))?;
    Ok(())
}

pub fn missing_file_notice(path: &Path) -> String {
    format!(
        "File '{}' not found. You can enter addresses manually.",
        path.display()
    )
}
