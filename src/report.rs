//! Side-by-side text report of one access and the cache contents after it.
//! Only borrows; nothing here can change cache state.

use std::fmt::Write;

use crate::{
    hierarchy::{AccessTrace, HierarchyStats},
    snapshot::CacheSnapshot,
};

pub const TRACE_WIDTH: usize = 40;
pub const LEVEL_WIDTH: usize = 30;

pub fn render_access(trace: &AccessTrace, snapshots: &[CacheSnapshot]) -> String {
    let access_col: Vec<String> = std::iter::once(format!("Access to address: {}", trace.address))
        .chain(trace.lines())
        .collect();
    let level_cols: Vec<Vec<String>> = snapshots.iter().map(|s| s.rows()).collect();
    let total_width = TRACE_WIDTH + LEVEL_WIDTH * snapshots.len();

    let mut out = String::new();
    let _ = write!(out, "{:<w$}", "Access and Results", w = TRACE_WIDTH);
    for snap in snapshots {
        let _ = write!(out, "{:<w$}", format!("Cache {}", snap.name), w = LEVEL_WIDTH);
    }
    out.push('\n');
    out.push_str(&"-".repeat(total_width));
    out.push('\n');

    let n_rows = level_cols
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(access_col.len()))
        .max()
        .unwrap_or(0);
    for i in 0..n_rows {
        let _ = write!(out, "{:<w$}", cell(&access_col, i), w = TRACE_WIDTH);
        for col in &level_cols {
            let _ = write!(out, "{:<w$}", cell(col, i), w = LEVEL_WIDTH);
        }
        out.push('\n');
    }
    out.push_str(&"=".repeat(total_width));
    out.push_str("\n\n");
    out
}

fn cell(col: &[String], i: usize) -> &str {
    col.get(i).map(String::as_str).unwrap_or("")
}

/// One-line summary per level, for the end of a run.
pub fn render_stats(stats: &HierarchyStats) -> String {
    let mut out = String::new();
    for c in &stats.caches {
        let _ = writeln!(
            out,
            "{}: {} hits, {} misses, {} evictions, miss rate {:.2}%",
            c.name,
            c.hits,
            c.misses,
            c.evictions,
            c.miss_rate * 100.0
        );
    }
    let _ = writeln!(out, "Main memory: {} reads", stats.memory_reads);
    out
}
