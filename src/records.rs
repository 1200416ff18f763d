//! Text record loader and writer.
//!
//! Input records are semicolon-separated lines of
//! `label;burst;arrival;level;priority`. Lines starting with `#` and
//! blank lines are ignored; malformed records are skipped with a
//! warning and never reach the engine.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;

use crate::core::{QueueLevel, Ticks};
use crate::sim::{ProcessRecord, Report};

pub fn load_records(path: &Path) -> Result<Vec<ProcessRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading process records from {}", path.display()))?;
    Ok(parse_records(&text))
}

pub fn parse_records(text: &str) -> Vec<ProcessRecord> {
    let mut records = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_record(line) {
            Ok(record) => records.push(record),
            Err(reason) => warn!("skipping record on line {}: {reason}: {line:?}", idx + 1),
        }
    }
    records
}

fn parse_record(line: &str) -> Result<ProcessRecord, String> {
    let fields: Vec<&str> = line.split(';').map(str::trim).collect();
    if fields.len() != 5 {
        return Err(format!("expected 5 fields, found {}", fields.len()));
    }

    let label = fields[0].to_string();
    if label.is_empty() {
        return Err("empty label".into());
    }
    let burst: Ticks = fields[1]
        .parse()
        .map_err(|_| format!("bad burst length {:?}", fields[1]))?;
    if burst == 0 {
        return Err("burst length must be positive".into());
    }
    let arrival: Ticks = fields[2]
        .parse()
        .map_err(|_| format!("bad arrival tick {:?}", fields[2]))?;
    let level_number: u64 = fields[3]
        .parse()
        .map_err(|_| format!("bad queue level {:?}", fields[3]))?;
    let level = QueueLevel::from_number(level_number)
        .ok_or_else(|| format!("queue level {level_number} outside 1..=3"))?;
    let priority: i64 = fields[4]
        .parse()
        .map_err(|_| format!("bad priority {:?}", fields[4]))?;

    Ok(ProcessRecord {
        label,
        burst,
        arrival,
        level,
        priority,
    })
}

/// Render the result table: provenance comment, header, one row per
/// completed process in label order, then the summary means with one
/// decimal place.
pub fn render_report(report: &Report, source: &str, complete: bool) -> String {
    let mut out = String::new();
    if !complete {
        out.push_str("# INCOMPLETE: tick ceiling reached before all processes finished\n");
    }
    let _ = writeln!(out, "# source: {source}");
    out.push_str("# label; BT; AT; Q; Pr; WT; CT; RT; TAT\n");

    for row in &report.rows {
        let _ = writeln!(
            out,
            "{};{};{};{};{};{};{};{};{}",
            row.label,
            row.burst,
            row.arrival,
            row.level,
            row.priority,
            row.waiting,
            row.completion,
            row.response,
            row.turnaround
        );
    }

    let s = &report.summary;
    let _ = writeln!(
        out,
        "\nWT={:.1}; CT={:.1}; RT={:.1}; TAT={:.1};",
        s.waiting, s.completion, s.response, s.turnaround
    );
    out
}

pub fn write_report(path: &Path, report: &Report, source: &str, complete: bool) -> Result<()> {
    fs::write(path, render_report(report, source, complete))
        .with_context(|| format!("writing results to {}", path.display()))
}
