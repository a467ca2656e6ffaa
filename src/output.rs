//! Output formatting and persistence for hotspot reports.
//!
//! Supports pretty-printing, JSON serialization, and CSV export with optional
//! gzip compression.

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::{HotspotReport, SlotCount, ZoneCount};
use csv::WriterBuilder;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &HotspotReport) {
    debug!("{:#?}", report);
}

/// Logs a report as pretty-printed JSON.
pub fn print_json(report: &HotspotReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes a report to `path` as pretty-printed JSON, replacing any existing file.
#[tracing::instrument(skip(report), fields(path = %path.display()))]
pub fn write_json(path: &Path, report: &HotspotReport) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;

    info!("Report written");
    Ok(())
}

/// Writes zone rankings to `path` as CSV with a `zone,count` header.
pub fn write_zone_csv(path: &Path, rows: &[ZoneCount], gzip: bool) -> Result<()> {
    write_csv(path, rows, gzip)
}

/// Writes slot rankings to `path` as CSV with a `zone,hour,count` header.
pub fn write_slot_csv(path: &Path, rows: &[SlotCount], gzip: bool) -> Result<()> {
    write_csv(path, rows, gzip)
}

#[tracing::instrument(skip(rows), fields(path = %path.display(), rows = rows.len()))]
fn write_csv<T: Serialize>(path: &Path, rows: &[T], gzip: bool) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;

    if gzip {
        let mut encoder = GzEncoder::new(file, Compression::default());
        write_rows(&mut encoder, rows)?;
        encoder.finish()?;
    } else {
        write_rows(file, rows)?;
    }

    debug!(gzip, "CSV written");
    Ok(())
}

fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
