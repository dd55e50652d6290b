//! Spreadsheet-friendly CSV export of a T&A plan.

use crate::error::PlannerResult;
use crate::schedule::ScheduleResult;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Byte-order mark so Excel opens the file as UTF-8.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Serialize)]
struct StageCsvRecord<'a> {
    stage: &'a str,
    date: String,
    description: &'a str,
    delay_days: u32,
}

/// `TA_Schedule_<in-store date>.csv`
pub fn export_file_name(in_store_date: NaiveDate) -> String {
    format!("TA_Schedule_{}.csv", format_date(in_store_date))
}

/// Write the BOM, a header row and one row per stage (Booking first).
pub fn write_schedule_csv<W: Write>(schedule: &ScheduleResult, mut writer: W) -> PlannerResult<()> {
    writer.write_all(UTF8_BOM)?;
    let mut csv_writer = csv::Writer::from_writer(writer);
    for stage in &schedule.stages {
        csv_writer.serialize(StageCsvRecord {
            stage: stage.stage.label(),
            date: format_date(stage.date),
            description: &stage.description,
            delay_days: stage.delay_days,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn schedule_to_csv_bytes(schedule: &ScheduleResult) -> PlannerResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_schedule_csv(schedule, &mut buffer)?;
    Ok(buffer)
}

pub fn save_schedule_to_csv<P: AsRef<Path>>(schedule: &ScheduleResult, path: P) -> PlannerResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_schedule_csv(schedule, BufWriter::new(file))?;
    info!(path = %path.display(), "schedule exported");
    Ok(())
}

/// Save under the standard file name inside `dir`; returns the full path.
pub fn save_schedule_to_dir<P: AsRef<Path>>(
    schedule: &ScheduleResult,
    dir: P,
) -> PlannerResult<PathBuf> {
    let path = dir.as_ref().join(export_file_name(schedule.in_store_date));
    save_schedule_to_csv(schedule, &path)?;
    Ok(path)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
