use crate::model::{DayOfWeek, TimeOfDay};
use crate::slots::BookableSlot;
use crate::validator::{OverrideDraft, WeeklyDraft};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::path::Path;

/// Import de créneaux hebdomadaires: header `day_of_week,start,end` (0 = lundi, `HH:MM`)
///
/// Les lignes sont des saisies brutes : la validation se fait à l'ajout dans le carnet.
pub fn import_weekly_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<WeeklyDraft>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let row = line + 2;
        let day = rec.get(0).context("missing day_of_week")?.trim();
        let day: u8 = day
            .parse()
            .with_context(|| format!("row {row}: invalid day_of_week {day:?}"))?;
        let day_of_week = DayOfWeek::new(day)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("row {row}"))?;
        out.push(WeeklyDraft {
            day_of_week,
            start: optional_time(&rec, 1).with_context(|| format!("row {row}: start"))?,
            end: optional_time(&rec, 2).with_context(|| format!("row {row}: end"))?,
        });
    }
    Ok(out)
}

/// Import d'exceptions: header `date,is_all_day,start,end,description`
pub fn import_overrides_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<OverrideDraft>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let row = line + 2;
        let date = match field(&rec, 0) {
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .with_context(|| format!("row {row}: invalid date {raw:?}"))?,
            ),
            None => None,
        };
        let is_all_day = match field(&rec, 1) {
            Some(raw) => parse_bool(raw).with_context(|| format!("row {row}: is_all_day"))?,
            None => false,
        };
        out.push(OverrideDraft {
            date,
            is_all_day,
            start: optional_time(&rec, 2).with_context(|| format!("row {row}: start"))?,
            end: optional_time(&rec, 3).with_context(|| format!("row {row}: end"))?,
            description: field(&rec, 4).map(str::to_owned),
        });
    }
    Ok(out)
}

fn field(rec: &StringRecord, idx: usize) -> Option<&str> {
    rec.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

fn optional_time(rec: &StringRecord, idx: usize) -> anyhow::Result<Option<TimeOfDay>> {
    match field(rec, idx) {
        Some(raw) => {
            let t = raw
                .parse::<TimeOfDay>()
                .with_context(|| format!("invalid time {raw:?} (expected HH:MM)"))?;
            Ok(Some(t))
        }
        None => Ok(None),
    }
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" => Ok(true),
        "false" | "0" | "no" | "n" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// Export CSV des créneaux réservables: header `start,end`
pub fn export_slots_csv<P: AsRef<Path>>(path: P, slots: &[BookableSlot]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["start", "end"])?;
    for s in slots {
        let start = s.start.format("%Y-%m-%dT%H:%M").to_string();
        let end = s.end.format("%Y-%m-%dT%H:%M").to_string();
        w.write_record([start.as_str(), end.as_str()])?;
    }
    w.flush()?;
    Ok(())
}
