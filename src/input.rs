//! CSV input and output.
//!
//! Two input layouts are accepted:
//!
//! | Layout | First row | Columns |
//! |--------|-----------|---------|
//! | headed | contains `date` and `value` (and optionally `id`) | by name |
//! | export | 4 fields, no header | `row_number,date,id,value` |
//!
//! A headerless 2-field file is read as `date,value`.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use gapfill_series::TimeSeries;

/// Timestamp formats carrying a UTC offset, e.g. `2024-01-01 06:00:00+05:00`.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%dT%H:%M:%S%:z"];
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Headed {
        date: usize,
        value: usize,
        id: Option<usize>,
    },
    Export,
    Pair,
}

impl Layout {
    /// Infers the layout from the first row; `true` means that row is a header.
    fn detect(first: &StringRecord) -> Result<(Self, bool)> {
        let column = |name: &str| first.iter().position(|f| f.eq_ignore_ascii_case(name));
        if let Some(date) = column("date") {
            let value =
                column("value").context("header has a date column but no value column")?;
            return Ok((
                Layout::Headed {
                    date,
                    value,
                    id: column("id"),
                },
                true,
            ));
        }
        match first.len() {
            2 => Ok((Layout::Pair, false)),
            4 => Ok((Layout::Export, false)),
            n => bail!("cannot infer columns of a {n}-field row without a header"),
        }
    }

    /// Reorders `record` into `date,id,value`.
    fn project(self, record: &StringRecord) -> StringRecord {
        let field = |i: usize| record.get(i).unwrap_or("");
        let (date, id, value) = match self {
            Layout::Headed { date, value, id } => {
                (field(date), id.map_or("", field), field(value))
            }
            Layout::Export => (field(1), field(2), field(3)),
            Layout::Pair => (field(0), "", field(1)),
        };
        StringRecord::from(vec![date, id, value])
    }
}

#[derive(Debug, Deserialize)]
struct Record {
    date: String,
    id: Option<String>,
    #[serde(deserialize_with = "csv::invalid_option")]
    value: Option<f64>,
}

/// One input row with a parsed timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: Option<String>,
    /// Timestamp in UTC; plain dates are taken at midnight.
    pub instant: NaiveDateTime,
    /// `None` for empty, unparseable or non-finite values.
    pub value: Option<f64>,
}

impl Row {
    pub fn day(&self) -> NaiveDate {
        self.instant.date()
    }
}

/// Every parsed row of an input file, possibly holding several series.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<Row>,
}

/// Parses a date or timestamp. Offset timestamps are converted to UTC; any
/// other value falls back to its leading `YYYY-MM-DD`.
fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    OFFSET_FORMATS
        .iter()
        .find_map(|f| DateTime::parse_from_str(raw, f).ok())
        .map(|t| t.naive_utc())
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
        })
        .or_else(|| {
            let day = raw.get(..10)?;
            NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .ok()?
                .and_hms_opt(0, 0, 0)
        })
}

/// Reads every row of `path`. Rows whose date cannot be parsed are skipped.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    info!(path = %path.display(), "reading input");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open CSV: {}", path.display()))?;

    let mut layout = None;
    let mut rows = Vec::new();
    let mut n_skipped = 0usize;
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("bad CSV record at row {}", line + 1))?;
        let current = match layout {
            Some(l) => l,
            None => {
                let (detected, is_header) = Layout::detect(&record)?;
                debug!(?detected, is_header, "detected input layout");
                layout = Some(detected);
                if is_header {
                    continue;
                }
                detected
            }
        };
        let projected = current.project(&record);
        let parsed: Record = projected
            .deserialize(None)
            .with_context(|| format!("bad CSV record at row {}", line + 1))?;
        let Some(instant) = parse_instant(&parsed.date) else {
            n_skipped += 1;
            continue;
        };
        rows.push(Row {
            id: parsed.id,
            instant,
            value: parsed.value.filter(|v| v.is_finite()),
        });
    }
    if n_skipped > 0 {
        warn!(n_skipped, "skipped rows with unparseable dates");
    }
    if rows.is_empty() {
        bail!("input CSV contains no usable records: {}", path.display());
    }
    info!(n_rows = rows.len(), "loaded input");
    Ok(Dataset { rows })
}

impl Dataset {
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Distinct series ids in sorted order; `None` when the file has no id column.
    pub fn ids(&self) -> Vec<Option<&str>> {
        let mut ids: Vec<Option<&str>> = self.rows.iter().map(|r| r.id.as_deref()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Builds the series for `id`.
    ///
    /// Rows are ordered by timestamp and the latest observed value of each
    /// day wins; a day with only missing values stays missing. Without an
    /// id the file must hold exactly one series.
    pub fn series(&self, id: Option<&str>) -> Result<TimeSeries> {
        let ids = self.ids();
        let wanted = match id {
            Some(id) if ids.contains(&Some(id)) => Some(id),
            Some(id) if ids == [None] => bail!("input has no id column; cannot select {id:?}"),
            Some(id) => bail!("no rows for series id {id:?}"),
            None if ids.len() > 1 => {
                bail!("input holds {} series; choose one with --id", ids.len())
            }
            None => ids.first().copied().flatten(),
        };

        let mut rows: Vec<&Row> = self
            .rows
            .iter()
            .filter(|r| r.id.as_deref() == wanted)
            .collect();
        rows.sort_by_key(|r| r.instant);

        let mut days: BTreeMap<NaiveDate, Option<f64>> = BTreeMap::new();
        for row in rows {
            match row.value {
                Some(v) => {
                    days.insert(row.day(), Some(v));
                }
                None => {
                    days.entry(row.day()).or_insert(None);
                }
            }
        }

        let series =
            TimeSeries::new(days.into_iter().collect()).context("failed to build series from CSV")?;
        info!(
            id = wanted.unwrap_or("-"),
            n_days = series.len(),
            n_present = series.n_present(),
            "selected series"
        );
        Ok(series)
    }
}

/// Reads one series from `path`, selected by `id` when the file holds several.
pub fn read_series(path: &Path, id: Option<&str>) -> Result<TimeSeries> {
    read_dataset(path)?.series(id)
}

#[derive(Serialize)]
struct OutputRow {
    date: NaiveDate,
    value: Option<f64>,
}

/// Writes `series` as `date,value` CSV; missing values are empty fields.
pub fn write_series<W: Write>(series: &TimeSeries, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for o in series.observations() {
        writer
            .serialize(OutputRow {
                date: o.date(),
                value: o.value(),
            })
            .context("failed to write CSV row")?;
    }
    writer.flush().context("failed to flush CSV output")?;
    Ok(())
}

/// Writes one column per filled series, aligned on the daily `axis`.
pub fn write_comparison<W: Write>(
    axis: &[NaiveDate],
    filled: &[(String, TimeSeries)],
    out: W,
) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    let header = std::iter::once("date").chain(filled.iter().map(|(name, _)| name.as_str()));
    writer
        .write_record(header)
        .context("failed to write CSV header")?;
    for &date in axis {
        let mut record = vec![date.to_string()];
        record.extend(
            filled
                .iter()
                .map(|(_, s)| s.value_at(date).map(|v| v.to_string()).unwrap_or_default()),
        );
        writer
            .write_record(&record)
            .context("failed to write CSV row")?;
    }
    writer.flush().context("failed to flush CSV output")?;
    Ok(())
}
