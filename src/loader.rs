//! Dataset ingestion - reads CSV/Parquet exports into a normalized frame
//!
//! One load produces the frame everything else (filters, KPI cards, slicer
//! options) works on: columns renamed to the canonical schema, metric columns
//! coerced to Float64, `published_at` parsed to a datetime and the slicer
//! dimensions (`year`, `weekday`, `hour`) derived from it when the export did
//! not carry them.

use std::path::Path;

use polars::prelude::*;
use regex::Regex;
use tracing::{debug, info};

use crate::error::{KpiError, Result};
use crate::schema::{self, FRENCH_WEEKDAYS};

/// Load a CSV or Parquet dataset and normalize it for aggregation.
///
/// Fails with [`KpiError::MissingColumns`] naming every absent required
/// column, and with [`KpiError::UnsupportedFormat`] for any other extension.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let df = match ext.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_has_header(true)
            .with_try_parse_dates(true)
            .with_infer_schema_length(Some(1000))
            .finish()?
            .collect()?,
        "parquet" => LazyFrame::scan_parquet(path, ScanArgsParquet::default())?.collect()?,
        other => return Err(KpiError::UnsupportedFormat(other.to_string())),
    };

    info!(
        "Loaded {} ({} rows, {} columns)",
        path.display(),
        df.height(),
        df.width()
    );

    normalize_dataset(df)
}

/// Normalization pipeline shared by both file formats.
///
/// Public so a host that already holds a frame (e.g. from an upload buffer)
/// can run the same pipeline without touching the filesystem.
pub fn normalize_dataset(mut df: DataFrame) -> Result<DataFrame> {
    schema::normalize_columns(&mut df)?;

    let missing = schema::missing_required(&df);
    if !missing.is_empty() {
        return Err(KpiError::MissingColumns(missing));
    }

    let df = convert_scientific_notation_columns(df)?;
    let df = coerce_metric_columns(df)?;
    let df = parse_published_at(df)?;
    let df = derive_slicer_columns(df)?;

    Ok(df)
}

/// Cast string columns holding scientific notation (`-3.97E+07`) to Float64.
///
/// Some exports serialize large counters through a spreadsheet round-trip
/// that leaves them as text. Only columns where at least one value matches
/// the pattern are converted.
fn convert_scientific_notation_columns(df: DataFrame) -> Result<DataFrame> {
    let scientific = Regex::new(r"^-?\d+\.?\d*[Ee][+-]?\d+$")
        .map_err(|e| KpiError::Dataset(format!("Failed to build regex: {e}")))?;
    let columns: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    let mut result = df;

    for name in &columns {
        let Ok(series) = result.column(name) else {
            continue;
        };
        if !matches!(series.dtype(), DataType::String) {
            continue;
        }
        let has_scientific = series
            .str()
            .map(|ca| ca.into_iter().flatten().any(|v| scientific.is_match(v)))
            .unwrap_or(false);
        if !has_scientific {
            continue;
        }
        debug!("Converting scientific notation column {name}");
        result = result
            .lazy()
            .with_columns([col(name).cast(DataType::Float64).alias(name)])
            .collect()?;
    }

    Ok(result)
}

/// Coerce the three metric columns to Float64; unparseable cells become null.
fn coerce_metric_columns(df: DataFrame) -> Result<DataFrame> {
    let present = df.get_column_names();
    let casts: Vec<Expr> = [schema::VIEWS, schema::ENGAGEMENT_RATE, schema::ENGAGEMENT_TOTAL]
        .iter()
        .copied()
        .filter(|c| present.contains(c))
        .map(|c| col(c).cast(DataType::Float64).alias(c))
        .collect();

    if casts.is_empty() {
        return Ok(df);
    }
    Ok(df.lazy().with_columns(casts).collect()?)
}

/// Parse `published_at` to a naive datetime when it arrived as text.
///
/// Non-strict: values that do not parse become null and are simply absent
/// from the derived year/weekday/hour dimensions.
fn parse_published_at(df: DataFrame) -> Result<DataFrame> {
    let dtype = match df.column(schema::PUBLISHED_AT) {
        Ok(s) => s.dtype().clone(),
        Err(_) => return Ok(df),
    };

    let parsed = match dtype {
        DataType::String => {
            let options = StrptimeOptions {
                strict: false,
                exact: false,
                ..Default::default()
            };
            col(schema::PUBLISHED_AT)
                .str()
                .to_datetime(Some(TimeUnit::Microseconds), None, options, lit("raise"))
        }
        // Date-only exports still need hour extraction to work downstream.
        DataType::Date => col(schema::PUBLISHED_AT)
            .cast(DataType::Datetime(TimeUnit::Microseconds, None)),
        _ => return Ok(df),
    };

    Ok(df
        .lazy()
        .with_columns([parsed.alias(schema::PUBLISHED_AT)])
        .collect()?)
}

/// Derive the slicer dimensions from `published_at` when the export lacks
/// them, and normalize the dtypes of the ones it carries.
fn derive_slicer_columns(df: DataFrame) -> Result<DataFrame> {
    let present: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    let has = |c: &str| present.iter().any(|p| p == c);

    let datetime_ready = df
        .column(schema::PUBLISHED_AT)
        .map(|s| matches!(s.dtype(), DataType::Datetime(_, _)))
        .unwrap_or(false);

    let mut exprs: Vec<Expr> = Vec::new();

    if datetime_ready {
        let ts = col(schema::PUBLISHED_AT);
        if !has(schema::YEAR) {
            exprs.push(ts.clone().dt().year().alias(schema::YEAR));
        }
        if !has(schema::WEEKDAY) {
            exprs.push(weekday_label_expr(ts.clone()));
        }
        if !has(schema::HOUR) {
            exprs.push(ts.dt().hour().cast(DataType::Int32).alias(schema::HOUR));
        }
    }

    // Exports sometimes carry their own year/hour columns; unify the dtype so
    // slicer predicates compare against Int32 either way.
    for c in [schema::YEAR, schema::HOUR] {
        if has(c) {
            exprs.push(col(c).cast(DataType::Int32).alias(c));
        }
    }

    if exprs.is_empty() {
        return Ok(df);
    }
    Ok(df.lazy().with_columns(exprs).collect()?)
}

/// French weekday label from the publication timestamp (Monday = `Lundi`).
fn weekday_label_expr(ts: Expr) -> Expr {
    let wd = ts.dt().weekday();
    let mut label = when(wd.clone().eq(lit(1)))
        .then(lit(FRENCH_WEEKDAYS[0]))
        .when(wd.clone().eq(lit(2)))
        .then(lit(FRENCH_WEEKDAYS[1]));
    for (idx, name) in FRENCH_WEEKDAYS.iter().enumerate().skip(2) {
        label = label.when(wd.clone().eq(lit(idx as i32 + 1))).then(lit(*name));
    }
    label.otherwise(lit(NULL)).alias(schema::WEEKDAY)
}
