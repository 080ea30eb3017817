//! Slicer options - the distinct values each filter control offers

use itertools::Itertools;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::{self, FRENCH_WEEKDAYS};

/// Distinct, sorted values per slicer dimension, derived from the loaded
/// (unfiltered) table. Dimensions without a backing column come out empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlicerOptions {
    pub years: Vec<i32>,
    pub categories: Vec<String>,
    pub channels: Vec<String>,
    pub weekdays: Vec<String>,
    pub hours: Vec<i32>,
}

impl SlicerOptions {
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let weekdays_present = distinct_strings(df, schema::WEEKDAY)?;
        // Week order, not lexical order.
        let weekdays = FRENCH_WEEKDAYS
            .iter()
            .filter(|d| weekdays_present.iter().any(|p| p == *d))
            .map(|d| d.to_string())
            .collect();

        Ok(Self {
            years: distinct_ints(df, schema::YEAR)?,
            categories: distinct_strings(df, schema::CATEGORY_NAME)?,
            channels: distinct_strings(df, schema::CHANNEL)?,
            weekdays,
            hours: distinct_ints(df, schema::HOUR)?,
        })
    }
}

fn distinct_strings(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let Ok(series) = df.column(column) else {
        return Ok(Vec::new());
    };
    Ok(series
        .str()?
        .into_iter()
        .flatten()
        .map(String::from)
        .sorted()
        .dedup()
        .collect())
}

fn distinct_ints(df: &DataFrame, column: &str) -> Result<Vec<i32>> {
    let Ok(series) = df.column(column) else {
        return Ok(Vec::new());
    };
    Ok(series
        .cast(&DataType::Int32)?
        .i32()?
        .into_iter()
        .flatten()
        .sorted()
        .dedup()
        .collect())
}
