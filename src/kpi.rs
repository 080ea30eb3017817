//! KPI aggregation - the four card values of the report

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema;

/// The four card values, computed over the post-filter subset.
///
/// An empty subset is a legal state (slicers that match nothing): counts and
/// sums collapse to zero, means to `None`. Never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Count of rows with a non-null `category_id`.
    pub video_count: u32,
    /// Mean of `views`, `None` when no row carries a value.
    pub avg_views: Option<f64>,
    /// Mean of `engagement_rate` (a percentage), `None` when empty.
    pub avg_engagement_rate: Option<f64>,
    /// Sum of `engagement_total`.
    pub total_engagement: f64,
    /// Rows in the filtered subset (for the preview pane).
    pub row_count: usize,
}

impl KpiSummary {
    /// Aggregate the filtered frame with one lazy select.
    pub fn compute(filtered: &DataFrame) -> Result<Self> {
        let out = filtered
            .clone()
            .lazy()
            .select([
                col(schema::CATEGORY_ID)
                    .count()
                    .cast(DataType::UInt32)
                    .alias("video_count"),
                col(schema::VIEWS).mean().alias("avg_views"),
                col(schema::ENGAGEMENT_RATE).mean().alias("avg_engagement_rate"),
                col(schema::ENGAGEMENT_TOTAL)
                    .sum()
                    .cast(DataType::Float64)
                    .alias("total_engagement"),
            ])
            .collect()?;

        Ok(Self {
            video_count: out.column("video_count")?.u32()?.get(0).unwrap_or(0),
            avg_views: out.column("avg_views")?.f64()?.get(0),
            avg_engagement_rate: out.column("avg_engagement_rate")?.f64()?.get(0),
            total_engagement: out.column("total_engagement")?.f64()?.get(0).unwrap_or(0.0),
            row_count: filtered.height(),
        })
    }
}
