//! Dashboard orchestration - one loaded dataset, many renders
//!
//! The host front-end loads a file once, then calls [`Dashboard::view`] with
//! the current slicer state on every render. Each call is a pure
//! recomputation over the in-memory frame; nothing is cached between calls.

use std::path::Path;

use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::filter::FilterSelection;
use crate::format::{fr_float, fr_int};
use crate::kpi::KpiSummary;
use crate::loader;
use crate::slicer::SlicerOptions;

/// One KPI card: a title and its already-formatted display value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiCard {
    pub title: String,
    pub value: String,
}

/// Everything one render needs: the four cards, the raw summary values and
/// the slicer options derived from the full dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub cards: Vec<KpiCard>,
    pub summary: KpiSummary,
    pub slicers: SlicerOptions,
    /// Rows in the whole dataset, before filtering.
    pub total_rows: usize,
}

#[derive(Debug)]
pub struct Dashboard {
    df: DataFrame,
}

impl Dashboard {
    /// Load and normalize a CSV/Parquet dataset.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            df: loader::load_dataset(path)?,
        })
    }

    /// Wrap an already-loaded frame (runs the same normalization pipeline).
    pub fn from_frame(df: DataFrame) -> Result<Self> {
        Ok(Self {
            df: loader::normalize_dataset(df)?,
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    /// Compute the cards and slicer options for one slicer state.
    pub fn view(&self, selection: &FilterSelection) -> Result<DashboardView> {
        let filtered = selection.apply(&self.df)?;
        if !selection.is_empty() {
            debug!(
                "Filter kept {} of {} rows",
                filtered.height(),
                self.df.height()
            );
        }

        let summary = KpiSummary::compute(&filtered)?;
        let slicers = SlicerOptions::from_frame(&self.df)?;

        Ok(DashboardView {
            cards: cards_for(&summary),
            summary,
            slicers,
            total_rows: self.df.height(),
        })
    }

    /// First `n` rows of the filtered subset, for the preview pane.
    pub fn preview(&self, selection: &FilterSelection, n: usize) -> Result<DataFrame> {
        Ok(selection.apply(&self.df)?.head(Some(n)))
    }
}

/// The four cards of the report, in display order.
fn cards_for(summary: &KpiSummary) -> Vec<KpiCard> {
    vec![
        KpiCard {
            title: "Nombre total de vidéos analysées".to_string(),
            value: fr_int(Some(summary.video_count as f64)),
        },
        KpiCard {
            title: "Moyenne du nombre de vues par vidéo".to_string(),
            value: fr_int(summary.avg_views),
        },
        KpiCard {
            title: "Taux d'engagement moyen".to_string(),
            value: format!("{} %", fr_float(summary.avg_engagement_rate, 2)),
        },
        KpiCard {
            title: "Nombre total d'intéractions".to_string(),
            value: fr_int(Some(summary.total_engagement)),
        },
    ]
}
