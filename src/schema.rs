//! Canonical column schema and alias normalization
//!
//! Source exports of the dataset use a mix of French labels, PBIX display
//! names and snake_case variants for the same columns. Everything downstream
//! works against the canonical snake_case names, so ingestion runs the raw
//! header row through a fixed alias table first.

use polars::prelude::*;

use crate::error::Result;

pub const CATEGORY_ID: &str = "category_id";
pub const VIEWS: &str = "views";
pub const ENGAGEMENT_RATE: &str = "engagement_rate";
pub const ENGAGEMENT_TOTAL: &str = "engagement_total";
pub const CHANNEL: &str = "channel";
pub const PUBLISHED_AT: &str = "published_at";
pub const CATEGORY_NAME: &str = "category_name";
pub const WEEKDAY: &str = "weekday";
pub const HOUR: &str = "hour";
pub const YEAR: &str = "year";

/// Week order for the weekday slicer, as the source report labels days.
pub const FRENCH_WEEKDAYS: [&str; 7] = [
    "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi", "Dimanche",
];

/// Columns the KPI cards cannot be computed without.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    CATEGORY_ID,
    VIEWS,
    ENGAGEMENT_RATE,
    ENGAGEMENT_TOTAL,
    CHANNEL,
    PUBLISHED_AT,
];

/// Known alias -> canonical name. Keys are matched case-insensitively, so
/// canonical names appear as their own aliases to catch case variants like
/// `Views` or `Channel`.
const COLUMN_ALIASES: [(&str, &str); 22] = [
    ("views", VIEWS),
    ("channel", CHANNEL),
    ("category_name", CATEGORY_NAME),
    ("taux_engagement", ENGAGEMENT_RATE),
    ("taux d'engagement (%)", ENGAGEMENT_RATE),
    ("engagement_rate", ENGAGEMENT_RATE),
    ("engagement total", ENGAGEMENT_TOTAL),
    ("engagement_total", ENGAGEMENT_TOTAL),
    ("publishedat", PUBLISHED_AT),
    ("published_at", PUBLISHED_AT),
    ("date_publication", PUBLISHED_AT),
    ("categorie_id", CATEGORY_ID),
    ("categoryid", CATEGORY_ID),
    ("category_id", CATEGORY_ID),
    ("vues", VIEWS),
    ("chaine", CHANNEL),
    ("jour de la semaine", WEEKDAY),
    ("heure", HOUR),
    ("annee", YEAR),
    ("année", YEAR),
    ("categorie", CATEGORY_NAME),
    ("cats.name", CATEGORY_NAME),
];

fn canonical_for(raw: &str) -> Option<&'static str> {
    let lower = raw.trim().to_lowercase();
    COLUMN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lower)
        .map(|(_, canonical)| *canonical)
}

/// Rename known alias columns to their canonical names.
///
/// Unrecognized columns pass through untouched, and a table that already uses
/// canonical names is left as-is. If both an alias and its canonical column
/// are present, the existing canonical column wins and the alias is kept
/// under its original name.
pub fn normalize_columns(df: &mut DataFrame) -> Result<()> {
    let columns: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();

    for raw in &columns {
        let Some(canonical) = canonical_for(raw) else {
            continue;
        };
        if raw.as_str() == canonical {
            continue;
        }
        let current: Vec<&str> = df.get_column_names();
        if current.contains(&canonical) {
            continue;
        }
        df.rename(raw, canonical)?;
    }

    Ok(())
}

/// Required columns absent from the frame, in declaration order.
pub fn missing_required(df: &DataFrame) -> Vec<String> {
    let present = df.get_column_names();
    REQUIRED_COLUMNS
        .iter()
        .filter(|c| !present.contains(*c))
        .map(|c| c.to_string())
        .collect()
}
