//! Slicer filters - conjunctive row masks over the normalized frame

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema;

/// The slicer state of one render: every dimension is optional, an empty
/// selection means "no filter on that dimension".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub years: Vec<i32>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub channels: Vec<String>,
    #[serde(default)]
    pub weekdays: Vec<String>,
    #[serde(default)]
    pub hours: Vec<i32>,
}

impl FilterSelection {
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
            && self.categories.is_empty()
            && self.channels.is_empty()
            && self.weekdays.is_empty()
            && self.hours.is_empty()
    }

    /// Apply every active slicer as an AND-ed `is_in` predicate.
    ///
    /// A slicer whose column is absent from the table is skipped, matching
    /// the source report (a dataset without `category_name` simply ignores
    /// the category slicer). Selections that match no row produce an empty
    /// frame, never an error.
    pub fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        let mask = self.predicate(df);
        let Some(mask) = mask else {
            return Ok(df.clone());
        };
        Ok(df.clone().lazy().filter(mask).collect()?)
    }

    fn predicate(&self, df: &DataFrame) -> Option<Expr> {
        let present = df.get_column_names();
        let has = |c: &str| present.contains(&c);

        let mut terms: Vec<Expr> = Vec::new();

        if !self.years.is_empty() && has(schema::YEAR) {
            terms.push(is_in_i32(schema::YEAR, &self.years));
        }
        if !self.categories.is_empty() && has(schema::CATEGORY_NAME) {
            terms.push(is_in_str(schema::CATEGORY_NAME, &self.categories));
        }
        if !self.channels.is_empty() && has(schema::CHANNEL) {
            terms.push(is_in_str(schema::CHANNEL, &self.channels));
        }
        if !self.weekdays.is_empty() && has(schema::WEEKDAY) {
            terms.push(is_in_str(schema::WEEKDAY, &self.weekdays));
        }
        if !self.hours.is_empty() && has(schema::HOUR) {
            terms.push(is_in_i32(schema::HOUR, &self.hours));
        }

        terms.into_iter().reduce(|acc, term| acc.and(term))
    }
}

fn is_in_i32(column: &str, values: &[i32]) -> Expr {
    col(column).is_in(lit(Series::new(column, values)))
}

fn is_in_str(column: &str, values: &[String]) -> Expr {
    col(column).is_in(lit(Series::new(column, values)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        df![
            "views" => [10.0, 20.0, 30.0],
            "channel" => ["tech", "cooking", "tech"],
            "category_name" => ["Science", "Food", "Science"],
            "year" => [2023i32, 2023, 2024],
            "hour" => [10i32, 18, 10],
        ]
        .unwrap()
    }

    #[test]
    fn empty_selection_keeps_all_rows() {
        let df = frame();
        let filtered = FilterSelection::default().apply(&df).unwrap();
        assert_eq!(filtered.height(), 3);
    }

    #[test]
    fn filters_are_conjunctive() {
        let selection = FilterSelection {
            channels: vec!["tech".to_string()],
            years: vec![2023],
            ..Default::default()
        };
        let filtered = selection.apply(&frame()).unwrap();
        assert_eq!(filtered.height(), 1);
        let views: Vec<f64> = filtered
            .column("views")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(views, vec![10.0]);
    }

    #[test]
    fn unknown_category_yields_empty_subset() {
        let selection = FilterSelection {
            categories: vec!["Gaming".to_string()],
            ..Default::default()
        };
        let filtered = selection.apply(&frame()).unwrap();
        assert_eq!(filtered.height(), 0);
    }

    #[test]
    fn slicer_without_backing_column_is_skipped() {
        let df = df![
            "views" => [10.0, 20.0],
            "channel" => ["a", "b"],
        ]
        .unwrap();
        let selection = FilterSelection {
            weekdays: vec!["Lundi".to_string()],
            ..Default::default()
        };
        let filtered = selection.apply(&df).unwrap();
        assert_eq!(filtered.height(), 2);
    }
}
