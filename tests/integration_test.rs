use std::fs;
use std::path::PathBuf;

use polars::prelude::*;
use tempfile::TempDir;

use boostme_kpi::{Dashboard, FilterSelection, KpiError};

/// A CSV export the way the source tool writes it: French headers, mixed
/// casing, dates as text.
fn write_french_csv(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("videos.csv");
    let csv = "\
categorie_id,vues,Taux d'engagement (%),Engagement total,chaine,date_publication
1,100,2.0,50,TechFR,2023-01-02 08:30:00
2,200,4.0,150,CuisineFR,2023-06-10 12:00:00
3,300,6.0,100,TechFR,2024-03-15 22:15:00
";
    fs::write(&path, csv).unwrap();
    path
}

fn write_parquet(dir: &TempDir) -> PathBuf {
    let mut df = df![
        "category_id" => [10i64, 20, 30, 40],
        "views" => [1000.0, 2000.0, 3000.0, 4000.0],
        "engagement_rate" => [1.0, 3.0, 5.0, 7.0],
        "engagement_total" => [10.0, 30.0, 50.0, 70.0],
        "channel" => ["gaming", "music", "gaming", "music"],
        "published_at" => [
            "2022-11-01 09:00:00",
            "2022-11-02 10:00:00",
            "2023-02-03 11:00:00",
            "2023-02-04 12:00:00",
        ],
    ]
    .unwrap();

    let path = dir.path().join("videos.parquet");
    let mut file = fs::File::create(&path).unwrap();
    ParquetWriter::new(&mut file).finish(&mut df).unwrap();
    path
}

#[test]
fn csv_with_french_aliases_loads_and_aggregates() {
    let dir = TempDir::new().unwrap();
    let path = write_french_csv(&dir);

    let dashboard = Dashboard::load(&path).unwrap();
    let view = dashboard.view(&FilterSelection::default()).unwrap();

    assert_eq!(view.summary.video_count, 3);
    assert_eq!(view.summary.avg_views, Some(200.0));
    assert_eq!(view.summary.avg_engagement_rate, Some(4.0));
    assert_eq!(view.summary.total_engagement, 300.0);

    // Slicer options derive from the parsed dates.
    assert_eq!(view.slicers.years, vec![2023, 2024]);
    assert_eq!(view.slicers.channels, vec!["CuisineFR", "TechFR"]);
    assert_eq!(view.slicers.hours, vec![8, 12, 22]);

    // Cards render with French formatting.
    assert_eq!(view.cards[0].value, "3");
    assert_eq!(view.cards[2].value, "4,00 %");
}

#[test]
fn parquet_roundtrip_with_filters() {
    let dir = TempDir::new().unwrap();
    let path = write_parquet(&dir);

    let dashboard = Dashboard::load(&path).unwrap();

    let selection = FilterSelection {
        channels: vec!["gaming".to_string()],
        ..Default::default()
    };
    let view = dashboard.view(&selection).unwrap();
    assert_eq!(view.summary.video_count, 2);
    assert_eq!(view.summary.avg_views, Some(2000.0));
    assert_eq!(view.summary.total_engagement, 60.0);

    // AND of channel + year narrows to a single row.
    let selection = FilterSelection {
        channels: vec!["gaming".to_string()],
        years: vec![2023],
        ..Default::default()
    };
    let view = dashboard.view(&selection).unwrap();
    assert_eq!(view.summary.video_count, 1);
    assert_eq!(view.summary.avg_views, Some(3000.0));
}

#[test]
fn unknown_filter_value_gives_zero_summary_not_error() {
    let dir = TempDir::new().unwrap();
    let path = write_parquet(&dir);

    let dashboard = Dashboard::load(&path).unwrap();
    let selection = FilterSelection {
        channels: vec!["does-not-exist".to_string()],
        ..Default::default()
    };
    let view = dashboard.view(&selection).unwrap();

    assert_eq!(view.summary.video_count, 0);
    assert_eq!(view.summary.avg_views, None);
    assert_eq!(view.summary.total_engagement, 0.0);
    assert_eq!(view.summary.row_count, 0);
    assert_eq!(view.cards[1].value, "—");
}

#[test]
fn missing_required_columns_are_named_in_the_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.csv");
    fs::write(&path, "vues,chaine\n10,TechFR\n").unwrap();

    let err = Dashboard::load(&path).unwrap_err();
    match &err {
        KpiError::MissingColumns(cols) => {
            assert!(cols.contains(&"category_id".to_string()));
            assert!(cols.contains(&"engagement_rate".to_string()));
            assert!(cols.contains(&"published_at".to_string()));
            assert!(!cols.contains(&"views".to_string()));
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
    // One user-visible message naming every absent column.
    let message = err.to_string();
    assert!(message.contains("category_id"));
    assert!(message.contains("engagement_rate"));
}

#[test]
fn unsupported_extension_is_rejected() {
    let err = Dashboard::load("videos.xlsx").unwrap_err();
    assert!(matches!(err, KpiError::UnsupportedFormat(ext) if ext == "xlsx"));
}

#[test]
fn preview_returns_filtered_head() {
    let dir = TempDir::new().unwrap();
    let path = write_parquet(&dir);

    let dashboard = Dashboard::load(&path).unwrap();
    let selection = FilterSelection {
        channels: vec!["music".to_string()],
        ..Default::default()
    };
    let preview = dashboard.preview(&selection, 1).unwrap();
    assert_eq!(preview.height(), 1);
    assert_eq!(
        preview.column("channel").unwrap().str().unwrap().get(0),
        Some("music")
    );
}
