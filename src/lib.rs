pub mod dashboard;
pub mod error;
pub mod filter;
pub mod format;
pub mod kpi;
pub mod loader;
pub mod schema;
pub mod slicer;

pub use dashboard::{Dashboard, DashboardView, KpiCard};
pub use error::{KpiError, Result};
pub use filter::FilterSelection;
pub use kpi::KpiSummary;
pub use slicer::SlicerOptions;
