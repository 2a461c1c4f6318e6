//! # Chartify
//!
//! Turns an uploaded CSV or Excel file into a table and reshapes that table into
//! the data each chart kind is drawn from.
//!
//! ## Features
//!
//! - **Multi-format ingestion**: `.csv`, `.xlsx` and `.xls` files, detected from
//!   the file name before any byte is read
//! - **Diagnostic errors**: every failure is reported as one human-readable
//!   message and never mixed with partial data
//! - **Permissive numeric coercion**: malformed or missing values read as `0`
//! - **Eleven chart kinds**: bar, line, pie, scatter, area, donut, radar, funnel,
//!   treemap, composed and radial bar
//! - **Chart recommendation**: a chart kind suggested from the column names
//! - **Export**: versioned JSON configuration, plus PNG and PDF through a
//!   caller-supplied renderer
//! - **Theme preference**: dark mode flag persisted in a JSON preference file
//!
//! ## Example
//!
//! ```
//! use chartify::{transform, ChartKind, ChartRequest, FileSource, IngestOptions};
//!
//! let source = FileSource::memory("sales.csv", "month,sales\nJan,10\nFeb,bad\n");
//! let table = chartify::load_table(&source, &IngestOptions::default()).unwrap();
//! let dataset = transform(&table, &ChartRequest::new(ChartKind::Bar, "month", "sales"));
//! assert_eq!(dataset.len(), 2);
//! ```
pub mod chart;
pub mod error;
pub mod export;
pub mod helpers;
pub mod ingest;
pub mod preferences;
pub mod spreadsheet;
pub mod state;
pub mod table;

pub use chart::recommend_chart_kind;
pub use chart::transform;
pub use chart::ChartDataset;
pub use chart::ChartKind;
pub use chart::ChartRequest;
pub use error::ChartifyError;
pub use error::ResultMessage;
pub use export::ExportFormat;
pub use export::ExportPayload;
pub use export::Exporter;
pub use helpers::reader::FileSource;
pub use ingest::ingest;
pub use ingest::load_table;
pub use ingest::IngestError;
pub use ingest::IngestOptions;
pub use ingest::IngestResult;
pub use ingest::IngestionPipeline;
pub use spreadsheet::CellValue;
pub use state::AppState;
pub use table::Record;
pub use table::Table;
