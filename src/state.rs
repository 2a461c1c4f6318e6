//! Application state owned by the composition root.
//!
//! [`AppState`] holds the ingestion pipeline, the chart configuration and the
//! theme flag. It is the only writer of the table; every change goes through a
//! named transition.
use crate::chart::transform;
use crate::chart::ChartDataset;
use crate::chart::ChartKind;
use crate::chart::ChartRequest;
use crate::error::ChartifyError;
use crate::error::ResultMessage;
use crate::export::ExportFormat;
use crate::export::ExportPayload;
use crate::export::Exporter;
use crate::helpers::reader::FileSource;
use crate::ingest::IngestOptions;
use crate::ingest::IngestResult;
use crate::ingest::IngestionPipeline;
use crate::ingest::PendingIngest;
use crate::ingest::PipelineBusy;
use crate::table::Table;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;

/// Axis of the chart configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Default)]
pub struct AppState {
    pipeline: IngestionPipeline,
    chart_kind: ChartKind,
    x_field: Option<String>,
    y_field: Option<String>,
    dark_mode: bool,
}

impl AppState {
    pub fn new(options: IngestOptions, dark_mode: bool) -> Self {
        AppState {
            pipeline: IngestionPipeline::new(options),
            dark_mode,
            ..Default::default()
        }
    }

    pub fn pipeline(&self) -> &IngestionPipeline {
        &self.pipeline
    }

    /// Latest ingestion outcome.
    pub fn result(&self) -> &IngestResult {
        self.pipeline.result()
    }

    pub fn table(&self) -> &Table {
        self.pipeline.result().table()
    }

    pub fn is_busy(&self) -> bool {
        self.pipeline.is_busy()
    }

    pub fn chart_kind(&self) -> ChartKind {
        self.chart_kind
    }

    pub fn x_field(&self) -> Option<&str> {
        self.x_field.as_deref()
    }

    pub fn y_field(&self) -> Option<&str> {
        self.y_field.as_deref()
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Starts ingesting a file; see [`IngestionPipeline::begin`].
    pub fn begin_ingest(&mut self, source: FileSource) -> Result<PendingIngest, PipelineBusy> {
        self.pipeline.begin(source)
    }

    /// Stores the outcome of a pending ingestion.
    ///
    /// On success the axes default to the first column (x) and the second column
    /// (y), or the first column again for single-column tables. On failure the
    /// axes are left as they were.
    pub fn complete_ingest(&mut self, outcome: IngestResult) -> &IngestResult {
        if outcome.is_success() {
            self.ingest_succeeded(outcome.columns());
        } else {
            self.ingest_failed(&outcome);
        }
        self.pipeline.finish(outcome)
    }

    /// Begins, runs and completes an ingestion in one call.
    pub fn ingest(&mut self, source: FileSource) -> Result<&IngestResult, PipelineBusy> {
        let pending = self.begin_ingest(source)?;
        let outcome = pending.run();
        Ok(self.complete_ingest(outcome))
    }

    /// Ingests a file and returns the new table.
    ///
    /// # Errors
    ///
    /// A busy pipeline or a failed ingestion, prefixed with the file name.
    pub fn load(&mut self, source: FileSource) -> Result<&Table, ChartifyError> {
        let prefix = format!("Failed to ingest '{}'", source.name());
        let result = self
            .ingest(source)
            .map_err(ChartifyError::from)
            .with_prefix(&prefix)?;
        if let Some(error) = result.error() {
            return Err(ChartifyError::from(error.clone())).with_prefix(&prefix);
        }
        Ok(self.table())
    }

    fn ingest_succeeded(&mut self, columns: &[String]) {
        self.x_field = columns.first().cloned();
        self.y_field = columns.get(1).or_else(|| columns.first()).cloned();
        debug!(x = ?self.x_field, y = ?self.y_field, "selected default axes");
    }

    fn ingest_failed(&mut self, outcome: &IngestResult) {
        debug!(error = ?outcome.error_message(), "ingestion failed, keeping chart configuration");
    }

    /// Clears the table and restores the default chart configuration.
    pub fn reset(&mut self) {
        self.pipeline.reset();
        self.chart_kind = ChartKind::default();
        self.x_field = None;
        self.y_field = None;
    }

    /// Selects the column mapped to an axis.
    ///
    /// The name is not checked against the table columns.
    pub fn set_axis<S: Into<String>>(&mut self, axis: Axis, column: S) {
        let column = Some(column.into());
        match axis {
            Axis::X => self.x_field = column,
            Axis::Y => self.y_field = column,
        }
    }

    /// Handles an axis selection event coming from a named control (`xField` or `yField`).
    ///
    /// Returns false when the control name is not an axis.
    pub fn axis_changed(&mut self, control: &str, column: &str) -> bool {
        let axis = match control {
            "xField" => Axis::X,
            "yField" => Axis::Y,
            _ => return false,
        };
        self.set_axis(axis, column);
        true
    }

    pub fn set_chart_kind(&mut self, chart_kind: ChartKind) {
        self.chart_kind = chart_kind;
    }

    /// Flips the theme and returns the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    /// Current chart request, available once both axes are selected.
    pub fn chart_request(&self) -> Option<ChartRequest> {
        match (&self.x_field, &self.y_field) {
            (Some(x), Some(y)) => Some(ChartRequest::new(self.chart_kind, x.as_str(), y.as_str())),
            _ => None,
        }
    }

    /// Chart data for the current table and configuration.
    pub fn dataset(&self) -> Option<ChartDataset> {
        if !self.result().is_success() {
            return None;
        }
        self.chart_request().map(|request| transform(self.table(), &request))
    }

    /// Chart configuration for a JSON export.
    pub fn export_payload(&self) -> Option<ExportPayload> {
        if !self.result().is_success() {
            return None;
        }
        self.chart_request()
            .map(|request| ExportPayload::new(self.table(), &request))
    }

    /// Exports the current chart and saves the artifact into `dir`.
    ///
    /// # Arguments
    /// * `exporter` - Exporter, with a renderer for `png` and `pdf`
    /// * `format` - Requested export format
    /// * `dir` - Output directory, created when missing
    ///
    /// # Returns
    /// * `Result<PathBuf, ChartifyError>` - Path of the saved artifact
    pub fn export_to(&self, exporter: &Exporter, format: ExportFormat, dir: &Path) -> Result<PathBuf, ChartifyError> {
        let payload = self.export_payload();
        let artifact = exporter.export(format, payload.as_ref())?;
        artifact
            .save(dir)
            .map_err(ChartifyError::from)
            .with_prefix(&format!("Failed to write '{}'", artifact.file_name))
    }
}
