//! # Chart Export
//!
//! Produces downloadable artifacts for the current chart:
//!
//! - `json`: the chart configuration wrapped in a versioned envelope
//! - `png` and `pdf`: delegated to a [`Rasterizer`] supplied by the caller
//!
//! A failed export is reported as an [`ExportError`] and never touches the
//! table or chart configuration, so it can simply be retried.
use crate::chart::ChartKind;
use crate::chart::ChartRequest;
use crate::table::Record;
use crate::table::Table;
use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::fmt::Display;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;
use tracing::warn;

/// Version written in every JSON export envelope.
pub const EXPORT_VERSION: &str = "1.0.0";

#[derive(Error, Debug)]
pub enum ExportError {
    /// No renderer is attached, so there is no chart to capture
    #[error("No chart found to export")]
    NoChart,

    #[error("Failed to export chart as {}: {cause}", .format.label())]
    Render { format: ExportFormat, cause: anyhow::Error },

    #[error("No chart configuration to export")]
    MissingPayload,

    #[error("Failed to serialize chart configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Supported export formats.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Pdf,
    Json,
}

impl ExportFormat {
    /// Parses a format tag (case-insensitive).
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "pdf" => Some(Self::Pdf),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pdf => "pdf",
            Self::Json => "json",
        }
    }

    pub const fn media_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Pdf => "application/pdf",
            Self::Json => "application/json",
        }
    }

    const fn label(&self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Pdf => "PDF",
            Self::Json => "JSON",
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Chart configuration saved by a JSON export.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub chart_kind: ChartKind,
    pub x_field: String,
    pub y_field: String,
    pub rows: Vec<Record>,
    pub columns: Vec<String>,
}

impl ExportPayload {
    /// Captures the table and the chart request into a payload.
    pub fn new(table: &Table, request: &ChartRequest) -> Self {
        ExportPayload {
            chart_kind: request.chart_kind,
            x_field: request.x_field.to_owned(),
            y_field: request.y_field.to_owned(),
            rows: table.rows().to_vec(),
            columns: table.columns().to_vec(),
        }
    }
}

#[derive(Serialize)]
struct ExportEnvelope<'a> {
    timestamp: String,
    data: &'a ExportPayload,
    version: &'static str,
}

/// A produced export, ready to be saved or handed to a download surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Writes the artifact into `dir` under its file name.
    pub fn save(&self, dir: &Path) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Captures the rendered chart as an image or document.
pub trait Rasterizer {
    /// Renders the current chart in the requested format (`png` or `pdf`).
    fn rasterize(&self, format: ExportFormat) -> anyhow::Result<Vec<u8>>;
}

/// Export entry point.
#[derive(Default)]
pub struct Exporter {
    rasterizer: Option<Box<dyn Rasterizer>>,
}

impl fmt::Debug for Exporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exporter")
            .field("rasterizer", &self.rasterizer.is_some())
            .finish()
    }
}

impl Exporter {
    /// Creates an exporter that can only produce JSON.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an exporter that renders images through `rasterizer`.
    pub fn with_rasterizer<R: Rasterizer + 'static>(rasterizer: R) -> Self {
        Exporter {
            rasterizer: Some(Box::new(rasterizer)),
        }
    }

    /// Exports the chart at the current time.
    ///
    /// # Arguments
    /// * `format` - Requested export format
    /// * `payload` - Chart configuration, required for `json`
    ///
    /// # Returns
    /// * `Result<ExportArtifact, ExportError>` - The artifact or the reason it could not be produced
    pub fn export(&self, format: ExportFormat, payload: Option<&ExportPayload>) -> Result<ExportArtifact, ExportError> {
        self.export_at(format, payload, Utc::now())
    }

    /// Exports the chart, stamping the artifact with `now`.
    pub fn export_at(
        &self,
        format: ExportFormat,
        payload: Option<&ExportPayload>,
        now: DateTime<Utc>,
    ) -> Result<ExportArtifact, ExportError> {
        let result = match format {
            ExportFormat::Json => json_artifact(payload, now),
            ExportFormat::Png | ExportFormat::Pdf => self.raster_artifact(format, now),
        };
        match &result {
            Ok(artifact) => info!(file = %artifact.file_name, size = artifact.bytes.len(), "exported chart"),
            Err(error) => warn!(%format, %error, "chart export failed"),
        }
        result
    }

    fn raster_artifact(&self, format: ExportFormat, now: DateTime<Utc>) -> Result<ExportArtifact, ExportError> {
        let rasterizer = self.rasterizer.as_ref().ok_or(ExportError::NoChart)?;
        let bytes = rasterizer
            .rasterize(format)
            .map_err(|cause| ExportError::Render { format, cause })?;
        Ok(ExportArtifact {
            file_name: format!("chart-{}.{}", now.timestamp_millis(), format.extension()),
            media_type: format.media_type(),
            bytes,
        })
    }
}

fn json_artifact(payload: Option<&ExportPayload>, now: DateTime<Utc>) -> Result<ExportArtifact, ExportError> {
    let payload = payload.ok_or(ExportError::MissingPayload)?;
    let envelope = ExportEnvelope {
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        data: payload,
        version: EXPORT_VERSION,
    };
    Ok(ExportArtifact {
        file_name: format!("chart-config-{}.json", now.timestamp_millis()),
        media_type: ExportFormat::Json.media_type(),
        bytes: serde_json::to_vec_pretty(&envelope)?,
    })
}
