use crate::helpers::reader::FileSource;
use crate::ingest::ingest;
use crate::ingest::IngestOptions;
use crate::ingest::IngestResult;
use thiserror::Error;
use tracing::debug;
use tracing::warn;

/// Returned when an ingestion is requested while another one is pending.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("An ingestion is already in progress for '{pending}'")]
pub struct PipelineBusy {
    pub pending: String,
}

/// Stateful ingestion entry point with a busy flag.
///
/// Holds the latest [`IngestResult`]. An ingestion is split in three steps so the
/// parsing work can run outside the owner of the state:
/// [`begin`](Self::begin) marks the pipeline busy and clears the previous result,
/// [`PendingIngest::run`] does the work, and [`finish`](Self::finish) stores the
/// outcome and clears the busy flag.
#[derive(Debug, Default)]
pub struct IngestionPipeline {
    options: IngestOptions,
    result: IngestResult,
    pending: Option<String>,
}

/// An ingestion that has been started but not yet run.
#[derive(Debug)]
pub struct PendingIngest {
    source: FileSource,
    options: IngestOptions,
}

impl PendingIngest {
    /// Name of the file being ingested.
    pub fn file_name(&self) -> String {
        self.source.name()
    }

    /// Parses the file. Runs to completion; there is no cancellation.
    pub fn run(self) -> IngestResult {
        ingest(&self.source, &self.options)
    }
}

impl IngestionPipeline {
    pub fn new(options: IngestOptions) -> Self {
        IngestionPipeline {
            options,
            result: IngestResult::default(),
            pending: None,
        }
    }

    pub fn options(&self) -> &IngestOptions {
        &self.options
    }

    /// Returns true while an ingestion is pending.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the outcome of the latest finished ingestion.
    pub fn result(&self) -> &IngestResult {
        &self.result
    }

    /// Starts an ingestion.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineBusy`] if another ingestion has not finished yet. The
    /// pending ingestion and the current result are left untouched.
    pub fn begin(&mut self, source: FileSource) -> Result<PendingIngest, PipelineBusy> {
        if let Some(pending) = &self.pending {
            warn!(pending = %pending, requested = %source.name(), "ingestion rejected while busy");
            return Err(PipelineBusy {
                pending: pending.to_owned(),
            });
        }
        debug!(file = %source.name(), "ingestion started");
        self.pending = Some(source.name());
        self.result = IngestResult::default();
        Ok(PendingIngest {
            source,
            options: self.options.clone(),
        })
    }

    /// Stores the outcome of a pending ingestion and clears the busy flag.
    pub fn finish(&mut self, outcome: IngestResult) -> &IngestResult {
        self.pending = None;
        self.result = outcome;
        &self.result
    }

    /// Begins, runs and finishes an ingestion in one call.
    pub fn parse(&mut self, source: FileSource) -> Result<&IngestResult, PipelineBusy> {
        let pending = self.begin(source)?;
        let outcome = pending.run();
        Ok(self.finish(outcome))
    }

    /// Clears the current table and error.
    pub fn reset(&mut self) {
        self.result = IngestResult::default();
    }
}
