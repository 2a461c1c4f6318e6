//! Command-line front end: ingests one file, builds the chart data and prints it
//! as JSON on stdout.
//!
//! ```sh
//! chartify sales.xlsx --chart pie -x region -y revenue
//! chartify sales.csv --preview
//! chartify sales.csv --export json --out-dir exports/
//! ```
//!
//! Logs go to stderr and are filtered with `RUST_LOG` (default `info`).
use anyhow::Context;
use anyhow::Result;
use chartify::chart::recommend_chart_kind;
use chartify::chart::ChartDataset;
use chartify::chart::ChartKind;
use chartify::chart::ChartRequest;
use chartify::export::ExportFormat;
use chartify::export::Exporter;
use chartify::helpers::reader::FileSource;
use chartify::ingest::IngestOptions;
use chartify::preferences::JsonFilePreferenceStore;
use chartify::preferences::ThemePreference;
use chartify::state::AppState;
use chartify::state::Axis;
use chartify::table::Preview;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Turn a CSV or Excel file into chart-ready data
#[derive(Parser, Debug)]
#[command(name = "chartify", version, about)]
struct Args {
    /// Input file (.csv, .xlsx or .xls)
    #[arg(value_name = "FILE", env = "CHARTIFY_FILE")]
    file: PathBuf,

    /// Chart kind; defaults to a kind recommended from the column names
    #[arg(short, long, env = "CHARTIFY_CHART")]
    chart: Option<ChartKind>,

    /// Column used as category / label
    #[arg(short = 'x', long = "x-field", env = "CHARTIFY_X_FIELD")]
    x_field: Option<String>,

    /// Column used as the numeric value
    #[arg(short = 'y', long = "y-field", env = "CHARTIFY_Y_FIELD")]
    y_field: Option<String>,

    /// Export the chart (png, pdf or json)
    #[arg(short, long, value_parser = parse_export_format, env = "CHARTIFY_EXPORT")]
    export: Option<ExportFormat>,

    /// Directory receiving exported files
    #[arg(long, default_value = ".", env = "CHARTIFY_OUT_DIR")]
    out_dir: PathBuf,

    /// Print the table preview instead of the chart data
    #[arg(long, env = "CHARTIFY_PREVIEW")]
    preview: bool,

    /// Rows shown by the preview
    #[arg(long, default_value_t = 10, env = "CHARTIFY_PREVIEW_ROWS")]
    preview_rows: usize,

    /// Advisory file size limit in MiB
    #[arg(long, default_value_t = 10, env = "CHARTIFY_MAX_FILE_MB")]
    max_file_mb: u64,

    /// Preference file; defaults to the user configuration directory
    #[arg(long, env = "CHARTIFY_PREFERENCES")]
    preferences: Option<PathBuf>,

    /// Switch to the dark theme and remember it
    #[arg(long, conflicts_with = "light")]
    dark: bool,

    /// Switch to the light theme and remember it
    #[arg(long)]
    light: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartReport<'a> {
    file: String,
    recommended: ChartKind,
    request: ChartRequest,
    dataset: ChartDataset,
    preview: Preview<'a>,
    dark_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    exported: Option<PathBuf>,
}

fn parse_export_format(tag: &str) -> Result<ExportFormat, String> {
    ExportFormat::parse(tag).ok_or_else(|| format!("unsupported export format '{}'", tag))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let dark_mode = resolve_theme(&args)?;
    let options = IngestOptions::new()
        .with_max_file_bytes(args.max_file_mb.saturating_mul(1024 * 1024))
        .with_preview_rows(args.preview_rows);
    let mut state = AppState::new(options, dark_mode);

    let source = FileSource::local(&args.file);
    let file = source.name();
    state.load(source)?;

    if args.preview {
        let preview = state.table().preview(args.preview_rows);
        println!("{}", serde_json::to_string_pretty(&preview)?);
        return Ok(());
    }

    let recommended = recommend_chart_kind(state.table().columns());
    state.set_chart_kind(args.chart.unwrap_or(recommended));
    if let Some(x_field) = &args.x_field {
        state.set_axis(Axis::X, x_field.as_str());
    }
    if let Some(y_field) = &args.y_field {
        state.set_axis(Axis::Y, y_field.as_str());
    }

    let request = state.chart_request().context("No axis selected for the chart")?;
    let dataset = state.dataset().context("No chart data available")?;
    let exported = match args.export {
        Some(format) => {
            let path = state.export_to(&Exporter::new(), format, &args.out_dir)?;
            info!(path = %path.display(), "saved export");
            Some(path)
        }
        None => None,
    };

    let report = ChartReport {
        file,
        recommended,
        request,
        dataset,
        preview: state.table().preview(args.preview_rows),
        dark_mode: state.dark_mode(),
        exported,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Applies `--dark` / `--light` and returns the resolved theme.
fn resolve_theme(args: &Args) -> Result<bool> {
    let Some(path) = args.preferences.clone().or_else(JsonFilePreferenceStore::default_path) else {
        return Ok(args.dark);
    };
    let mut theme = ThemePreference::new(JsonFilePreferenceStore::new(path));

    if args.dark || args.light {
        theme.save(args.dark).context("Failed to save the theme preference")?;
    }
    Ok(theme.resolve(None))
}
