//! One-shot CLI front end for the audit report core.
//!
//! Reads one audit payload (saved file, or fetched from the audit backend
//! when built with the `fetch` feature), assembles the report, and writes it
//! to stdout. stdout is reserved for the rendered report; all log output
//! goes to stderr.

#[cfg(feature = "fetch")]
mod fetch;
mod render;

use clap::Parser;
use pa_common::request::{DEFAULT_END_DATE, DEFAULT_START_DATE};
use pa_common::{AuditPayload, AuditRequest, AuditResponse, Error, OutputFormat, Result};
use pa_report::{ReportAssembler, ReportConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// GA4 property audit report tool.
#[derive(Parser)]
#[command(name = "pa", version, about = "Run and render GA4 property audits")]
struct Cli {
    /// Numeric GA4 property ID (required unless --input is given)
    #[arg(long, env = "PA_PROPERTY_ID")]
    property_id: Option<String>,

    /// Start of the reporting window (relative token or YYYY-MM-DD)
    #[arg(long, default_value = DEFAULT_START_DATE)]
    start_date: String,

    /// End of the reporting window (relative token or YYYY-MM-DD)
    #[arg(long, default_value = DEFAULT_END_DATE)]
    end_date: String,

    /// Read a saved audit envelope or bare payload instead of fetching
    #[arg(long)]
    input: Option<PathBuf>,

    /// Audit backend endpoint
    #[cfg(feature = "fetch")]
    #[arg(long, default_value = fetch::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Custom report title
    #[arg(long)]
    title: Option<String>,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve the payload for this run: saved file first, then live fetch.
fn load_payload(cli: &Cli) -> Result<Option<AuditPayload>> {
    if let Some(path) = &cli.input {
        let text = std::fs::read_to_string(path)?;
        // Envelope first; a bare payload has no `success` field.
        if let Ok(envelope) = serde_json::from_str::<AuditResponse>(&text) {
            return envelope.into_payload();
        }
        return Ok(Some(AuditPayload::from_json(&text)?));
    }

    let property_id = cli.property_id.clone().ok_or_else(|| {
        Error::InvalidRequest("--property-id is required without --input".into())
    })?;
    let request = AuditRequest::new(property_id)
        .with_dates(cli.start_date.clone(), cli.end_date.clone());
    request.validate()?;

    #[cfg(feature = "fetch")]
    {
        fetch::fetch_audit(&cli.endpoint, &request)?.into_payload()
    }
    #[cfg(not(feature = "fetch"))]
    {
        let _ = request;
        Err(Error::Backend(
            "built without the 'fetch' feature — provide --input".into(),
        ))
    }
}

fn run(cli: &Cli) -> Result<String> {
    let payload = load_payload(cli)?;
    let mut config = ReportConfig::default();
    if let Some(title) = &cli.title {
        config = config.with_title(title);
    }
    let report = ReportAssembler::new(config).assemble(payload.as_ref());
    render::render(&report, cli.format)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("✗ {err}");
            ExitCode::FAILURE
        }
    }
}
