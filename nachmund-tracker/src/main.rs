mod decode;
mod filters;
mod reports;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};

use decode::YamlCampaign;
use filters::{AllianceFilter, PhaseFilter, Selection};
use nachmund_campaign::CampaignTracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Colored tables for the terminal
    Console,
    /// Markdown tables
    Markdown,
    /// Machine-readable JSON
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "nachmund-tracker", version = "0.1.0")]
#[command(about = "Validate Nachmund campaign records and show phase results")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show BP and SAP totals per phase, alliance and location (default)
    Show(ShowArgs),
    /// Check every game record against the campaign rules
    Validate(ValidateArgs),
}

#[derive(Debug, clap::Args)]
struct ShowArgs {
    /// Path to the campaign YAML file
    #[arg(value_name = "CAMPAIGN_YAML")]
    campaign_yaml: PathBuf,

    /// Phase to show
    #[arg(short, long, value_enum, default_value_t = PhaseFilter::All)]
    phase: PhaseFilter,

    /// Alliance to show
    #[arg(short, long, value_enum, default_value_t = AllianceFilter::All)]
    alliance: AllianceFilter,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, clap::Args)]
struct ValidateArgs {
    /// Path to the campaign YAML file
    #[arg(value_name = "CAMPAIGN_YAML")]
    campaign_yaml: PathBuf,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

const VALIDATION_WARNING: &str =
    "Warning: validation errors present, run the validate command to see details";

/// Inserts `show` when the first argument is not a subcommand, so
/// `nachmund-tracker campaign.yaml` shows the results.
fn with_default_command<I, T>(raw: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut raw: Vec<OsString> = raw.into_iter().map(Into::into).collect();
    let explicit = match raw.get(1).map(|first| first.to_str()) {
        None => true,
        Some(None) => false,
        Some(Some(first)) => {
            matches!(first, "help" | "-h" | "--help" | "-V" | "--version")
                || Args::command().find_subcommand(first).is_some()
        }
    };
    if !explicit {
        raw.insert(1, OsString::from("show"));
    }
    raw
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse_from(with_default_command(std::env::args_os()));

    match &args.command {
        Command::Show(show) => run_show(show),
        Command::Validate(validate) => {
            if !run_validate(validate)? {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn tracker_for(path: &Path) -> CampaignTracker<YamlCampaign> {
    log::debug!("using campaign file {}", path.display());
    CampaignTracker::new(YamlCampaign::new(path))
}

fn run_show(args: &ShowArgs) -> Result<()> {
    let report = tracker_for(&args.campaign_yaml)
        .evaluate()
        .context("loading campaign")?;

    if !report.is_complete() {
        eprintln!("{}", VALIDATION_WARNING.yellow());
    }

    let selection = Selection::new(args.phase, args.alliance);
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Console => {
            reports::generate_console_report(&mut output_target, &report.results, &selection)?;
        }
        ReportFormat::Markdown => {
            reports::generate_markdown_report(&mut output_target, &report.results, &selection)?;
        }
        ReportFormat::Json => {
            reports::generate_json_report(&mut output_target, &report.results, &selection)?;
        }
    }
    output_target.flush()?;
    Ok(())
}

/// Returns whether the campaign file passed validation.
fn run_validate(args: &ValidateArgs) -> Result<bool> {
    let outcome = tracker_for(&args.campaign_yaml)
        .validate()
        .context("loading campaign")?;

    let mut output_target = OutputTarget::new(args.output.clone())?;
    reports::generate_validation_report(&mut output_target, &outcome)?;
    output_target.flush()?;
    Ok(outcome.is_clean())
}

/// Report destination: buffered stdout, or a file when `--output` is given.
enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::Stdout(BufWriter::new(stdout())));
        };
        let file =
            File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        Ok(Self::File(BufWriter::new(file)))
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Self::Stdout(out) => out.write(buf),
            Self::File(out) => out.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(out) => out.flush(),
            Self::File(out) => out.flush(),
        }
    }
}
