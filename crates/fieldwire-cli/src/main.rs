use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fieldwire_core::{DecodeReport, make_stub_report};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod input;
mod layouts;

use layouts::Layout;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("FIELDWIRE_BUILD_COMMIT"),
    ", built ",
    env!("FIELDWIRE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "fieldwire")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decode binary packets with declarative field layouts into JSON reports.",
    long_about = None,
    after_help = "Examples:\n  fieldwire decode roster packet.bin -o report.json\n  fieldwire decode records --hex \"02 de ad 01 01 01 02\" --stdout\n  fieldwire layouts"
)]
struct Cli {
    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode one input with a built-in layout and write a JSON report.
    #[command(
        after_help = "Examples:\n  fieldwire decode roster packet.bin -o report.json\n  fieldwire decode roster 'dumps/*.bin' --stdout --pretty\n  fieldwire decode records --hex 0x0161 --length 2 --stdout"
    )]
    Decode(DecodeArgs),
    /// List the built-in layouts.
    Layouts,
}

#[derive(clap::Args, Debug)]
struct DecodeArgs {
    /// Layout used to decode the input
    #[arg(value_enum)]
    layout: Layout,

    /// Path to a binary file (glob patterns must match exactly one file),
    /// or a hex string with --hex
    input: String,

    /// Treat INPUT as inline hex bytes instead of a path
    #[arg(long)]
    hex: bool,

    /// Decode only the first N bytes of the input
    #[arg(long, value_name = "N")]
    length: Option<usize>,

    /// Output report path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    report: Option<PathBuf>,

    /// Write JSON report to stdout
    #[arg(long, conflicts_with = "report")]
    stdout: bool,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,

    /// Exit with a non-zero code if the decode did not succeed
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode(args),
        Commands::Layouts => {
            cmd_layouts();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug)]
pub(crate) struct CliError {
    pub(crate) message: String,
    pub(crate) hint: Option<String>,
}

impl CliError {
    pub(crate) fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_layouts() {
    for layout in Layout::ALL {
        println!("{:<8} {}", layout.name(), layout.description());
    }
}

fn cmd_decode(args: DecodeArgs) -> Result<(), CliError> {
    if args.pretty && args.compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }

    let (input_label, bytes) = load_input(&args)?;
    let report_path = if args.stdout {
        None
    } else {
        Some(args.report.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    if let (Some(report_path), false) = (report_path.as_ref(), args.hex) {
        ensure_distinct_paths(Path::new(&input_label), report_path)?;
    }

    let length = args.length.unwrap_or(bytes.len());
    info!(layout = args.layout.name(), bytes = bytes.len(), length, "decoding input");
    let stub = make_stub_report(
        args.layout.name(),
        &input_label,
        bytes.len() as u64,
        length as u64,
    );
    let rep = args
        .layout
        .decode(&bytes, length, stub)
        .context("report construction failed")?;
    debug!(status = %rep.status, "decode finished");
    let json = serialize_report(&rep, args.pretty)?;

    match report_path {
        None => {
            print!("{json}");
        }
        Some(report) => {
            if let Some(parent) = report.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&report, json)
                .with_context(|| format!("Failed to write report: {}", report.display()))?;
            if !args.quiet {
                eprintln!("OK: report written -> {}", report.display());
            }
        }
    }

    if args.strict && rep.status.is_error() {
        return Err(CliError::new(
            format!(
                "decode failed with {}: {}",
                rep.status,
                rep.error.as_deref().unwrap_or("no details")
            ),
            Some("inspect the report, or drop --strict to accept partial decodes".to_string()),
        ));
    }
    Ok(())
}

fn load_input(args: &DecodeArgs) -> Result<(String, Vec<u8>), CliError> {
    if args.hex {
        return Ok(("-".to_string(), input::parse_hex(&args.input)?));
    }
    let resolved = input::resolve_input_path(Path::new(&args.input))?;
    input::validate_input_file(&resolved)?;
    let bytes = fs::read(&resolved)
        .with_context(|| format!("Failed to read input file: {}", resolved.display()))?;
    Ok((resolved.display().to_string(), bytes))
}

fn ensure_distinct_paths(input: &Path, report: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let report_dir = match report.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::canonicalize(parent),
        _ => fs::canonicalize("."),
    };
    // A missing output directory is created later and cannot hold the input.
    let Ok(report_dir) = report_dir else {
        return Ok(());
    };
    let file_name = report
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path"))?;
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("report path must differ from input: {}", report.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn serialize_report(rep: &DecodeReport, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(rep)
    } else {
        serde_json::to_string(rep)
    };
    json.context("JSON serialization failed").map_err(Into::into)
}
