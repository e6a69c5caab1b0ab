use anyhow::{Context as _, Result, bail};
use clap::{Parser, Subcommand};
use logseal::audit::{AuditOptions, audit_file, reseal_file};
use logseal::integrity::Record;
use logseal::integrity::engine::{self, FieldSpan, Scheme};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "logseal", about = "Verify and reseal combat event log integrity codes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Verify every record in a log file
    Verify {
        /// Path to the log file
        file: PathBuf,

        /// Use the legacy (no sequence number) scheme
        #[arg(long)]
        legacy: bool,

        /// Hash only the first N content fields (legacy scheme only)
        #[arg(long, value_name = "N")]
        span: Option<usize>,

        /// Path to a JSON options file; --legacy/--span override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Recompute every record's integrity code (run after editing a file)
    Reseal {
        /// Path to the log file
        file: PathBuf,

        /// Output path. Defaults to the input with a ".resealed" suffix.
        #[arg(short, long, conflicts_with = "in_place")]
        output: Option<PathBuf>,

        /// Rewrite the input file in place
        #[arg(long)]
        in_place: bool,

        /// Use the legacy (no sequence number) scheme
        #[arg(long)]
        legacy: bool,

        /// Hash only the first N content fields (legacy scheme only)
        #[arg(long, value_name = "N")]
        span: Option<usize>,

        /// Path to a JSON options file; --legacy/--span override it
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Compute the integrity code for one record's content fields
    Seal {
        /// The content fields as a pipe-delimited line, without the code
        line: String,

        /// Sequence number of the record within its segment
        #[arg(long, required_unless_present = "legacy")]
        seq: Option<u64>,

        /// Use the legacy (no sequence number) scheme
        #[arg(long)]
        legacy: bool,

        /// Hash only the first N content fields (legacy scheme only)
        #[arg(long, value_name = "N")]
        span: Option<usize>,
    },
}

pub fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Verify {
            file,
            legacy,
            span,
            config,
            json,
        } => {
            let options = resolve_options(config.as_deref(), legacy, span)?;
            let report = audit_file(&file, options)
                .with_context(|| format!("Failed to verify {}", file.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.format_cli());
            }

            if !report.passed {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Reseal {
            file,
            output,
            in_place,
            legacy,
            span,
            config,
        } => {
            let options = resolve_options(config.as_deref(), legacy, span)?;
            let output = if in_place {
                file.clone()
            } else {
                output.unwrap_or_else(|| default_reseal_output(&file))
            };
            let summary = reseal_file(&file, &output, options)
                .with_context(|| format!("Failed to reseal {}", file.display()))?;
            println!("{}", summary.format_cli());
            Ok(())
        }
        Commands::Seal {
            line,
            seq,
            legacy,
            span,
        } => {
            let record = Record::parse(line.trim());
            let fields = record.fields();
            let code = if legacy {
                let span = span.map_or(FieldSpan::All, FieldSpan::First);
                engine::compute_legacy(fields, span)?
            } else {
                let Some(seq) = seq else {
                    bail!("--seq is required for the sequenced scheme");
                };
                engine::compute(fields, seq)
            };
            println!("{code}");
            Ok(())
        }
    }
}

fn resolve_options(
    config: Option<&std::path::Path>,
    legacy: bool,
    span: Option<usize>,
) -> Result<AuditOptions> {
    let mut options = match config {
        Some(path) => AuditOptions::from_json_file(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => AuditOptions::default(),
    };
    if legacy {
        options.scheme = Scheme::Legacy;
    }
    if let Some(n) = span {
        options.span = FieldSpan::First(n);
    }
    Ok(options)
}

fn default_reseal_output(input: &std::path::Path) -> PathBuf {
    let mut name = input.file_name().map_or_else(
        || std::ffi::OsString::from("resealed"),
        std::ffi::OsStr::to_os_string,
    );
    name.push(".resealed");
    input.with_file_name(name)
}
