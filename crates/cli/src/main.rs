// pinmatch CLI - headless Statement/Settlement reconciliation

mod exit_codes;
mod export;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use pinmatch_recon::{get_classified, run, Classification, ReconResult};

use exit_codes::{EXIT_ERROR, EXIT_IMPORT, EXIT_MALFORMED, EXIT_SUCCESS, EXIT_UNMATCHED, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "pinmatch")]
#[command(about = "Reconcile partner Statement and Settlement exports by 9-digit PIN")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full reconciliation pipeline
    #[command(after_help = "\
Examples:
  pinmatch run statement.xlsx settlement.xlsx
  pinmatch run statement.xlsx settlement.csv --json
  pinmatch run statement.xlsx settlement.xlsx --statement-out stmt.csv --settlement-out sett.csv
  pinmatch run statement.xlsx settlement.xlsx --check")]
    Run {
        /// Partner Statement export (xlsx, xls, xlsb, ods, csv, tsv)
        statement: PathBuf,

        /// Settlement export
        settlement: PathBuf,

        /// Output the full result as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Write the annotated Statement table as CSV
        #[arg(long)]
        statement_out: Option<PathBuf>,

        /// Write the annotated Settlement table as CSV
        #[arg(long)]
        settlement_out: Option<PathBuf>,

        /// Exit nonzero when unmatched pins remain
        #[arg(long)]
        check: bool,
    },

    /// Run the pipeline, then keep only rows in the requested classes
    #[command(after_help = "\
Examples:
  pinmatch classified statement.xlsx settlement.xlsx
  pinmatch classified statement.xlsx settlement.xlsx --classes 6,7
  pinmatch classified statement.xlsx settlement.xlsx --classes 5 --json")]
    Classified {
        /// Partner Statement export
        statement: PathBuf,

        /// Settlement export
        settlement: PathBuf,

        /// Comma-separated classification codes (5 matched, 6 settlement-only, 7 statement-only)
        #[arg(long, default_value = "5,6,7")]
        classes: String,

        /// Output the filtered tables as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Write the filtered Statement rows as CSV
        #[arg(long)]
        statement_out: Option<PathBuf>,

        /// Write the filtered Settlement rows as CSV
        #[arg(long)]
        settlement_out: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            statement,
            settlement,
            json,
            statement_out,
            settlement_out,
            check,
        } => cmd_run(statement, settlement, json, statement_out, settlement_out, check),
        Commands::Classified {
            statement,
            settlement,
            classes,
            json,
            statement_out,
            settlement_out,
        } => cmd_classified(statement, settlement, &classes, json, statement_out, settlement_out),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn import(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IMPORT, message: msg.into(), hint: None }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self { code: EXIT_MALFORMED, message: msg.into(), hint: None }
    }
}

// ============================================================================
// run
// ============================================================================

fn cmd_run(
    statement: PathBuf,
    settlement: PathBuf,
    json: bool,
    statement_out: Option<PathBuf>,
    settlement_out: Option<PathBuf>,
    check: bool,
) -> Result<(), CliError> {
    let result = load_and_run(&statement, &settlement)?;

    write_outputs(&result, statement_out.as_deref(), settlement_out.as_deref())?;

    if json {
        let json_str = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    print_summary(&result);

    let s = &result.summary;
    if check && (s.statement_only_pins > 0 || s.settlement_only_pins > 0) {
        return Err(CliError {
            code: EXIT_UNMATCHED,
            message: format!(
                "{} statement-only and {} settlement-only pin(s) remain",
                s.statement_only_pins, s.settlement_only_pins
            ),
            hint: None,
        });
    }

    Ok(())
}

// ============================================================================
// classified
// ============================================================================

fn cmd_classified(
    statement: PathBuf,
    settlement: PathBuf,
    classes: &str,
    json: bool,
    statement_out: Option<PathBuf>,
    settlement_out: Option<PathBuf>,
) -> Result<(), CliError> {
    let classes = parse_classes(classes)?;
    let result = load_and_run(&statement, &settlement)?;
    let (stmt, sett) = get_classified(&result.statement, &result.settlement, &classes);

    if let Some(path) = statement_out.as_deref() {
        export::write_statement_csv(&stmt, path).map_err(CliError::import)?;
        eprintln!("wrote {}", path.display());
    }
    if let Some(path) = settlement_out.as_deref() {
        export::write_settlement_csv(&sett, path).map_err(CliError::import)?;
        eprintln!("wrote {}", path.display());
    }

    if json {
        let out = serde_json::json!({
            "classes": classes.iter().map(|c| c.code()).collect::<Vec<u8>>(),
            "statement": stmt,
            "settlement": sett,
        });
        let json_str = serde_json::to_string_pretty(&out)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    eprintln!(
        "classified: {} statement row(s), {} settlement row(s) in class(es) {}",
        stmt.rows.len(),
        sett.rows.len(),
        classes
            .iter()
            .map(|c| c.code().to_string())
            .collect::<Vec<_>>()
            .join(","),
    );

    Ok(())
}

/// Parse a `--classes` list like `"5,6,7"` into classification codes.
fn parse_classes(input: &str) -> Result<Vec<Classification>, CliError> {
    let mut classes = Vec::new();
    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let code: u8 = part
            .parse()
            .map_err(|_| CliError::usage(format!("invalid classification code: '{part}'")))?;
        let class = Classification::from_code(code).ok_or_else(|| {
            CliError::usage(format!("unknown classification code: {code} (expected 5, 6, or 7)"))
        })?;
        if !classes.contains(&class) {
            classes.push(class);
        }
    }
    if classes.is_empty() {
        return Err(CliError::usage("--classes lists no valid codes"));
    }
    Ok(classes)
}

// ============================================================================
// shared plumbing
// ============================================================================

fn load_and_run(statement: &Path, settlement: &Path) -> Result<ReconResult, CliError> {
    let stmt = pinmatch_io::import_table(statement)
        .map_err(|e| CliError::import(format!("cannot import {}: {e}", statement.display())))?;
    let sett = pinmatch_io::import_table(settlement)
        .map_err(|e| CliError::import(format!("cannot import {}: {e}", settlement.display())))?;

    run(&stmt, &sett).map_err(|e| CliError::malformed(e.to_string()))
}

fn write_outputs(
    result: &ReconResult,
    statement_out: Option<&Path>,
    settlement_out: Option<&Path>,
) -> Result<(), CliError> {
    if let Some(path) = statement_out {
        export::write_statement_csv(&result.statement, path).map_err(CliError::import)?;
        eprintln!("wrote {}", path.display());
    }
    if let Some(path) = settlement_out {
        export::write_settlement_csv(&result.settlement, path).map_err(CliError::import)?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn print_summary(result: &ReconResult) {
    let s = &result.summary;
    eprintln!(
        "recon: {} statement row(s), {} settlement row(s) — {} matched pin(s), {} statement-only, {} settlement-only",
        s.statement_rows,
        s.settlement_rows,
        s.matched_pins,
        s.statement_only_pins,
        s.settlement_only_pins,
    );
    eprintln!(
        "       {} excluded statement row(s), {} + {} unclassified, net variance {:.2}",
        s.excluded_statement_rows,
        s.unclassified_statement_rows,
        s.unclassified_settlement_rows,
        s.net_variance,
    );
}
