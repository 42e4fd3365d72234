//! Functionality related to the `dqa audit` command itself.

use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use num_format::Locale;
use num_format::ToFormattedString;
use prettytable::row;
use prettytable::Table;
use tracing::debug;
use tracing::info;

use crate::audit::audit_analysis;
use crate::audit::audit_experiment;
use crate::audit::Finding;
use crate::model::Analysis;
use crate::model::Experiment;

//========================//
// Command line arguments //
//========================//

/// Clap arguments for the `dqa audit` subcommand.
#[derive(Args)]
pub struct AuditArgs {
    /// Source entity JSON: one fully-embedded experiment or analysis record,
    /// as materialized by the metadata repository.
    #[arg(value_name = "ENTITY_JSON")]
    src: PathBuf,

    /// Print findings as JSON on stdout instead of a table.
    #[arg(long)]
    json: bool,

    /// Directory to write the findings file to. No findings file is written
    /// unless a directory or prefix is given.
    #[arg(short = 'o', long, value_name = "PATH")]
    output_directory: Option<PathBuf>,

    /// Output prefix for the findings file. Defaults to the name of the
    /// source file.
    #[arg(short = 'p', long, value_name = "STRING")]
    output_prefix: Option<String>,
}

//==============//
// Main command //
//==============//

/// Main method for the `dqa audit` subcommand.
pub fn audit(args: AuditArgs) -> anyhow::Result<()> {
    info!("Starting audit command...");
    debug!("Arguments:");

    let src = args.src;
    debug!("  [*] Source: {}", src.display());

    let output_prefix = args.output_prefix.clone().unwrap_or_else(|| {
        src.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("entity"))
    });
    debug!("  [*] Output prefix: {}", output_prefix);

    let contents = fs::read_to_string(&src)
        .with_context(|| format!("reading entity from {}", src.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&contents).with_context(|| "parsing entity JSON")?;

    // The `@type` list discriminates the two auditable entities.
    let is_analysis = value
        .get("@type")
        .and_then(|kind| kind.as_array())
        .map(|kinds| kinds.iter().any(|k| k.as_str() == Some("Analysis")))
        .unwrap_or(false);

    let findings = if is_analysis {
        let analysis: Analysis =
            serde_json::from_value(value).with_context(|| "deserializing analysis")?;
        info!("Auditing analysis {}.", analysis.accession);
        audit_analysis(&analysis)
    } else {
        let experiment: Experiment =
            serde_json::from_value(value).with_context(|| "deserializing experiment")?;
        info!("Auditing experiment {}.", experiment.accession);
        audit_experiment(&experiment)
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
    } else {
        print_findings(&findings);
    }

    info!(
        "Audit complete: {} finding(s).",
        findings.len().to_formatted_string(&Locale::en)
    );

    if args.output_directory.is_some() || args.output_prefix.is_some() {
        let output_directory = match args.output_directory {
            Some(p) => p,
            None => std::env::current_dir()?,
        };
        write_findings(&findings, output_prefix, output_directory)?;
    }

    Ok(())
}

fn print_findings(findings: &[Finding]) {
    if findings.is_empty() {
        println!("No findings.");
        return;
    }

    let mut table = Table::new();
    table.add_row(row!["Level", "Category", "Detail"]);
    for finding in findings {
        table.add_row(row![finding.level, finding.category, finding.detail]);
    }
    table.printstd();
}

/// Writes the findings to `<prefix>.audit.json` within the given directory.
fn write_findings(
    findings: &[Finding],
    output_prefix: String,
    directory: PathBuf,
) -> anyhow::Result<()> {
    if !directory.exists() {
        std::fs::create_dir_all(&directory).with_context(|| "creating output directory")?;
    }

    let filename = output_prefix + ".audit.json";
    let mut filepath = directory;
    filepath.push(&filename);

    let mut file = File::create(&filepath)
        .with_context(|| format!("creating {}", filepath.display()))?;
    let output = serde_json::to_string_pretty(findings)?;
    file.write_all(output.as_bytes())?;

    info!("Wrote findings to {}.", filepath.display());
    Ok(())
}
