//! Functionality related to the `dqa list` command itself.

use anyhow::bail;
use clap::builder::PossibleValuesParser;
use clap::Args;

use prettytable::row;
use prettytable::Table;

use crate::audit::analysis::ANALYSIS_CHECKS;
use crate::audit::experiment::FILE_CHECKS;
use crate::audit::experiment::METADATA_CHECKS;
use crate::audit::index::BucketTable;
use crate::audit::index::ANALYSIS_BUCKETS;
use crate::audit::index::EXPERIMENT_BUCKETS;

//========================//
// Command-line arguments //
//========================//

/// Command line arguments for `dqa list`.
#[derive(Args)]
pub struct ListArgs {
    /// The subject which you want to list values for.
    #[arg(value_parser = PossibleValuesParser::new(["checks", "buckets"]))]
    subject: String,
}

//==============//
// Main command //
//==============//

/// Main method for the `dqa list` subcommand.
pub fn list(args: ListArgs) -> anyhow::Result<()> {
    match args.subject.as_str() {
        "checks" => {
            let mut experiment_table = Table::new();
            experiment_table.add_row(row!["Name", "Stage"]);
            for check in FILE_CHECKS {
                experiment_table.add_row(row![check.name, "file index"]);
            }
            for check in METADATA_CHECKS {
                experiment_table.add_row(row![check.name, "metadata"]);
            }

            println!("Experiment Checks:");
            println!();
            experiment_table.printstd();
            println!();

            let mut analysis_table = Table::new();
            analysis_table.add_row(row!["Name", "Stage"]);
            for check in ANALYSIS_CHECKS {
                analysis_table.add_row(row![check.name, "file index"]);
            }

            println!("Analysis Checks:");
            println!();
            analysis_table.printstd();

            Ok(())
        }
        "buckets" => {
            for table in [&EXPERIMENT_BUCKETS, &ANALYSIS_BUCKETS] {
                print_bucket_table(table);
                println!();
            }
            Ok(())
        }
        s => bail!("Unsupported subject: {}", s),
    }
}

fn print_bucket_table(bucket_table: &BucketTable) {
    let mut table = Table::new();
    table.add_row(row!["File format", "Output type", "Buckets"]);
    for rule in bucket_table.rules {
        table.add_row(row![
            rule.file_format,
            rule.output_type,
            rule.buckets.join(", ")
        ]);
    }

    println!("{} buckets:", bucket_table.name);
    println!();
    table.printstd();
}
