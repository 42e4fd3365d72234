use anyhow::bail;
use clap::CommandFactory;
use clap::FromArgMatches;
use clap::Parser;
use clap::Subcommand;

use dqa::commands;
use dqa::commands::audit::AuditArgs;
use dqa::commands::list::ListArgs;

use git_testament::git_testament;
use git_testament::render_testament;

git_testament!(TESTAMENT);

/// Command line interface for `dqa`.
#[derive(Parser)]
#[command(name = "dqa", propagate_version = true, subcommand_required = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Only errors are printed to the stderr stream.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// All available information, including debug information, is printed
    /// to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Audits one fully-embedded entity record against the data standards.
    Audit(AuditArgs),

    /// Lists registered checks or the file bucket tables.
    List(ListArgs),
}

fn main() -> anyhow::Result<()> {
    let version = render_testament!(TESTAMENT);
    let matches = Cli::command().version(version).get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(err) => bail!("could not parse arguments: {}", err),
    };

    let mut level = tracing::Level::INFO;
    if cli.quiet {
        level = tracing::Level::ERROR;
    } else if cli.verbose {
        level = tracing::Level::DEBUG;
    }

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    match cli.command {
        Commands::Audit(args) => commands::audit(args),
        Commands::List(args) => commands::list(args),
    }
}
