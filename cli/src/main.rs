use clap::Parser;
use mcpreg_cli::AddEntryCommand;
use mcpreg_cli::RemoveEntryCommand;
use mcpreg_cli::run_add_entry;
use mcpreg_cli::run_check;
use mcpreg_cli::run_list;
use mcpreg_cli::run_remove_entry;
use tracing_subscriber::EnvFilter;

/// Registers the packaged reports server with Claude Desktop.
///
/// Each subcommand performs one transaction against
/// `claude_desktop_config.json` and exits; the file is backed up for the
/// duration of every mutating transaction and restored on failure.
#[derive(Debug, Parser)]
#[clap(author, version)]
struct MultitoolCli {
    #[clap(subcommand)]
    subcommand: Subcommand,
}

#[derive(Debug, clap::Subcommand)]
enum Subcommand {
    /// Add or update a server entry in the host configuration.
    AddEntry(AddEntryCommand),

    /// Remove a server entry from the host configuration.
    RemoveEntry(RemoveEntryCommand),

    /// Report whether the host configuration file exists and whether the
    /// host application is running.
    Check,

    /// Print the registered server entries.
    List,
}

fn main() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = MultitoolCli::parse();
    match cli.subcommand {
        Subcommand::AddEntry(cmd) => run_add_entry(cmd),
        Subcommand::RemoveEntry(cmd) => run_remove_entry(cmd),
        Subcommand::Check => run_check(),
        Subcommand::List => run_list(),
    }
}
