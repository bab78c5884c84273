use anyhow::Context;
use clap::Parser;
use mcpreg_core::Outcome;
use mcpreg_core::mutator;
use mcpreg_core::paths;

#[derive(Debug, Parser)]
pub struct RemoveEntryCommand {
    /// Registry key of the entry to delete.
    #[arg(long)]
    pub name: String,
}

pub fn run_remove_entry(cmd: RemoveEntryCommand) -> ! {
    match remove_entry(cmd) {
        Ok(outcome) => {
            println!("{}: {}", outcome.status, outcome.message);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            std::process::exit(1);
        }
    }
}

fn remove_entry(cmd: RemoveEntryCommand) -> anyhow::Result<Outcome> {
    let path = paths::claude_config_path()
        .context("could not resolve the host configuration path")?;
    Ok(mutator::remove(&path, &cmd.name)?)
}
