use anyhow::Context;
use clap::Parser;
use mcpreg_core::Outcome;
use mcpreg_core::ServerEntry;
use mcpreg_core::mutator;
use mcpreg_core::paths;

/// Flag appended to the server invocation when Langfuse tracing was
/// requested at install time.
const WITH_LANGFUSE_ARG: &str = "--with-langfuse";

const ENV_FILE_ARG: &str = "--env-file";

#[derive(Debug, Parser)]
pub struct AddEntryCommand {
    /// Registry key for the entry.
    #[arg(long)]
    pub name: String,

    /// Executable the host application should launch for this entry.
    #[arg(long)]
    pub command: String,

    /// Environment file passed to the server as `--env-file <PATH>`.
    #[arg(long = "env-file", value_name = "PATH")]
    pub env_file: String,

    /// Enable Langfuse tracing in the launched server.
    #[arg(long = "with-langfuse", default_value_t = false)]
    pub with_langfuse: bool,

    /// Spaces per indentation level in the rewritten configuration file.
    #[arg(long = "indent-size", value_name = "N", default_value_t = mutator::DEFAULT_INDENT)]
    pub indent_size: usize,
}

pub fn run_add_entry(cmd: AddEntryCommand) -> ! {
    match add_entry(cmd) {
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

fn add_entry(cmd: AddEntryCommand) -> anyhow::Result<Outcome> {
    let path = paths::claude_config_path()
        .context("could not resolve the host configuration path")?;

    let mut args = vec![ENV_FILE_ARG.to_string(), cmd.env_file];
    if cmd.with_langfuse {
        args.push(WITH_LANGFUSE_ARG.to_string());
    }

    let entry = ServerEntry {
        command: cmd.command,
        args,
    };
    Ok(mutator::upsert(&path, &cmd.name, entry, cmd.indent_size)?)
}
