use anyhow::Context;
use mcpreg_core::ServerEntry;
use mcpreg_core::mutator;
use mcpreg_core::paths;

pub fn run_list() -> ! {
    match list_entries() {
        Ok(entries) => {
            if entries.is_empty() {
                println!("no server entries registered");
            } else {
                for (name, entry) in entries {
                    println!("{name}: {entry}");
                }
            }
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            std::process::exit(1);
        }
    }
}

fn list_entries() -> anyhow::Result<Vec<(String, ServerEntry)>> {
    let path = paths::claude_config_path()
        .context("could not resolve the host configuration path")?;
    Ok(mutator::entries(&path)?)
}
