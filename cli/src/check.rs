use mcpreg_core::host::HostApp;
use mcpreg_core::mutator;
use mcpreg_core::paths;

/// Presence probe for orchestration scripts: reports whether the host
/// configuration file exists and whether the host application is
/// currently running. Always exits 0 so callers can branch on the
/// printed text without special-casing failures.
pub fn run_check() -> ! {
    match paths::claude_config_path() {
        Ok(path) => {
            if mutator::exists(&path) {
                println!("configuration file present at {}", path.display());
            } else {
                println!("configuration file not found at {}", path.display());
            }
        }
        Err(e) => {
            eprintln!("ERROR: could not resolve the host configuration path: {e}");
        }
    }

    let host = HostApp::default();
    if host.is_running() {
        println!("host application {} is running", host.process_name());
    } else {
        println!("host application {} is not running", host.process_name());
    }

    std::process::exit(0);
}
