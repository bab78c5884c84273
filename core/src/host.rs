//! Probe for the host application's process.
//!
//! Install orchestration uses this to decide whether Claude Desktop has
//! to be stopped before swapping binaries and restarted afterwards. The
//! configuration mutator itself never consults it.

use std::process::Command;
use std::process::Stdio;

use tracing::debug;

/// Claude Desktop's process image name.
#[cfg(windows)]
pub const HOST_PROCESS_NAME: &str = "Claude.exe";
#[cfg(not(windows))]
pub const HOST_PROCESS_NAME: &str = "Claude";

#[derive(Debug, Clone)]
pub struct HostApp {
    process_name: String,
}

impl Default for HostApp {
    fn default() -> Self {
        Self::new(HOST_PROCESS_NAME)
    }
}

impl HostApp {
    pub fn new(process_name: impl Into<String>) -> Self {
        Self {
            process_name: process_name.into(),
        }
    }

    pub fn process_name(&self) -> &str {
        &self.process_name
    }

    /// Best effort: a failure to run the platform query reads as "not
    /// running".
    pub fn is_running(&self) -> bool {
        match query_process(&self.process_name) {
            Ok(running) => running,
            Err(e) => {
                debug!("process query for `{}` failed: {e}", self.process_name);
                false
            }
        }
    }

    /// Asks the process to exit. Returns whether the request was
    /// delivered, not whether the process actually exited.
    pub fn request_stop(&self) -> bool {
        match stop_process(&self.process_name) {
            Ok(delivered) => delivered,
            Err(e) => {
                debug!("stop request for `{}` failed: {e}", self.process_name);
                false
            }
        }
    }
}

#[cfg(windows)]
fn query_process(name: &str) -> std::io::Result<bool> {
    let output = Command::new("tasklist")
        .args(["/FI", &format!("IMAGENAME eq {name}"), "/NH"])
        .stderr(Stdio::null())
        .output()?;
    Ok(String::from_utf8_lossy(&output.stdout).contains(name))
}

#[cfg(not(windows))]
fn query_process(name: &str) -> std::io::Result<bool> {
    let status = Command::new("pgrep")
        .args(["-x", name])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;
    Ok(status.success())
}

#[cfg(windows)]
fn stop_process(name: &str) -> std::io::Result<bool> {
    // No /F: give the host a chance to shut down cleanly.
    let status = Command::new("taskkill")
        .args(["/IM", name])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;
    Ok(status.success())
}

#[cfg(not(windows))]
fn stop_process(name: &str) -> std::io::Result<bool> {
    let status = Command::new("pkill")
        .args(["-x", name])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;
    Ok(status.success())
}
