//! macOS platform implementation
//!
//! Native status queries go through the Objective-C runtime and a few C entry
//! points; windows come from Core Graphics.

mod native;
mod processes;
mod windows;

pub use native::NativeOracle;
pub use processes::AppKitProcesses;
pub use windows::CgWindowServer;

use crate::checker::PermissionChecker;
use crate::home::SystemHome;
use crate::version::OsVersion;
use crate::Result;
use anyhow::Context;
use std::process::Command;
use tracing::debug;

pub type SystemChecker = PermissionChecker<NativeOracle, CgWindowServer, AppKitProcesses, SystemHome>;

/// Running macOS version, from `sw_vers`.
pub fn os_version() -> Result<OsVersion> {
    let output = Command::new("sw_vers")
        .arg("-productVersion")
        .output()
        .context("Failed to run sw_vers")?;

    if !output.status.success() {
        return Err(anyhow::anyhow!("sw_vers exited with {}", output.status).into());
    }

    let version = String::from_utf8_lossy(&output.stdout).parse::<OsVersion>()?;
    debug!(%version, "detected macOS version");
    Ok(version)
}

/// Checker wired to the live system.
pub fn checker() -> Result<SystemChecker> {
    let version = os_version()?;
    Ok(PermissionChecker::new(
        NativeOracle::new(version),
        CgWindowServer,
        AppKitProcesses,
        SystemHome,
        version,
    ))
}
