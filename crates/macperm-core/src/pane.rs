//! Deep links into System Settings > Privacy & Security

use crate::capability::Capability;
use anyhow::{Context, Result};
use std::process::Command;
use tracing::{debug, warn};

const SECURITY_PANE_URL: &str = "x-apple.systempreferences:com.apple.preference.security";

/// URL that opens the privacy pane `pane` (e.g. `Privacy_Camera`).
pub fn pane_url(pane: &str) -> String {
    format!("{}?{}", SECURITY_PANE_URL, pane)
}

/// Pane identifier for either a capability name or a raw `Privacy_*` identifier.
pub fn resolve_pane(input: &str) -> String {
    match Capability::parse(input, None) {
        Ok(capability) => capability.privacy_pane().to_string(),
        Err(_) => input.to_string(),
    }
}

/// Open the URL with the system handler.
pub fn open_url(url: &str) -> Result<()> {
    Command::new("open")
        .arg(url)
        .spawn()
        .context("Failed to open URL")?;
    Ok(())
}

/// Open a privacy pane. Fire-and-forget: failures are logged, never returned.
pub fn open_privacy_pane(pane: &str) {
    let url = pane_url(pane);
    debug!(%url, "opening privacy pane");
    if let Err(e) = open_url(&url) {
        warn!(%url, error = %e, "could not open privacy pane");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_security_url() {
        assert_eq!(
            pane_url("Privacy_ScreenCapture"),
            "x-apple.systempreferences:com.apple.preference.security?Privacy_ScreenCapture"
        );
    }

    #[test]
    fn resolves_capability_names_and_raw_ids() {
        assert_eq!(resolve_pane("camera"), "Privacy_Camera");
        assert_eq!(resolve_pane("full-disk-access"), "Privacy_AllFiles");
        assert_eq!(resolve_pane("Privacy_Automation"), "Privacy_Automation");
    }
}
