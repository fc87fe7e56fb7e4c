//! Window snapshots and the legacy screen recording inference

use crate::oracle::ProcessRegistry;
use crate::status::AuthorizationStatus;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Executable of the Dock, whose windows are titled without any grant.
pub const DOCK_EXECUTABLE: &str = "Dock";

/// One entry of a window server snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub owner_pid: i32,
    pub owner_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Stacking layer; 0 is the normal application layer.
    pub layer: i64,
}

impl WindowRecord {
    pub fn has_title(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.is_empty())
    }
}

/// Infer screen recording consent from a snapshot of every window.
///
/// Before a preflight API existed, the window server only revealed other
/// processes' window titles to holders of the grant. Windows of `self_pid`
/// prove nothing and the Dock's titles are always visible, so both are skipped.
pub fn screen_capture_from_snapshot<R>(
    snapshot: &[WindowRecord],
    self_pid: i32,
    registry: &R,
) -> AuthorizationStatus
where
    R: ProcessRegistry + ?Sized,
{
    let witness = snapshot
        .iter()
        .filter(|w| w.owner_pid != self_pid && w.has_title())
        .find(|w| match registry.executable_name(w.owner_pid) {
            Some(exe) => exe != DOCK_EXECUTABLE,
            None => false,
        });

    match witness {
        Some(w) => {
            debug!(pid = w.owner_pid, owner = %w.owner_name, "foreign window title visible");
            AuthorizationStatus::Authorized
        }
        None => {
            debug!(windows = snapshot.len(), "no foreign window title visible");
            AuthorizationStatus::Denied
        }
    }
}
