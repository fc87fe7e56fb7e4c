//! Platforms without a privacy consent database
//!
//! Linux and Windows have no TCC equivalent. The types exist so callers can
//! name `current::SystemChecker` everywhere; constructing one fails.

use crate::capability::{EventKind, MediaKind, PhotosAccessLevel};
use crate::checker::PermissionChecker;
use crate::home::SystemHome;
use crate::oracle::{AuthorizationOracle, ProcessRegistry, WindowServer};
use crate::status::{
    BluetoothStatus, ContactsStatus, EventStatus, HidAccess, LocationStatus, MediaStatus,
    MusicLibraryStatus, PhotosStatus, SpeechStatus,
};
use crate::version::OsVersion;
use crate::window::WindowRecord;
use crate::{Error, Result};

pub type SystemChecker = PermissionChecker<Unavailable, Unavailable, Unavailable, SystemHome>;

/// Stand-in for OS services that do not exist here.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

pub fn os_version() -> Result<OsVersion> {
    Err(Error::unsupported_platform())
}

pub fn checker() -> Result<SystemChecker> {
    Err(Error::unsupported_platform().with_suggestions(vec![
        "Run on macOS 10.14 or later".to_string(),
    ]))
}

// Callers compile against `SystemChecker` methods on every target, and those
// methods require the oracle traits.
impl AuthorizationOracle for Unavailable {
    fn contacts(&self) -> ContactsStatus {
        ContactsStatus::NOT_DETERMINED
    }
    fn events(&self, _kind: EventKind) -> EventStatus {
        EventStatus::NOT_DETERMINED
    }
    fn media(&self, _kind: MediaKind) -> MediaStatus {
        MediaStatus::NOT_DETERMINED
    }
    fn location(&self) -> LocationStatus {
        LocationStatus::NOT_DETERMINED
    }
    fn photos(&self, _level: PhotosAccessLevel) -> PhotosStatus {
        PhotosStatus::NOT_DETERMINED
    }
    fn speech_recognition(&self) -> SpeechStatus {
        SpeechStatus::NOT_DETERMINED
    }
    fn bluetooth(&self) -> BluetoothStatus {
        BluetoothStatus::NOT_DETERMINED
    }
    fn input_monitoring(&self) -> HidAccess {
        HidAccess::UNKNOWN
    }
    fn music_library(&self) -> MusicLibraryStatus {
        MusicLibraryStatus::NOT_DETERMINED
    }
    fn screen_capture_preflight(&self) -> bool {
        false
    }
    fn accessibility_trusted(&self) -> bool {
        false
    }
}

impl WindowServer for Unavailable {
    fn all_windows(&self) -> Vec<WindowRecord> {
        Vec::new()
    }
    fn windows_above_self(&self) -> Vec<WindowRecord> {
        Vec::new()
    }
}

impl ProcessRegistry for Unavailable {
    fn current_pid(&self) -> i32 {
        std::process::id() as i32
    }
    fn executable_name(&self, _pid: i32) -> Option<String> {
        None
    }
    fn activate(&self, _pid: i32) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;

    #[test]
    fn construction_reports_unsupported_platform() {
        assert_eq!(checker().err().map(|e| e.code), Some(ErrorCode::UnsupportedPlatform));
        assert!(os_version().is_err());
    }
}
