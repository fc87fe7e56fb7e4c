//! Read-only views of OS state
//!
//! The engine never talks to the OS directly. Platform code implements these
//! traits; tests substitute deterministic fakes.

use crate::capability::{EventKind, MediaKind, PhotosAccessLevel};
use crate::status::{
    BluetoothStatus, ContactsStatus, EventStatus, HidAccess, LocationStatus, MediaStatus,
    MusicLibraryStatus, PhotosStatus, SpeechStatus,
};
use crate::window::WindowRecord;
use std::path::PathBuf;

/// Native "current authorization status" queries, one per OS subsystem.
///
/// Only called when the strategy table selected the native path, so an
/// implementation may assume the API exists on the running OS.
pub trait AuthorizationOracle {
    fn contacts(&self) -> ContactsStatus;
    fn events(&self, kind: EventKind) -> EventStatus;
    fn media(&self, kind: MediaKind) -> MediaStatus;
    fn location(&self) -> LocationStatus;
    /// Implementations fall back to the level-less query on OS versions
    /// without per-level photo access.
    fn photos(&self, level: PhotosAccessLevel) -> PhotosStatus;
    fn speech_recognition(&self) -> SpeechStatus;
    fn bluetooth(&self) -> BluetoothStatus;
    fn input_monitoring(&self) -> HidAccess;
    fn music_library(&self) -> MusicLibraryStatus;
    fn screen_capture_preflight(&self) -> bool;
    fn accessibility_trusted(&self) -> bool;
}

/// Window server snapshots. Each call captures one list atomically.
pub trait WindowServer {
    /// Every window of every process, on screen or not.
    fn all_windows(&self) -> Vec<WindowRecord>;
    /// On-screen windows stacked above the caller's own.
    fn windows_above_self(&self) -> Vec<WindowRecord>;
}

/// Running-process lookups and foreground activation.
pub trait ProcessRegistry {
    fn current_pid(&self) -> i32;
    /// Executable file name of the running application owning `pid`, or `None`
    /// when no running application has that pid.
    fn executable_name(&self, pid: i32) -> Option<String>;
    /// Bring every window of `pid` to the front. Returns whether the request was issued.
    fn activate(&self, pid: i32) -> bool;
}

/// Inputs for home-directory resolution.
pub trait HomeSource {
    /// Value of the sandbox container marker, if set.
    fn sandbox_container(&self) -> Option<String>;
    /// Home directory from the user database entry of the current uid.
    fn user_database_home(&self) -> Option<PathBuf>;
    /// The platform's standard home accessor.
    fn standard_home(&self) -> Option<PathBuf>;
}

impl<T: AuthorizationOracle + ?Sized> AuthorizationOracle for &T {
    fn contacts(&self) -> ContactsStatus {
        (**self).contacts()
    }
    fn events(&self, kind: EventKind) -> EventStatus {
        (**self).events(kind)
    }
    fn media(&self, kind: MediaKind) -> MediaStatus {
        (**self).media(kind)
    }
    fn location(&self) -> LocationStatus {
        (**self).location()
    }
    fn photos(&self, level: PhotosAccessLevel) -> PhotosStatus {
        (**self).photos(level)
    }
    fn speech_recognition(&self) -> SpeechStatus {
        (**self).speech_recognition()
    }
    fn bluetooth(&self) -> BluetoothStatus {
        (**self).bluetooth()
    }
    fn input_monitoring(&self) -> HidAccess {
        (**self).input_monitoring()
    }
    fn music_library(&self) -> MusicLibraryStatus {
        (**self).music_library()
    }
    fn screen_capture_preflight(&self) -> bool {
        (**self).screen_capture_preflight()
    }
    fn accessibility_trusted(&self) -> bool {
        (**self).accessibility_trusted()
    }
}

impl<T: WindowServer + ?Sized> WindowServer for &T {
    fn all_windows(&self) -> Vec<WindowRecord> {
        (**self).all_windows()
    }
    fn windows_above_self(&self) -> Vec<WindowRecord> {
        (**self).windows_above_self()
    }
}

impl<T: ProcessRegistry + ?Sized> ProcessRegistry for &T {
    fn current_pid(&self) -> i32 {
        (**self).current_pid()
    }
    fn executable_name(&self, pid: i32) -> Option<String> {
        (**self).executable_name(pid)
    }
    fn activate(&self, pid: i32) -> bool {
        (**self).activate(pid)
    }
}

impl<T: HomeSource + ?Sized> HomeSource for &T {
    fn sandbox_container(&self) -> Option<String> {
        (**self).sandbox_container()
    }
    fn user_database_home(&self) -> Option<PathBuf> {
        (**self).user_database_home()
    }
    fn standard_home(&self) -> Option<PathBuf> {
        (**self).standard_home()
    }
}
