//! PermissionChecker - single entry point for capability status

use crate::capability::Capability;
use crate::dialog::{DialogConfig, DialogDetector, Sleeper, ThreadSleeper};
use crate::error::{Error, Result};
use crate::home::HomeDirectoryResolver;
use crate::oracle::{AuthorizationOracle, HomeSource, ProcessRegistry, WindowServer};
use crate::probe;
use crate::status::AuthorizationStatus;
use crate::strategy::{self, Heuristic, Strategy};
use crate::version::OsVersion;
use crate::window::{self, WindowRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// Status of every capability at one point in time.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub os_version: OsVersion,
    pub checked_at: DateTime<Utc>,
    pub statuses: BTreeMap<String, AuthorizationStatus>,
    /// Capabilities that could not be resolved, keyed like `statuses`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, Error>,
}

pub struct PermissionChecker<O, W, P, H> {
    oracle: O,
    windows: W,
    processes: P,
    home: H,
    os_version: OsVersion,
    dialog: DialogConfig,
}

impl<O, W, P, H> PermissionChecker<O, W, P, H>
where
    O: AuthorizationOracle,
    W: WindowServer,
    P: ProcessRegistry,
    H: HomeSource,
{
    pub fn new(oracle: O, windows: W, processes: P, home: H, os_version: OsVersion) -> Self {
        Self {
            oracle,
            windows,
            processes,
            home,
            os_version,
            dialog: DialogConfig::default(),
        }
    }

    pub fn with_dialog_config(mut self, config: DialogConfig) -> Self {
        self.dialog = config;
        self
    }

    pub fn os_version(&self) -> OsVersion {
        self.os_version
    }

    /// Resolve the status of `capability`.
    ///
    /// Every outcome is a status except a failed user database lookup while
    /// resolving sentinel paths, which is `ErrorCode::ConfigurationFatal`.
    #[instrument(skip(self), fields(os = %self.os_version))]
    pub fn status(&self, capability: Capability) -> Result<AuthorizationStatus> {
        let strategy = strategy::select(capability, self.os_version);
        debug!(?strategy, "strategy selected");

        let status = match strategy {
            Strategy::AlwaysAuthorized => AuthorizationStatus::Authorized,
            Strategy::NativeQuery => self.native_status(capability),
            Strategy::Heuristic(Heuristic::FileProbe) => self.full_disk_access()?,
            Strategy::Heuristic(Heuristic::WindowSnapshot) => self.legacy_screen_capture(),
        };

        debug!(%status, "resolved");
        Ok(status)
    }

    /// Parse `kind`/`param` and resolve.
    pub fn status_str(&self, kind: &str, param: Option<&str>) -> Result<AuthorizationStatus> {
        let capability = Capability::parse(kind, param)?;
        self.status(capability)
    }

    /// Resolve every capability. A capability that fails lands in `errors`
    /// and does not hide the others.
    pub fn report(&self) -> StatusReport {
        let mut statuses = BTreeMap::new();
        let mut errors = BTreeMap::new();
        for capability in Capability::all() {
            match self.status(capability) {
                Ok(status) => {
                    statuses.insert(capability.to_string(), status);
                }
                Err(e) => {
                    warn!(%capability, error = %e, "capability left out of report");
                    errors.insert(capability.to_string(), e);
                }
            }
        }

        StatusReport {
            os_version: self.os_version,
            checked_at: Utc::now(),
            statuses,
            errors,
        }
    }

    /// Look for the accessibility authorization dialog and foreground it.
    /// Blocks for up to the configured attempts × interval.
    pub fn detect_and_foreground_dialog(&self) -> bool {
        self.dialog_with_sleeper(ThreadSleeper)
    }

    pub fn dialog_with_sleeper<S: Sleeper>(&self, sleeper: S) -> bool {
        DialogDetector::with_sleeper(&self.windows, &self.processes, sleeper)
            .with_config(self.dialog.clone())
            .detect_and_foreground()
    }

    /// Windows stacked above this process, as the dialog detector sees them.
    pub fn windows_above_self(&self) -> Vec<WindowRecord> {
        self.windows.windows_above_self()
    }

    fn native_status(&self, capability: Capability) -> AuthorizationStatus {
        let oracle = &self.oracle;
        match capability {
            Capability::Contacts => oracle.contacts().into(),
            Capability::Event(kind) => oracle.events(kind).into(),
            Capability::Media(kind) => oracle.media(kind).into(),
            Capability::Location => oracle.location().into(),
            Capability::Photos(level) => oracle.photos(level).into(),
            Capability::SpeechRecognition => oracle.speech_recognition().into(),
            Capability::Bluetooth => oracle.bluetooth().into(),
            Capability::InputMonitoring => oracle.input_monitoring().into(),
            Capability::MusicLibrary => oracle.music_library().into(),
            Capability::ScreenCapture => {
                AuthorizationStatus::from_granted(oracle.screen_capture_preflight())
            }
            Capability::Accessibility => {
                AuthorizationStatus::from_granted(oracle.accessibility_trusted())
            }
            // No native query exists; the strategy table never routes here.
            Capability::FullDiskAccess => AuthorizationStatus::NotDetermined,
        }
    }

    fn full_disk_access(&self) -> Result<AuthorizationStatus> {
        let home = HomeDirectoryResolver::new(&self.home).resolve()?;
        let sentinels = probe::sentinel_files(&home, self.os_version);
        Ok(probe::probe(sentinels.as_slice()))
    }

    fn legacy_screen_capture(&self) -> AuthorizationStatus {
        let snapshot = self.windows.all_windows();
        let self_pid = self.processes.current_pid();
        window::screen_capture_from_snapshot(&snapshot, self_pid, &self.processes)
    }
}
