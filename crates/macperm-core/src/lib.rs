//! macperm-core - privacy permission status for macOS
//!
//! Answers "has this process been granted X?" for every TCC-guarded
//! capability, without ever prompting the user.
//!
//! ## How a status is resolved
//!
//! - **Native query**: the framework's own authorization status, mapped onto
//!   [`AuthorizationStatus`]
//! - **Always authorized**: the OS predates the permission
//! - **Heuristic**: Full Disk Access by probing protected files, Catalina
//!   screen capture by inspecting window titles
//!
//! ## Platform Support
//!
//! - **macOS**: Full support
//! - **Linux / Windows**: Construction fails with `UNSUPPORTED_PLATFORM`

pub mod capability;
pub mod checker;
pub mod dialog;
pub mod error;
pub mod home;
pub mod oracle;
pub mod pane;
pub mod platform;
pub mod probe;
pub mod status;
pub mod strategy;
pub mod version;
pub mod window;

pub use capability::{Capability, EventKind, MediaKind, PhotosAccessLevel};
pub use checker::{PermissionChecker, StatusReport};
pub use dialog::{DialogConfig, DialogDetector};
pub use error::{Error, ErrorCode, Result};
pub use status::AuthorizationStatus;
pub use version::OsVersion;
pub use window::WindowRecord;

pub mod prelude {
    pub use crate::capability::{Capability, EventKind, MediaKind, PhotosAccessLevel};
    pub use crate::checker::{PermissionChecker, StatusReport};
    pub use crate::error::{Error, ErrorCode, Result};
    pub use crate::platform::current::SystemChecker;
    pub use crate::status::AuthorizationStatus;
    pub use crate::version::OsVersion;
}

/// Checker bound to the running system.
pub fn checker() -> Result<platform::current::SystemChecker> {
    platform::current::checker()
}

/// Version of the running OS.
pub fn os_version() -> Result<OsVersion> {
    platform::current::os_version()
}
