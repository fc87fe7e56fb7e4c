//! Effective home directory resolution
//!
//! Inside an app sandbox the standard accessor points at the container, not at
//! the user's real home, so the user database is consulted instead.

use crate::error::{Error, Result};
use crate::oracle::HomeSource;
use std::path::PathBuf;
use tracing::{debug, error};

/// Set by the OS for every sandboxed process.
pub const SANDBOX_MARKER: &str = "APP_SANDBOX_CONTAINER_ID";

pub struct HomeDirectoryResolver<H> {
    source: H,
}

impl<H: HomeSource> HomeDirectoryResolver<H> {
    pub fn new(source: H) -> Self {
        Self { source }
    }

    /// Resolve the home directory. Not cached; the environment may change between calls.
    pub fn resolve(&self) -> Result<PathBuf> {
        let container = self.source.sandbox_container();
        if let Some(container) = &container {
            debug!(%container, "sandboxed, resolving home from user database");
            return self.from_user_database(Some(container.as_str()));
        }

        match self.source.standard_home() {
            Some(home) => Ok(home),
            None => {
                debug!("standard home accessor empty, falling back to user database");
                self.from_user_database(None)
            }
        }
    }

    fn from_user_database(&self, container: Option<&str>) -> Result<PathBuf> {
        self.source.user_database_home().ok_or_else(|| {
            error!(?container, "no user database entry for current user");
            Error::configuration_fatal("no user database entry for the current user")
                .with_suggestions(vec![format!(
                    "Check the passwd entry of the user running this process (sandbox marker {})",
                    SANDBOX_MARKER
                )])
                .with_context(serde_json::json!({
                    "sandboxed": container.is_some(),
                    "sandbox_container": container,
                }))
        })
    }
}

/// Home inputs read from the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHome;

#[cfg(unix)]
impl HomeSource for SystemHome {
    fn sandbox_container(&self) -> Option<String> {
        std::env::var_os(SANDBOX_MARKER).map(|v| v.to_string_lossy().into_owned())
    }

    fn user_database_home(&self) -> Option<PathBuf> {
        use std::ffi::{CStr, OsStr};
        use std::os::unix::ffi::OsStrExt;

        // SAFETY: getpwuid returns null or a pointer to static storage valid
        // until the next passwd call on this thread; the path is copied out
        // before returning.
        unsafe {
            let pw = libc::getpwuid(libc::getuid());
            if pw.is_null() || (*pw).pw_dir.is_null() {
                return None;
            }
            let dir = CStr::from_ptr((*pw).pw_dir);
            Some(PathBuf::from(OsStr::from_bytes(dir.to_bytes())))
        }
    }

    fn standard_home(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

#[cfg(not(unix))]
impl HomeSource for SystemHome {
    fn sandbox_container(&self) -> Option<String> {
        None
    }

    fn user_database_home(&self) -> Option<PathBuf> {
        None
    }

    fn standard_home(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::path::Path;

    #[derive(Default)]
    struct FakeHome {
        container: Option<&'static str>,
        user_db: Option<&'static str>,
        standard: Option<&'static str>,
    }

    impl HomeSource for FakeHome {
        fn sandbox_container(&self) -> Option<String> {
            self.container.map(str::to_string)
        }
        fn user_database_home(&self) -> Option<PathBuf> {
            self.user_db.map(PathBuf::from)
        }
        fn standard_home(&self) -> Option<PathBuf> {
            self.standard.map(PathBuf::from)
        }
    }

    #[test]
    fn unsandboxed_uses_standard_home() {
        let source = FakeHome {
            user_db: Some("/Users/db"),
            standard: Some("/Users/std"),
            ..Default::default()
        };
        let home = HomeDirectoryResolver::new(source).resolve().unwrap();
        assert_eq!(home, Path::new("/Users/std"));
    }

    #[test]
    fn sandboxed_uses_user_database() {
        let source = FakeHome {
            container: Some("com.example.app"),
            user_db: Some("/Users/db"),
            standard: Some("/Users/db/Library/Containers/com.example.app/Data"),
        };
        let home = HomeDirectoryResolver::new(source).resolve().unwrap();
        assert_eq!(home, Path::new("/Users/db"));
    }

    #[test]
    fn sandboxed_without_entry_is_fatal() {
        let source = FakeHome {
            container: Some("com.example.app"),
            standard: Some("/Users/container"),
            ..Default::default()
        };
        let err = HomeDirectoryResolver::new(source).resolve().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigurationFatal);

        let context = err.context.unwrap();
        assert_eq!(context["sandboxed"], true);
        assert_eq!(context["sandbox_container"], "com.example.app");
    }

    #[test]
    fn no_home_anywhere_is_fatal_without_sandbox() {
        let err = HomeDirectoryResolver::new(FakeHome::default())
            .resolve()
            .unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(err.context.unwrap()["sandboxed"], false);
    }

    #[test]
    fn missing_standard_home_falls_back() {
        let source = FakeHome {
            user_db: Some("/var/root"),
            ..Default::default()
        };
        let home = HomeDirectoryResolver::new(source).resolve().unwrap();
        assert_eq!(home, Path::new("/var/root"));
    }

    #[cfg(unix)]
    #[test]
    fn system_source_reads_standard_home() {
        // Only meaningful where a home exists; CI containers may lack one.
        if let Some(expected) = dirs::home_dir() {
            assert_eq!(SystemHome.standard_home(), Some(expected));
        }
    }
}
