//! Full disk access inference from sentinel file reads
//!
//! No OS version offers a query for full disk access, so the grant is inferred
//! by opening files that only a process holding it can read.

use crate::status::AuthorizationStatus;
use crate::version::OsVersion;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

const TCC_DATABASE: &str = "/Library/Application Support/com.apple.TCC/TCC.db";
const TIME_MACHINE_PREFS: &str = "/Library/Preferences/com.apple.TimeMachine.plist";
const SAFARI_BOOKMARKS: &str = "Library/Safari/Bookmarks.plist";
const SAFARI_CLOUD_TABS: &str = "Library/Safari/CloudTabs.db";

/// What a single sentinel read says about the grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evidence {
    /// The file opened for reading.
    Granted,
    /// The OS refused the read.
    Forbidden,
    /// Missing file or unrelated failure.
    Inconclusive,
}

impl Evidence {
    pub fn from_open(result: &io::Result<File>) -> Self {
        match result {
            Ok(_) => Evidence::Granted,
            Err(e) => Self::from_error(e),
        }
    }

    pub fn from_error(error: &io::Error) -> Self {
        match error.kind() {
            // EACCES and EPERM both land here.
            io::ErrorKind::PermissionDenied => Evidence::Forbidden,
            _ => Evidence::Inconclusive,
        }
    }
}

/// Sentinels for `home` on `version`, in probe order.
pub fn sentinel_files(home: &Path, version: OsVersion) -> Vec<PathBuf> {
    let mut files = vec![
        home.join(SAFARI_BOOKMARKS),
        PathBuf::from(TCC_DATABASE),
        PathBuf::from(TIME_MACHINE_PREFS),
    ];

    if version.at_least(OsVersion::CATALINA) {
        files.push(home.join(SAFARI_CLOUD_TABS));
    }

    files
}

/// Open `path` read-only and classify the outcome. The handle is dropped immediately.
pub fn evidence_for(path: &Path) -> Evidence {
    let result = File::open(path);
    let evidence = Evidence::from_open(&result);
    match &result {
        Ok(_) => trace!(path = %path.display(), "sentinel readable"),
        Err(e) => trace!(path = %path.display(), error = %e, ?evidence, "sentinel unreadable"),
    }
    evidence
}

/// Fold evidence into a status.
///
/// Any readable sentinel wins outright. Without one, an explicit refusal
/// means denied; with neither, nothing can be concluded. The result does not
/// depend on the order of the evidence.
pub fn aggregate<I>(evidence: I) -> AuthorizationStatus
where
    I: IntoIterator<Item = Evidence>,
{
    let mut status = AuthorizationStatus::NotDetermined;
    for e in evidence {
        match e {
            Evidence::Granted => return AuthorizationStatus::Authorized,
            Evidence::Forbidden => status = AuthorizationStatus::Denied,
            Evidence::Inconclusive => {}
        }
    }
    status
}

/// Probe every path and aggregate.
pub fn probe<P: AsRef<Path>>(paths: &[P]) -> AuthorizationStatus {
    let status = aggregate(paths.iter().map(|p| evidence_for(p.as_ref())));
    debug!(sentinels = paths.len(), %status, "full disk access probe");
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn classifies_errors() {
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert_eq!(Evidence::from_error(&denied), Evidence::Forbidden);
        let eperm = io::Error::from_raw_os_error(libc::EPERM);
        assert_eq!(Evidence::from_error(&eperm), Evidence::Forbidden);
        let eacces = io::Error::from_raw_os_error(libc::EACCES);
        assert_eq!(Evidence::from_error(&eacces), Evidence::Forbidden);
        let missing = io::Error::from_raw_os_error(libc::ENOENT);
        assert_eq!(Evidence::from_error(&missing), Evidence::Inconclusive);
        let busy = io::Error::from_raw_os_error(libc::EIO);
        assert_eq!(Evidence::from_error(&busy), Evidence::Inconclusive);
    }

    #[test]
    fn readable_wins_regardless_of_order() {
        use Evidence::*;
        assert_eq!(aggregate([Forbidden, Granted]), AuthorizationStatus::Authorized);
        assert_eq!(aggregate([Granted, Forbidden]), AuthorizationStatus::Authorized);
        assert_eq!(aggregate([Inconclusive, Granted, Inconclusive]), AuthorizationStatus::Authorized);
    }

    #[test]
    fn forbidden_without_readable_is_denied() {
        use Evidence::*;
        assert_eq!(aggregate([Inconclusive, Forbidden, Inconclusive]), AuthorizationStatus::Denied);
    }

    #[test]
    fn nothing_conclusive_is_not_determined() {
        use Evidence::*;
        assert_eq!(aggregate([Inconclusive, Inconclusive]), AuthorizationStatus::NotDetermined);
        assert_eq!(aggregate(Vec::<Evidence>::new()), AuthorizationStatus::NotDetermined);
    }

    #[test]
    fn probe_finds_readable_file() {
        let dir = tempfile::tempdir().unwrap();
        let readable = dir.path().join("Bookmarks.plist");
        let mut f = File::create(&readable).unwrap();
        writeln!(f, "<plist/>").unwrap();

        let paths = vec![dir.path().join("missing.db"), readable];
        assert_eq!(probe(paths.as_slice()), AuthorizationStatus::Authorized);
    }

    #[test]
    fn probe_of_missing_files_is_not_determined() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![dir.path().join("a.plist"), dir.path().join("b.db")];
        assert_eq!(probe(paths.as_slice()), AuthorizationStatus::NotDetermined);
    }

    #[test]
    fn sentinels_grow_on_catalina() {
        let home = Path::new("/Users/someone");
        let mojave = sentinel_files(home, OsVersion::new(10, 14, 6));
        assert_eq!(mojave.len(), 3);
        assert_eq!(mojave[0], home.join("Library/Safari/Bookmarks.plist"));
        assert_eq!(mojave[1], PathBuf::from(TCC_DATABASE));

        let catalina = sentinel_files(home, OsVersion::CATALINA);
        assert_eq!(catalina.len(), 4);
        assert_eq!(catalina[3], home.join("Library/Safari/CloudTabs.db"));
    }
}
