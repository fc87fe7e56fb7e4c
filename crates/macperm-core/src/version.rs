//! Operating system version used for gating

use crate::error::{Error, ErrorCode, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct OsVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl OsVersion {
    /// Below every gate.
    pub const MIN: OsVersion = OsVersion::new(0, 0, 0);
    /// Mojave: capture-device consent.
    pub const MOJAVE: OsVersion = OsVersion::new(10, 14, 0);
    /// Catalina: bluetooth, input monitoring, speech, legacy screen recording.
    pub const CATALINA: OsVersion = OsVersion::new(10, 15, 0);
    /// Big Sur as reported in compatibility mode. `11.0` compares above it.
    pub const BIG_SUR: OsVersion = OsVersion::new(10, 16, 0);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn at_least(&self, other: OsVersion) -> bool {
        *self >= other
    }
}

impl FromStr for OsVersion {
    type Err = Error;

    /// Accepts `14`, `10.15`, `10.15.7`, surrounding whitespace included.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            Error::new(
                ErrorCode::InvalidParameter,
                format!("'{}' is not an OS version", s.trim()),
            )
        };

        let mut parts = s.trim().split('.');
        let mut next = |required: bool| -> Result<u32> {
            match parts.next() {
                Some(p) => p.parse::<u32>().map_err(|_| invalid()),
                None if required => Err(invalid()),
                None => Ok(0),
            }
        };

        let version = OsVersion::new(next(true)?, next(false)?, next(false)?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(version)
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serialize for OsVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_forms() {
        assert_eq!("14".parse::<OsVersion>().unwrap(), OsVersion::new(14, 0, 0));
        assert_eq!("10.15".parse::<OsVersion>().unwrap(), OsVersion::CATALINA);
        assert_eq!(" 10.15.7\n".parse::<OsVersion>().unwrap(), OsVersion::new(10, 15, 7));
    }

    #[test]
    fn rejects_garbage() {
        for s in ["", "ten", "10.x", "1.2.3.4", "10..1"] {
            assert!(s.parse::<OsVersion>().is_err(), "{:?}", s);
        }
    }

    #[test]
    fn orders_across_major_bump() {
        let eleven: OsVersion = "11.0".parse().unwrap();
        assert!(eleven.at_least(OsVersion::BIG_SUR));
        assert!(OsVersion::new(10, 15, 7) < OsVersion::BIG_SUR);
        assert!(OsVersion::CATALINA.at_least(OsVersion::CATALINA));
        assert!(!OsVersion::MOJAVE.at_least(OsVersion::CATALINA));
    }

    #[test]
    fn serializes_dotted() {
        let json = serde_json::to_string(&OsVersion::new(13, 4, 1)).unwrap();
        assert_eq!(json, "\"13.4.1\"");
    }
}
