//! Authorization status vocabulary
//!
//! Every OS subsystem reports consent through its own enumeration. Each one is
//! modelled here as a newtype over the raw value so that members added by
//! future OS releases still fit, and each converts into [`AuthorizationStatus`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical result of a capability check.
///
/// The states are independent; there is no ordering between them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthorizationStatus {
    #[serde(rename = "authorized")]
    Authorized,
    #[serde(rename = "denied")]
    Denied,
    #[serde(rename = "restricted")]
    Restricted,
    #[default]
    #[serde(rename = "not determined")]
    NotDetermined,
    #[serde(rename = "limited")]
    Limited,
}

impl AuthorizationStatus {
    pub const ALL: [AuthorizationStatus; 5] = [
        Self::Authorized,
        Self::Denied,
        Self::Restricted,
        Self::NotDetermined,
        Self::Limited,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authorized => "authorized",
            Self::Denied => "denied",
            Self::Restricted => "restricted",
            Self::NotDetermined => "not determined",
            Self::Limited => "limited",
        }
    }

    pub fn from_granted(granted: bool) -> Self {
        if granted {
            Self::Authorized
        } else {
            Self::Denied
        }
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized | Self::Limited)
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthorizationStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                crate::Error::new(
                    crate::ErrorCode::InvalidParameter,
                    format!("{} is not an authorization status", s),
                )
            })
    }
}

/// `CNAuthorizationStatus`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactsStatus(pub isize);

impl ContactsStatus {
    pub const NOT_DETERMINED: Self = Self(0);
    pub const RESTRICTED: Self = Self(1);
    pub const DENIED: Self = Self(2);
    pub const AUTHORIZED: Self = Self(3);
}

impl From<ContactsStatus> for AuthorizationStatus {
    fn from(status: ContactsStatus) -> Self {
        match status {
            ContactsStatus::AUTHORIZED => Self::Authorized,
            ContactsStatus::DENIED => Self::Denied,
            ContactsStatus::RESTRICTED => Self::Restricted,
            _ => Self::NotDetermined,
        }
    }
}

/// `EKAuthorizationStatus`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventStatus(pub isize);

impl EventStatus {
    pub const NOT_DETERMINED: Self = Self(0);
    pub const RESTRICTED: Self = Self(1);
    pub const DENIED: Self = Self(2);
    pub const AUTHORIZED: Self = Self(3);
}

impl From<EventStatus> for AuthorizationStatus {
    fn from(status: EventStatus) -> Self {
        match status {
            EventStatus::AUTHORIZED => Self::Authorized,
            EventStatus::DENIED => Self::Denied,
            EventStatus::RESTRICTED => Self::Restricted,
            _ => Self::NotDetermined,
        }
    }
}

/// `AVAuthorizationStatus`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaStatus(pub isize);

impl MediaStatus {
    pub const NOT_DETERMINED: Self = Self(0);
    pub const RESTRICTED: Self = Self(1);
    pub const DENIED: Self = Self(2);
    pub const AUTHORIZED: Self = Self(3);
}

impl From<MediaStatus> for AuthorizationStatus {
    fn from(status: MediaStatus) -> Self {
        match status {
            MediaStatus::AUTHORIZED => Self::Authorized,
            MediaStatus::DENIED => Self::Denied,
            MediaStatus::RESTRICTED => Self::Restricted,
            _ => Self::NotDetermined,
        }
    }
}

/// `CBManagerAuthorization`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BluetoothStatus(pub isize);

impl BluetoothStatus {
    pub const NOT_DETERMINED: Self = Self(0);
    pub const RESTRICTED: Self = Self(1);
    pub const DENIED: Self = Self(2);
    pub const ALLOWED_ALWAYS: Self = Self(3);
}

impl From<BluetoothStatus> for AuthorizationStatus {
    fn from(status: BluetoothStatus) -> Self {
        match status {
            BluetoothStatus::ALLOWED_ALWAYS => Self::Authorized,
            BluetoothStatus::DENIED => Self::Denied,
            BluetoothStatus::RESTRICTED => Self::Restricted,
            _ => Self::NotDetermined,
        }
    }
}

/// `IOHIDAccessType`. There is no restricted state for input monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HidAccess(pub u32);

impl HidAccess {
    pub const GRANTED: Self = Self(0);
    pub const DENIED: Self = Self(1);
    pub const UNKNOWN: Self = Self(2);
}

impl From<HidAccess> for AuthorizationStatus {
    fn from(access: HidAccess) -> Self {
        match access {
            HidAccess::GRANTED => Self::Authorized,
            HidAccess::DENIED => Self::Denied,
            _ => Self::NotDetermined,
        }
    }
}

/// `SKCloudServiceAuthorizationStatus`. Denied and restricted are swapped
/// relative to the AVFoundation family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MusicLibraryStatus(pub isize);

impl MusicLibraryStatus {
    pub const NOT_DETERMINED: Self = Self(0);
    pub const DENIED: Self = Self(1);
    pub const RESTRICTED: Self = Self(2);
    pub const AUTHORIZED: Self = Self(3);
}

impl From<MusicLibraryStatus> for AuthorizationStatus {
    fn from(status: MusicLibraryStatus) -> Self {
        match status {
            MusicLibraryStatus::AUTHORIZED => Self::Authorized,
            MusicLibraryStatus::DENIED => Self::Denied,
            MusicLibraryStatus::RESTRICTED => Self::Restricted,
            _ => Self::NotDetermined,
        }
    }
}

/// `SFSpeechRecognizerAuthorizationStatus`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeechStatus(pub isize);

impl SpeechStatus {
    pub const NOT_DETERMINED: Self = Self(0);
    pub const DENIED: Self = Self(1);
    pub const RESTRICTED: Self = Self(2);
    pub const AUTHORIZED: Self = Self(3);
}

impl From<SpeechStatus> for AuthorizationStatus {
    fn from(status: SpeechStatus) -> Self {
        match status {
            SpeechStatus::AUTHORIZED => Self::Authorized,
            SpeechStatus::DENIED => Self::Denied,
            SpeechStatus::RESTRICTED => Self::Restricted,
            _ => Self::NotDetermined,
        }
    }
}

/// `PHAuthorizationStatus`, the only family with a limited grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotosStatus(pub isize);

impl PhotosStatus {
    pub const NOT_DETERMINED: Self = Self(0);
    pub const RESTRICTED: Self = Self(1);
    pub const DENIED: Self = Self(2);
    pub const AUTHORIZED: Self = Self(3);
    pub const LIMITED: Self = Self(4);
}

impl From<PhotosStatus> for AuthorizationStatus {
    fn from(status: PhotosStatus) -> Self {
        match status {
            PhotosStatus::AUTHORIZED => Self::Authorized,
            PhotosStatus::DENIED => Self::Denied,
            PhotosStatus::RESTRICTED => Self::Restricted,
            PhotosStatus::LIMITED => Self::Limited,
            _ => Self::NotDetermined,
        }
    }
}

/// `CLAuthorizationStatus`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationStatus(pub i32);

impl LocationStatus {
    pub const NOT_DETERMINED: Self = Self(0);
    pub const RESTRICTED: Self = Self(1);
    pub const DENIED: Self = Self(2);
    pub const AUTHORIZED: Self = Self(3);
    pub const AUTHORIZED_WHEN_IN_USE: Self = Self(4);
}

impl From<LocationStatus> for AuthorizationStatus {
    /// Location is denial-biased: anything short of an explicit grant,
    /// including restricted and not-yet-determined, reports `Denied`.
    fn from(status: LocationStatus) -> Self {
        match status {
            LocationStatus::AUTHORIZED => Self::Authorized,
            _ => Self::Denied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_projection_round_trips() {
        for status in AuthorizationStatus::ALL {
            assert_eq!(status.as_str().parse::<AuthorizationStatus>().unwrap(), status);
        }
        assert!("granted".parse::<AuthorizationStatus>().is_err());
    }

    #[test]
    fn serde_uses_projection_strings() {
        let json = serde_json::to_string(&AuthorizationStatus::NotDetermined).unwrap();
        assert_eq!(json, "\"not determined\"");
        assert_eq!(AuthorizationStatus::default(), AuthorizationStatus::NotDetermined);
    }

    #[test]
    fn straight_families_map_known_members() {
        assert_eq!(AuthorizationStatus::from(ContactsStatus::AUTHORIZED), AuthorizationStatus::Authorized);
        assert_eq!(AuthorizationStatus::from(EventStatus::RESTRICTED), AuthorizationStatus::Restricted);
        assert_eq!(AuthorizationStatus::from(MediaStatus::DENIED), AuthorizationStatus::Denied);
        assert_eq!(AuthorizationStatus::from(BluetoothStatus::ALLOWED_ALWAYS), AuthorizationStatus::Authorized);
        assert_eq!(AuthorizationStatus::from(MusicLibraryStatus::DENIED), AuthorizationStatus::Denied);
        assert_eq!(AuthorizationStatus::from(SpeechStatus::RESTRICTED), AuthorizationStatus::Restricted);
        assert_eq!(AuthorizationStatus::from(PhotosStatus::LIMITED), AuthorizationStatus::Limited);
        assert_eq!(AuthorizationStatus::from(HidAccess::GRANTED), AuthorizationStatus::Authorized);
        assert_eq!(AuthorizationStatus::from(HidAccess::DENIED), AuthorizationStatus::Denied);
    }

    #[test]
    fn unknown_members_are_not_determined() {
        for raw in [-1, 4, 5, 99] {
            assert_eq!(AuthorizationStatus::from(ContactsStatus(raw)), AuthorizationStatus::NotDetermined);
            assert_eq!(AuthorizationStatus::from(EventStatus(raw)), AuthorizationStatus::NotDetermined);
            assert_eq!(AuthorizationStatus::from(MediaStatus(raw)), AuthorizationStatus::NotDetermined);
            assert_eq!(AuthorizationStatus::from(BluetoothStatus(raw)), AuthorizationStatus::NotDetermined);
            assert_eq!(AuthorizationStatus::from(MusicLibraryStatus(raw)), AuthorizationStatus::NotDetermined);
            assert_eq!(AuthorizationStatus::from(SpeechStatus(raw)), AuthorizationStatus::NotDetermined);
        }
        assert_eq!(AuthorizationStatus::from(PhotosStatus(7)), AuthorizationStatus::NotDetermined);
        assert_eq!(AuthorizationStatus::from(HidAccess::UNKNOWN), AuthorizationStatus::NotDetermined);
        assert_eq!(AuthorizationStatus::from(HidAccess(42)), AuthorizationStatus::NotDetermined);
    }

    #[test]
    fn location_is_denial_biased() {
        assert_eq!(AuthorizationStatus::from(LocationStatus::AUTHORIZED), AuthorizationStatus::Authorized);
        for status in [
            LocationStatus::NOT_DETERMINED,
            LocationStatus::RESTRICTED,
            LocationStatus::DENIED,
            LocationStatus::AUTHORIZED_WHEN_IN_USE,
            LocationStatus(12),
        ] {
            assert_eq!(AuthorizationStatus::from(status), AuthorizationStatus::Denied);
        }
    }
}
