//! Native authorization status queries

use crate::capability::{EventKind, MediaKind, PhotosAccessLevel};
use crate::oracle::AuthorizationOracle;
use crate::status::{
    BluetoothStatus, ContactsStatus, EventStatus, HidAccess, LocationStatus, MediaStatus,
    MusicLibraryStatus, PhotosStatus, SpeechStatus,
};
use crate::version::OsVersion;
use cocoa::base::id;
use objc::runtime::Class;
use objc::{msg_send, sel, sel_impl};
use tracing::warn;

// Linking each framework registers its classes with the runtime.
#[link(name = "Contacts", kind = "framework")]
extern "C" {}
#[link(name = "EventKit", kind = "framework")]
extern "C" {}
#[link(name = "CoreLocation", kind = "framework")]
extern "C" {}
#[link(name = "Photos", kind = "framework")]
extern "C" {}
#[link(name = "Speech", kind = "framework")]
extern "C" {}
#[link(name = "StoreKit", kind = "framework")]
extern "C" {}
#[link(name = "CoreBluetooth", kind = "framework")]
extern "C" {}

#[link(name = "AVFoundation", kind = "framework")]
extern "C" {
    static AVMediaTypeVideo: id;
    static AVMediaTypeAudio: id;
}

#[link(name = "IOKit", kind = "framework")]
extern "C" {
    fn IOHIDCheckAccess(request_type: u32) -> u32;
}

#[link(name = "CoreGraphics", kind = "framework")]
extern "C" {
    fn CGPreflightScreenCaptureAccess() -> i32;
}

const CN_ENTITY_TYPE_CONTACTS: isize = 0;
const EK_ENTITY_TYPE_EVENT: usize = 0;
const EK_ENTITY_TYPE_REMINDER: usize = 1;
const PH_ACCESS_LEVEL_ADD_ONLY: isize = 1;
const PH_ACCESS_LEVEL_READ_WRITE: isize = 2;
const IOHID_REQUEST_TYPE_LISTEN_EVENT: u32 = 1;

/// Class lookup that tolerates a framework missing on this OS.
fn class(name: &str) -> Option<&'static Class> {
    let class = Class::get(name);
    if class.is_none() {
        warn!(class = name, "Objective-C class not available");
    }
    class
}

/// Live queries against the OS frameworks.
#[derive(Debug, Clone, Copy)]
pub struct NativeOracle {
    version: OsVersion,
}

impl NativeOracle {
    pub fn new(version: OsVersion) -> Self {
        Self { version }
    }
}

impl AuthorizationOracle for NativeOracle {
    fn contacts(&self) -> ContactsStatus {
        let Some(cls) = class("CNContactStore") else {
            return ContactsStatus::NOT_DETERMINED;
        };
        let raw: isize =
            unsafe { msg_send![cls, authorizationStatusForEntityType: CN_ENTITY_TYPE_CONTACTS] };
        ContactsStatus(raw)
    }

    fn events(&self, kind: EventKind) -> EventStatus {
        let Some(cls) = class("EKEventStore") else {
            return EventStatus::NOT_DETERMINED;
        };
        let entity = match kind {
            EventKind::Calendar => EK_ENTITY_TYPE_EVENT,
            EventKind::Reminders => EK_ENTITY_TYPE_REMINDER,
        };
        let raw: isize = unsafe { msg_send![cls, authorizationStatusForEntityType: entity] };
        EventStatus(raw)
    }

    fn media(&self, kind: MediaKind) -> MediaStatus {
        let Some(cls) = class("AVCaptureDevice") else {
            return MediaStatus::NOT_DETERMINED;
        };
        let media_type = unsafe {
            match kind {
                MediaKind::Camera => AVMediaTypeVideo,
                MediaKind::Microphone => AVMediaTypeAudio,
            }
        };
        let raw: isize = unsafe { msg_send![cls, authorizationStatusForMediaType: media_type] };
        MediaStatus(raw)
    }

    fn location(&self) -> LocationStatus {
        let Some(cls) = class("CLLocationManager") else {
            return LocationStatus::NOT_DETERMINED;
        };
        let raw: i32 = unsafe { msg_send![cls, authorizationStatus] };
        LocationStatus(raw)
    }

    fn photos(&self, level: PhotosAccessLevel) -> PhotosStatus {
        let Some(cls) = class("PHPhotoLibrary") else {
            return PhotosStatus::NOT_DETERMINED;
        };
        let raw: isize = if self.version.at_least(OsVersion::BIG_SUR) {
            let level = match level {
                PhotosAccessLevel::ReadOnly => PH_ACCESS_LEVEL_ADD_ONLY,
                PhotosAccessLevel::ReadWrite => PH_ACCESS_LEVEL_READ_WRITE,
            };
            unsafe { msg_send![cls, authorizationStatusForAccessLevel: level] }
        } else {
            unsafe { msg_send![cls, authorizationStatus] }
        };
        PhotosStatus(raw)
    }

    fn speech_recognition(&self) -> SpeechStatus {
        let Some(cls) = class("SFSpeechRecognizer") else {
            return SpeechStatus::NOT_DETERMINED;
        };
        let raw: isize = unsafe { msg_send![cls, authorizationStatus] };
        SpeechStatus(raw)
    }

    fn bluetooth(&self) -> BluetoothStatus {
        let Some(cls) = class("CBCentralManager") else {
            return BluetoothStatus::NOT_DETERMINED;
        };
        let raw: isize = unsafe { msg_send![cls, authorization] };
        BluetoothStatus(raw)
    }

    fn input_monitoring(&self) -> HidAccess {
        HidAccess(unsafe { IOHIDCheckAccess(IOHID_REQUEST_TYPE_LISTEN_EVENT) })
    }

    fn music_library(&self) -> MusicLibraryStatus {
        let Some(cls) = class("SKCloudServiceController") else {
            return MusicLibraryStatus::NOT_DETERMINED;
        };
        let raw: isize = unsafe { msg_send![cls, authorizationStatus] };
        MusicLibraryStatus(raw)
    }

    fn screen_capture_preflight(&self) -> bool {
        unsafe { (CGPreflightScreenCaptureAccess() & 1) == 1 }
    }

    fn accessibility_trusted(&self) -> bool {
        cidre::ax::is_process_trusted()
    }
}
