//! Capabilities guarded by the OS privacy database
//!
//! Names:
//!   contacts, location, bluetooth, accessibility
//!   calendar | reminders          - event store entities (family: event)
//!   camera | microphone           - capture devices (family: media)
//!   photos-read-only | photos-read-write
//!                                 - photo library access level (family: photos)
//!   speech-recognition, input-monitoring, music-library
//!   full-disk-access, screen

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every accepted kind name, families included.
pub const KIND_NAMES: &[&str] = &[
    "accessibility",
    "bluetooth",
    "calendar",
    "camera",
    "contacts",
    "event",
    "full-disk-access",
    "input-monitoring",
    "location",
    "media",
    "microphone",
    "music-library",
    "photos",
    "photos-add-only",
    "photos-read-only",
    "photos-read-write",
    "reminders",
    "screen",
    "speech-recognition",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Calendar,
    Reminders,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaKind {
    Camera,
    Microphone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhotosAccessLevel {
    /// Add-only in the Photos framework's terms.
    ReadOnly,
    ReadWrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "param", rename_all = "kebab-case")]
pub enum Capability {
    Contacts,
    Event(EventKind),
    Media(MediaKind),
    Location,
    Photos(PhotosAccessLevel),
    SpeechRecognition,
    Bluetooth,
    InputMonitoring,
    MusicLibrary,
    FullDiskAccess,
    ScreenCapture,
    Accessibility,
}

impl Capability {
    /// Every concrete capability, parameters expanded.
    pub fn all() -> Vec<Capability> {
        vec![
            Capability::Accessibility,
            Capability::Bluetooth,
            Capability::Event(EventKind::Calendar),
            Capability::Media(MediaKind::Camera),
            Capability::Contacts,
            Capability::FullDiskAccess,
            Capability::InputMonitoring,
            Capability::Location,
            Capability::Media(MediaKind::Microphone),
            Capability::MusicLibrary,
            Capability::Photos(PhotosAccessLevel::ReadOnly),
            Capability::Photos(PhotosAccessLevel::ReadWrite),
            Capability::Event(EventKind::Reminders),
            Capability::ScreenCapture,
            Capability::SpeechRecognition,
        ]
    }

    /// Parse a kind name with an optional sub-kind.
    ///
    /// Family names (`media`, `event`, `photos`) take the parameter; a missing
    /// parameter selects camera, reminders and read-only respectively.
    /// Concrete names reject any parameter that contradicts them. Names are
    /// matched exactly; case and surrounding whitespace are not normalized.
    pub fn parse(kind: &str, param: Option<&str>) -> Result<Self> {
        let param = param.filter(|p| !p.is_empty());

        match kind {
            "media" => return Ok(Capability::Media(parse_media(kind, param)?)),
            "event" => return Ok(Capability::Event(parse_event(kind, param)?)),
            "photos" => return Ok(Capability::Photos(parse_photos(kind, param)?)),
            _ => {}
        }

        let capability = concrete(kind).ok_or_else(|| Error::invalid_capability(kind))?;

        // A parameter on a concrete name must agree with it.
        if let Some(p) = param {
            let reparsed = match capability {
                Capability::Media(_) => parse_media(kind, Some(p)).ok().map(Capability::Media),
                Capability::Event(_) => parse_event(kind, Some(p)).ok().map(Capability::Event),
                Capability::Photos(_) => parse_photos(kind, Some(p)).ok().map(Capability::Photos),
                _ => None,
            };
            if reparsed != Some(capability) {
                return Err(Error::invalid_parameter(kind, p, &[]));
            }
        }

        Ok(capability)
    }

    /// Identifier of the Security & Privacy pane listing this capability.
    pub fn privacy_pane(&self) -> &'static str {
        match self {
            Capability::Contacts => "Privacy_Contacts",
            Capability::Event(EventKind::Calendar) => "Privacy_Calendars",
            Capability::Event(EventKind::Reminders) => "Privacy_Reminders",
            Capability::Media(MediaKind::Camera) => "Privacy_Camera",
            Capability::Media(MediaKind::Microphone) => "Privacy_Microphone",
            Capability::Location => "Privacy_LocationServices",
            Capability::Photos(_) => "Privacy_Photos",
            Capability::SpeechRecognition => "Privacy_SpeechRecognition",
            Capability::Bluetooth => "Privacy_Bluetooth",
            Capability::InputMonitoring => "Privacy_ListenEvent",
            Capability::MusicLibrary => "Privacy_Media",
            Capability::FullDiskAccess => "Privacy_AllFiles",
            Capability::ScreenCapture => "Privacy_ScreenCapture",
            Capability::Accessibility => "Privacy_Accessibility",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Contacts => "contacts",
            Capability::Event(EventKind::Calendar) => "calendar",
            Capability::Event(EventKind::Reminders) => "reminders",
            Capability::Media(MediaKind::Camera) => "camera",
            Capability::Media(MediaKind::Microphone) => "microphone",
            Capability::Location => "location",
            Capability::Photos(PhotosAccessLevel::ReadOnly) => "photos-read-only",
            Capability::Photos(PhotosAccessLevel::ReadWrite) => "photos-read-write",
            Capability::SpeechRecognition => "speech-recognition",
            Capability::Bluetooth => "bluetooth",
            Capability::InputMonitoring => "input-monitoring",
            Capability::MusicLibrary => "music-library",
            Capability::FullDiskAccess => "full-disk-access",
            Capability::ScreenCapture => "screen",
            Capability::Accessibility => "accessibility",
        };
        f.write_str(name)
    }
}

fn concrete(name: &str) -> Option<Capability> {
    let capability = match name {
        "camera" => Capability::Media(MediaKind::Camera),
        "microphone" => Capability::Media(MediaKind::Microphone),
        "calendar" => Capability::Event(EventKind::Calendar),
        "reminders" => Capability::Event(EventKind::Reminders),
        "photos-add-only" | "photos-read-only" => Capability::Photos(PhotosAccessLevel::ReadOnly),
        "photos-read-write" => Capability::Photos(PhotosAccessLevel::ReadWrite),
        "contacts" => Capability::Contacts,
        "location" => Capability::Location,
        "speech-recognition" => Capability::SpeechRecognition,
        "bluetooth" => Capability::Bluetooth,
        "input-monitoring" => Capability::InputMonitoring,
        "music-library" => Capability::MusicLibrary,
        "full-disk-access" => Capability::FullDiskAccess,
        "screen" => Capability::ScreenCapture,
        "accessibility" => Capability::Accessibility,
        _ => return None,
    };
    Some(capability)
}

fn parse_media(kind: &str, param: Option<&str>) -> Result<MediaKind> {
    match param {
        None | Some("camera") => Ok(MediaKind::Camera),
        Some("microphone") => Ok(MediaKind::Microphone),
        Some(p) => Err(Error::invalid_parameter(kind, p, &["camera", "microphone"])),
    }
}

fn parse_event(kind: &str, param: Option<&str>) -> Result<EventKind> {
    match param {
        None | Some("reminders") => Ok(EventKind::Reminders),
        Some("calendar") => Ok(EventKind::Calendar),
        Some(p) => Err(Error::invalid_parameter(kind, p, &["calendar", "reminders"])),
    }
}

fn parse_photos(kind: &str, param: Option<&str>) -> Result<PhotosAccessLevel> {
    match param {
        None | Some("read-only") | Some("add-only") => Ok(PhotosAccessLevel::ReadOnly),
        Some("read-write") => Ok(PhotosAccessLevel::ReadWrite),
        Some(p) => Err(Error::invalid_parameter(
            kind,
            p,
            &["read-only", "add-only", "read-write"],
        )),
    }
}
