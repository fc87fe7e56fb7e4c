//! Per-capability, per-OS-version path selection
//!
//! Each capability owns an ordered rule list, newest gate first. The first rule
//! whose gate the running version meets wins; a version below every gate (or a
//! capability without rules) is unconditionally authorized, since the OS could
//! not have restricted it yet.

use crate::capability::Capability;
use crate::version::OsVersion;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Heuristic {
    /// Sentinel file reads (full disk access).
    FileProbe,
    /// Foreign window titles (screen capture before a preflight API existed).
    WindowSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    NativeQuery,
    AlwaysAuthorized,
    Heuristic(Heuristic),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Inclusive lower bound.
    pub since: OsVersion,
    pub strategy: Strategy,
}

const fn rule(since: OsVersion, strategy: Strategy) -> Rule {
    Rule { since, strategy }
}

const NATIVE_ALWAYS: &[Rule] = &[rule(OsVersion::MIN, Strategy::NativeQuery)];
const NATIVE_MOJAVE: &[Rule] = &[rule(OsVersion::MOJAVE, Strategy::NativeQuery)];
const NATIVE_CATALINA: &[Rule] = &[rule(OsVersion::CATALINA, Strategy::NativeQuery)];
const NATIVE_BIG_SUR: &[Rule] = &[rule(OsVersion::BIG_SUR, Strategy::NativeQuery)];
const FILE_PROBE: &[Rule] = &[rule(OsVersion::MIN, Strategy::Heuristic(Heuristic::FileProbe))];
const SCREEN: &[Rule] = &[
    rule(OsVersion::BIG_SUR, Strategy::NativeQuery),
    rule(OsVersion::CATALINA, Strategy::Heuristic(Heuristic::WindowSnapshot)),
];

/// The rule table, newest gate first per capability.
pub fn rules(capability: Capability) -> &'static [Rule] {
    match capability {
        Capability::Contacts
        | Capability::Event(_)
        | Capability::Location
        | Capability::Photos(_)
        | Capability::Accessibility => NATIVE_ALWAYS,
        Capability::Media(_) => NATIVE_MOJAVE,
        Capability::Bluetooth | Capability::InputMonitoring | Capability::SpeechRecognition => {
            NATIVE_CATALINA
        }
        Capability::MusicLibrary => NATIVE_BIG_SUR,
        Capability::FullDiskAccess => FILE_PROBE,
        Capability::ScreenCapture => SCREEN,
    }
}

/// Select exactly one strategy for `capability` on `version`.
pub fn select(capability: Capability, version: OsVersion) -> Strategy {
    select_from(rules(capability), version)
}

pub fn select_from(rules: &[Rule], version: OsVersion) -> Strategy {
    rules
        .iter()
        .find(|r| version.at_least(r.since))
        .map(|r| r.strategy)
        .unwrap_or(Strategy::AlwaysAuthorized)
}
