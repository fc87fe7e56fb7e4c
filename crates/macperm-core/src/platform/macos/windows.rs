//! Window server snapshots via CGWindowListCopyWindowInfo

use crate::oracle::WindowServer;
use crate::window::WindowRecord;
use core_foundation::{
    base::FromVoid,
    dictionary::CFDictionary,
    number::CFNumber,
    string::CFString,
};
use core_graphics::window::{
    kCGNullWindowID, kCGWindowLayer, kCGWindowListOptionAll,
    kCGWindowListOptionOnScreenAboveWindow, kCGWindowName, kCGWindowOwnerName,
    kCGWindowOwnerPID, CGWindowListOption,
};
use std::ffi::c_void;

#[derive(Debug, Clone, Copy, Default)]
pub struct CgWindowServer;

impl WindowServer for CgWindowServer {
    fn all_windows(&self) -> Vec<WindowRecord> {
        snapshot(kCGWindowListOptionAll)
    }

    fn windows_above_self(&self) -> Vec<WindowRecord> {
        // With a null window id the list covers everything on screen above
        // the caller's own windows.
        snapshot(kCGWindowListOptionOnScreenAboveWindow)
    }
}

fn snapshot(option: CGWindowListOption) -> Vec<WindowRecord> {
    let Some(windows) = core_graphics::window::copy_window_info(option, kCGNullWindowID) else {
        return vec![];
    };

    windows
        .iter()
        .filter_map(|window| unsafe { record(*window) })
        .collect()
}

unsafe fn record(raw: *const c_void) -> Option<WindowRecord> {
    if raw.is_null() {
        return None;
    }

    let dict = CFDictionary::<CFString, *const c_void>::from_void(raw);

    let owner_pid = dict
        .find(kCGWindowOwnerPID)
        .and_then(|v| CFNumber::from_void(*v).to_i32())?;
    let owner_name = dict
        .find(kCGWindowOwnerName)
        .map(|v| CFString::from_void(*v).to_string())
        .unwrap_or_default();
    let name = dict
        .find(kCGWindowName)
        .map(|v| CFString::from_void(*v).to_string());
    let layer = dict
        .find(kCGWindowLayer)
        .and_then(|v| CFNumber::from_void(*v).to_i64())
        .unwrap_or_default();

    Some(WindowRecord {
        owner_pid,
        owner_name,
        name,
        layer,
    })
}
