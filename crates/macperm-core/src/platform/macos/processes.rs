//! Running applications via NSRunningApplication

use crate::oracle::ProcessRegistry;
use cocoa::base::{id, nil, BOOL, YES};
use cocoa::foundation::{NSAutoreleasePool, NSString};
use objc::{class, msg_send, sel, sel_impl};
use std::ffi::CStr;

const NS_APPLICATION_ACTIVATE_ALL_WINDOWS: usize = 1 << 0;

#[derive(Debug, Clone, Copy, Default)]
pub struct AppKitProcesses;

impl ProcessRegistry for AppKitProcesses {
    fn current_pid(&self) -> i32 {
        std::process::id() as i32
    }

    fn executable_name(&self, pid: i32) -> Option<String> {
        unsafe {
            let pool = NSAutoreleasePool::new(nil);
            let name = running_app(pid).and_then(|app| {
                let url: id = msg_send![app, executableURL];
                if url.is_null() {
                    return None;
                }
                let component: id = msg_send![url, lastPathComponent];
                to_string(component)
            });
            pool.drain();
            name
        }
    }

    fn activate(&self, pid: i32) -> bool {
        unsafe {
            let pool = NSAutoreleasePool::new(nil);
            let issued = running_app(pid).is_some_and(|app| {
                let issued: BOOL =
                    msg_send![app, activateWithOptions: NS_APPLICATION_ACTIVATE_ALL_WINDOWS];
                issued == YES
            });
            pool.drain();
            issued
        }
    }
}

unsafe fn running_app(pid: i32) -> Option<id> {
    let app: id = msg_send![
        class!(NSRunningApplication),
        runningApplicationWithProcessIdentifier: pid
    ];
    (!app.is_null()).then_some(app)
}

unsafe fn to_string(string: id) -> Option<String> {
    if string.is_null() {
        return None;
    }
    let cstr = NSString::UTF8String(string);
    if cstr.is_null() {
        return None;
    }
    Some(CStr::from_ptr(cstr).to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_pid_is_neither_named_nor_activated() {
        for _ in 0..3 {
            assert_eq!(AppKitProcesses.executable_name(-1), None);
            assert!(!AppKitProcesses.activate(-1));
        }
    }

    #[test]
    fn current_pid_matches_process() {
        assert_eq!(AppKitProcesses.current_pid(), std::process::id() as i32);
    }
}
