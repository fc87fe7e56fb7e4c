//! Detect the system authorization dialog and bring it to the front
//!
//! The consent prompt for accessibility is drawn by a separate agent process
//! and can open behind other windows. Detection polls a bounded number of
//! window snapshots; activation is a separate step so the loop stays testable.

use crate::oracle::{ProcessRegistry, WindowServer};
use crate::window::WindowRecord;
use std::time::Duration;
use tracing::{debug, warn};

/// Process that owns the accessibility authorization prompt.
pub const AUTH_DIALOG_OWNER: &str = "universalAccessAuthWarn";

/// Polling configuration
#[derive(Debug, Clone)]
pub struct DialogConfig {
    /// Snapshots to take before giving up
    pub attempts: u32,
    /// Pause between snapshots (not after the last one)
    pub interval: Duration,
    /// Owner process name of the dialog window
    pub owner_name: String,
    /// Stacking layer the dialog lives on
    pub layer: i64,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            attempts: 5,
            interval: Duration::from_millis(250),
            owner_name: AUTH_DIALOG_OWNER.to_string(),
            layer: 0,
        }
    }
}

impl DialogConfig {
    /// Upper bound on time spent sleeping in one detection run.
    pub fn max_wait(&self) -> Duration {
        self.interval * self.attempts.saturating_sub(1)
    }
}

/// Blocking pause between attempts.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Sleeps the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<T: Sleeper + ?Sized> Sleeper for &T {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// The dialog window in `windows`, if present.
pub fn find_dialog<'a>(windows: &'a [WindowRecord], config: &DialogConfig) -> Option<&'a WindowRecord> {
    windows
        .iter()
        .find(|w| w.layer == config.layer && w.owner_name == config.owner_name)
}

pub struct DialogDetector<W, P, S = ThreadSleeper> {
    windows: W,
    processes: P,
    sleeper: S,
    config: DialogConfig,
}

impl<W, P> DialogDetector<W, P, ThreadSleeper>
where
    W: WindowServer,
    P: ProcessRegistry,
{
    pub fn new(windows: W, processes: P) -> Self {
        Self::with_sleeper(windows, processes, ThreadSleeper)
    }
}

impl<W, P, S> DialogDetector<W, P, S>
where
    W: WindowServer,
    P: ProcessRegistry,
    S: Sleeper,
{
    pub fn with_sleeper(windows: W, processes: P, sleeper: S) -> Self {
        Self {
            windows,
            processes,
            sleeper,
            config: DialogConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DialogConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// Poll for the dialog. Returns the matching window from the first
    /// snapshot that contains it.
    pub fn detect(&self) -> Option<WindowRecord> {
        for attempt in 1..=self.config.attempts {
            let snapshot = self.windows.windows_above_self();
            if let Some(dialog) = find_dialog(&snapshot, &self.config) {
                debug!(attempt, pid = dialog.owner_pid, "authorization dialog on screen");
                return Some(dialog.clone());
            }

            if attempt < self.config.attempts {
                self.sleeper.sleep(self.config.interval);
            }
        }

        debug!(attempts = self.config.attempts, "authorization dialog not found");
        None
    }

    /// Activate the caller, then the dialog owner, so the dialog ends up frontmost.
    pub fn foreground(&self, dialog: &WindowRecord) {
        let own_pid = self.processes.current_pid();
        if !self.processes.activate(own_pid) {
            warn!(pid = own_pid, "could not activate current process");
        }
        if !self.processes.activate(dialog.owner_pid) {
            warn!(pid = dialog.owner_pid, owner = %dialog.owner_name, "could not activate dialog owner");
        }
    }

    /// Detect the dialog and foreground it if found.
    pub fn detect_and_foreground(&self) -> bool {
        match self.detect() {
            Some(dialog) => {
                self.foreground(&dialog);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    struct Snapshots {
        found_on: Option<u32>,
        captures: Cell<u32>,
    }

    impl WindowServer for Snapshots {
        fn all_windows(&self) -> Vec<WindowRecord> {
            Vec::new()
        }
        fn windows_above_self(&self) -> Vec<WindowRecord> {
            let n = self.captures.get() + 1;
            self.captures.set(n);
            let mut windows = vec![WindowRecord {
                owner_pid: 7,
                owner_name: "Finder".into(),
                name: Some("Desktop".into()),
                layer: 0,
            }];
            if self.found_on.is_some_and(|k| n >= k) {
                windows.push(WindowRecord {
                    owner_pid: 42,
                    owner_name: AUTH_DIALOG_OWNER.into(),
                    name: None,
                    layer: 0,
                });
            }
            windows
        }
    }

    #[derive(Default)]
    struct Processes {
        activated: RefCell<Vec<i32>>,
    }

    impl ProcessRegistry for Processes {
        fn current_pid(&self) -> i32 {
            1
        }
        fn executable_name(&self, _pid: i32) -> Option<String> {
            None
        }
        fn activate(&self, pid: i32) -> bool {
            self.activated.borrow_mut().push(pid);
            true
        }
    }

    #[derive(Default)]
    struct CountingSleeper {
        slept: RefCell<Vec<Duration>>,
    }

    impl Sleeper for CountingSleeper {
        fn sleep(&self, duration: Duration) {
            self.slept.borrow_mut().push(duration);
        }
    }

    fn snapshots(found_on: Option<u32>) -> Snapshots {
        Snapshots {
            found_on,
            captures: Cell::new(0),
        }
    }

    #[test]
    fn found_on_third_attempt() {
        let windows = snapshots(Some(3));
        let processes = Processes::default();
        let sleeper = CountingSleeper::default();

        let found = DialogDetector::with_sleeper(&windows, &processes, &sleeper).detect_and_foreground();

        assert!(found);
        assert_eq!(windows.captures.get(), 3);
        assert_eq!(sleeper.slept.borrow().len(), 2);
        assert_eq!(*processes.activated.borrow(), vec![1, 42]);
    }

    #[test]
    fn never_found_exhausts_attempts() {
        let windows = snapshots(None);
        let processes = Processes::default();
        let sleeper = CountingSleeper::default();

        let found = DialogDetector::with_sleeper(&windows, &processes, &sleeper).detect_and_foreground();

        assert!(!found);
        assert_eq!(windows.captures.get(), 5);
        assert_eq!(*sleeper.slept.borrow(), vec![Duration::from_millis(250); 4]);
        assert!(processes.activated.borrow().is_empty());
    }

    #[test]
    fn found_immediately_never_sleeps() {
        let windows = snapshots(Some(1));
        let processes = Processes::default();
        let sleeper = CountingSleeper::default();

        assert!(DialogDetector::with_sleeper(&windows, &processes, &sleeper).detect_and_foreground());
        assert_eq!(windows.captures.get(), 1);
        assert!(sleeper.slept.borrow().is_empty());
    }

    #[test]
    fn zero_attempts_does_nothing() {
        let windows = snapshots(Some(1));
        let processes = Processes::default();
        let sleeper = CountingSleeper::default();
        let config = DialogConfig {
            attempts: 0,
            ..Default::default()
        };

        let detector = DialogDetector::with_sleeper(&windows, &processes, &sleeper).with_config(config);
        assert!(!detector.detect_and_foreground());
        assert_eq!(windows.captures.get(), 0);
    }

    #[test]
    fn repeated_runs_share_no_state() {
        let windows = snapshots(Some(1));
        let processes = Processes::default();
        let sleeper = CountingSleeper::default();
        let detector = DialogDetector::with_sleeper(&windows, &processes, &sleeper);

        assert!(detector.detect_and_foreground());
        assert!(detector.detect_and_foreground());
        assert_eq!(*processes.activated.borrow(), vec![1, 42, 1, 42]);
    }

    #[test]
    fn match_requires_layer_and_exact_owner() {
        let config = DialogConfig::default();
        let windows = vec![
            WindowRecord {
                owner_pid: 5,
                owner_name: AUTH_DIALOG_OWNER.into(),
                name: None,
                layer: 3,
            },
            WindowRecord {
                owner_pid: 6,
                owner_name: "universalAccessAuthWarnX".into(),
                name: None,
                layer: 0,
            },
        ];
        assert!(find_dialog(&windows, &config).is_none());
        assert_eq!(config.max_wait(), Duration::from_millis(1000));
    }
}
