//! # macperm
//!
//! Read the privacy permission state of the current process on macOS.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use macperm::prelude::*;
//!
//! let checker = macperm::checker()?;
//! let camera = checker.status_str("camera", None)?;
//! if !camera.is_authorized() {
//!     macperm::pane::open_privacy_pane("Privacy_Camera");
//! }
//! # Ok::<(), macperm::Error>(())
//! ```

// Re-export the engine
pub use macperm_core::*;

/// Prelude - import everything you need
pub mod prelude {
    pub use macperm_core::prelude::*;
    pub use macperm_core::dialog::DialogConfig;
}
