// Library exports for testing and for hosts embedding the module directly.
//
// Shared state uses `parking_lot::Mutex`; the script subprocess crate keeps
// `std::sync::Mutex` for its reader-thread buffers.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod appstate;
pub mod cli;
pub mod config {
    //! Configuration re-exports from the `appstate-config` crate.
    pub use appstate_config::*;
}
pub mod debug;
pub mod host;
pub mod relay;
pub mod scripting;

pub use appstate::AppStateModule;
