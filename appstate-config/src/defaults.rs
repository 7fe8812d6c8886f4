//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on config fields.

use crate::types::DiagnosticsMode;

pub fn bool_true() -> bool {
    true
}

/// Debug builds report loudly, release builds file soft reports.
pub fn diagnostics_mode() -> DiagnosticsMode {
    if cfg!(debug_assertions) {
        DiagnosticsMode::Development
    } else {
        DiagnosticsMode::Production
    }
}

pub fn soft_report_capacity() -> usize {
    64
}
