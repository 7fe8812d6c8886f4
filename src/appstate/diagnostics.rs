//! Diagnostics for events dropped at the channel guard.
//!
//! Two sinks exist. [`VerboseLogSink`] logs every drop at error level and is meant
//! for development. [`SoftReportSink`] files a non-fatal [`SoftReport`] so the
//! frequency of the teardown race stays observable in production. Neither sink
//! ever panics.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::Mutex;

use crate::config::DiagnosticsMode;

/// Tag attached to every diagnostic emitted by the app state module.
pub const TAG: &str = "AppState";

/// Why an event was not delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// The channel reported itself disconnected before the push.
    Disconnected,
    /// The channel accepted the push but the transport failed.
    Transport(String),
}

/// An event the guard refused or failed to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedEvent {
    pub event_name: String,
    pub reason: DropReason,
}

impl DroppedEvent {
    pub fn message(&self) -> String {
        match &self.reason {
            DropReason::Disconnected => format!(
                "trying to update app state when the subscriber channel has already disappeared: {}",
                self.event_name
            ),
            DropReason::Transport(detail) => format!(
                "failed to deliver app state event {}: {}",
                self.event_name, detail
            ),
        }
    }
}

/// Destination for dropped-event diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, dropped: &DroppedEvent);
}

/// Development sink: loud logging, nothing retained.
#[derive(Debug, Default)]
pub struct VerboseLogSink;

impl DiagnosticSink for VerboseLogSink {
    fn record(&self, dropped: &DroppedEvent) {
        log::error!(target: TAG, "{}", dropped.message());
    }
}

/// A non-fatal structured report.
#[derive(Debug, Clone, PartialEq)]
pub struct SoftReport {
    pub tag: &'static str,
    pub event_name: String,
    pub message: String,
    pub reported_at: SystemTime,
}

/// Production sink: keeps the most recent reports up to `capacity`.
pub struct SoftReportSink {
    capacity: usize,
    reports: Mutex<VecDeque<SoftReport>>,
    total: AtomicU64,
}

impl SoftReportSink {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            reports: Mutex::new(VecDeque::with_capacity(capacity)),
            total: AtomicU64::new(0),
        }
    }

    /// Retained reports, oldest first.
    pub fn reports(&self) -> Vec<SoftReport> {
        self.reports.lock().iter().cloned().collect()
    }

    /// Number of reports filed since construction, including evicted ones.
    pub fn total_reported(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}

impl DiagnosticSink for SoftReportSink {
    fn record(&self, dropped: &DroppedEvent) {
        let report = SoftReport {
            tag: TAG,
            event_name: dropped.event_name.clone(),
            message: dropped.message(),
            reported_at: SystemTime::now(),
        };
        log::warn!(target: TAG, "soft report: {}", report.message);

        let mut reports = self.reports.lock();
        if reports.len() == self.capacity {
            reports.pop_front();
        }
        reports.push_back(report);
        self.total.fetch_add(1, Ordering::Relaxed);
    }
}

/// The sink chosen for a diagnostics mode, kept concrete so the production
/// report count stays readable after the module takes its shared handle.
#[derive(Clone)]
pub enum ModeSink {
    Verbose(Arc<VerboseLogSink>),
    SoftReport(Arc<SoftReportSink>),
}

impl ModeSink {
    /// Shared handle to hand to [`crate::AppStateModule::new`].
    pub fn as_sink(&self) -> Arc<dyn DiagnosticSink> {
        match self {
            ModeSink::Verbose(sink) => Arc::clone(sink) as Arc<dyn DiagnosticSink>,
            ModeSink::SoftReport(sink) => Arc::clone(sink) as Arc<dyn DiagnosticSink>,
        }
    }

    pub fn soft_reports(&self) -> Option<&SoftReportSink> {
        match self {
            ModeSink::Verbose(_) => None,
            ModeSink::SoftReport(sink) => Some(sink),
        }
    }
}

/// Pick the sink for a diagnostics mode.
pub fn sink_for_mode(mode: DiagnosticsMode, soft_report_capacity: usize) -> ModeSink {
    match mode {
        DiagnosticsMode::Development => ModeSink::Verbose(Arc::new(VerboseLogSink)),
        DiagnosticsMode::Production => {
            ModeSink::SoftReport(Arc::new(SoftReportSink::new(soft_report_capacity)))
        }
    }
}
