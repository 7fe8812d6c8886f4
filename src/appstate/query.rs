//! Synchronous accessors over the tracked state.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::lifecycle::LifecycleTracker;
use super::state::{AppLifecycleState, AppStateSnapshot};

/// Constant name under which the initial state is exposed.
pub const INITIAL_STATE: &str = "initialAppState";

/// Error slot of the query accessor. Uninhabited: no query can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {}

impl std::fmt::Display for QueryError {
    fn fmt(&self, _f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {}
    }
}

impl std::error::Error for QueryError {}

pub struct QueryApi {
    tracker: Arc<LifecycleTracker>,
    initial: AppLifecycleState,
}

impl QueryApi {
    /// `initial` is frozen here and never follows later transitions.
    pub fn new(tracker: Arc<LifecycleTracker>, initial: AppLifecycleState) -> Self {
        Self { tracker, initial }
    }

    pub fn initial_app_state(&self) -> AppLifecycleState {
        self.initial
    }

    /// Constants map read by the subscriber before any call is dispatched.
    pub fn constants(&self) -> Map<String, Value> {
        let mut constants = Map::new();
        constants.insert(
            INITIAL_STATE.to_string(),
            Value::String(self.initial.as_str().to_string()),
        );
        constants
    }

    pub fn current_app_state(&self) -> Result<AppStateSnapshot, QueryError> {
        Ok(AppStateSnapshot::new(self.tracker.current_state()))
    }

    /// Two-continuation form of [`current_app_state`](Self::current_app_state).
    ///
    /// `success` always runs; `error` is kept for the bridge call convention and
    /// can never be invoked.
    pub fn get_current_app_state<S, E>(&self, success: S, error: E)
    where
        S: FnOnce(AppStateSnapshot),
        E: FnOnce(QueryError),
    {
        self.current_app_state().map_or_else(error, success);
    }
}
