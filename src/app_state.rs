//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;

use crate::ledger::Ledger;

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The transactions and categories, shared between requests.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl AppState {
    /// Create a new [AppState] around a loaded [Ledger].
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    pub fn new(ledger: Ledger, local_timezone: &str) -> Self {
        Self {
            local_timezone: local_timezone.to_owned(),
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }
}

/// The state needed by handlers that read or change the ledger.
#[derive(Clone)]
pub struct LedgerState {
    /// The transactions and categories, shared between requests.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for LedgerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// The state needed by handlers that also depend on today's date.
#[derive(Clone)]
pub struct DatedLedgerState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The transactions and categories, shared between requests.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for DatedLedgerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            ledger: state.ledger.clone(),
        }
    }
}
