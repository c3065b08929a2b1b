// ── Core error types ──
//
// API failures pass through untouched so callers (and the store's error
// message) see exactly what the backend said. The remaining variants are
// raised by the router and the view loaders themselves.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] deskbook_api::Error),

    // ── Routing ──────────────────────────────────────────────────────
    #[error("No route matches {path}")]
    InvalidRoute { path: String },

    #[error("Redirect loop while resolving {path}")]
    RedirectLoop { path: String },

    // ── Data ─────────────────────────────────────────────────────────
    #[error("{entity} not found: {identifier}")]
    NotFound {
        entity: &'static str,
        identifier: String,
    },

    #[error("Desk {identifier} cannot be booked (status: {status})")]
    DeskUnavailable { identifier: String, status: String },

    #[error("No user to book for")]
    NoUser,

    #[error("No desk loaded; load the booking view first")]
    NoDeskLoaded,

    #[error("Another request for this view is still running")]
    Busy,
}

impl CoreError {
    /// HTTP status of the underlying API failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api(e) => e.is_not_found(),
            Self::NotFound { .. } => true,
            _ => false,
        }
    }
}
