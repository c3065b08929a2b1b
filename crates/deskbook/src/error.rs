//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use deskbook_api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use deskbook_config::ConfigError;
use deskbook_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the booking backend at {url}")]
    #[diagnostic(
        code(deskbook::connection_failed),
        help("Check that the backend is running and listening on {url}.")
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: deskbook_api::Error,
    },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(deskbook::timeout),
        help("The backend did not answer in time. Try again once it is responsive.")
    )]
    Timeout { seconds: u64 },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(deskbook::not_found),
        help("Run: deskbook {list_command} to see what is available")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Desk {identifier} cannot be booked (status: {status})")]
    #[diagnostic(
        code(deskbook::desk_unavailable),
        help("Pick a desk whose status is 'available'.")
    )]
    DeskUnavailable { identifier: String, status: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Backend rejected the request (HTTP {status})")]
    #[diagnostic(code(deskbook::api_error), help("{body}"))]
    Api { status: u16, url: String, body: String },

    #[error("Unexpected response from the backend: {message}")]
    #[diagnostic(code(deskbook::bad_response))]
    BadResponse { message: String },

    // ── Navigation ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(deskbook::route), help("Run: deskbook routes to see the known paths"))]
    Route { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(deskbook::validation))]
    Validation { field: String, reason: String },

    #[error("No user to book for")]
    #[diagnostic(
        code(deskbook::no_user),
        help("Pass --user <ID>, set booking.user_id in the config file, or use --quick.")
    )]
    NoUser,

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(deskbook::config))]
    Config(#[from] ConfigError),

    // ── Other ────────────────────────────────────────────────────────
    #[error("{0}")]
    #[diagnostic(code(deskbook::general))]
    General(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::DeskUnavailable { .. } => exit_code::CONFLICT,
            Self::Api { status, .. } if *status == 409 => exit_code::CONFLICT,
            Self::Route { .. } | Self::Validation { .. } | Self::NoUser => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Api(e) => e.into(),

            CoreError::InvalidRoute { path } => CliError::Route {
                message: format!("No route matches {path}"),
            },

            CoreError::RedirectLoop { path } => CliError::Route {
                message: format!("Redirect loop while resolving {path}"),
            },

            CoreError::NotFound { entity, identifier } => CliError::NotFound {
                list_command: list_command_for(entity).into(),
                resource_type: entity.into(),
                identifier,
            },

            CoreError::DeskUnavailable { identifier, status } => {
                CliError::DeskUnavailable { identifier, status }
            }

            CoreError::NoUser => CliError::NoUser,

            other @ (CoreError::NoDeskLoaded | CoreError::Busy) => {
                CliError::General(other.to_string())
            }
        }
    }
}

impl From<deskbook_api::Error> for CliError {
    fn from(err: deskbook_api::Error) -> Self {
        match err {
            deskbook_api::Error::Transport(ref e) if e.is_timeout() => CliError::Timeout {
                seconds: DEFAULT_TIMEOUT.as_secs(),
            },
            deskbook_api::Error::Transport(ref e) if e.is_connect() => CliError::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| DEFAULT_BASE_URL.to_owned(), ToString::to_string),
                source: err,
            },
            deskbook_api::Error::Http { status: 404, url, .. } => CliError::NotFound {
                resource_type: "resource".into(),
                identifier: url,
                list_command: "areas".into(),
            },
            deskbook_api::Error::Http { status, url, body } => CliError::Api { status, url, body },
            deskbook_api::Error::Deserialization { message, .. } => {
                CliError::BadResponse { message }
            }
            other => CliError::General(other.to_string()),
        }
    }
}

fn list_command_for(entity: &str) -> &'static str {
    match entity {
        "reservation" => "reservations list",
        "user" => "users",
        _ => "areas",
    }
}
