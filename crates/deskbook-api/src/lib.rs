//! Async client for the workspace booking REST API.
//!
//! A single [`ApiClient`] covers every backend resource (areas, rooms,
//! desks, users, reservations). Each method issues exactly one HTTP request
//! against the fixed base URL and returns the parsed body. Requests,
//! responses and failures are logged through `tracing`; failures come back
//! as [`Error`] untouched, with no retry.
//!
//! ```no_run
//! # async fn demo() -> Result<(), deskbook_api::Error> {
//! let api = deskbook_api::ApiClient::new()?;
//! for area in api.fetch_areas().await? {
//!     println!("{} ({} desks)", area.name, area.desk_count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::Error;
pub use models::{
    Area, Desk, DeskStatus, NewReservation, QuickBookRequest, QuickBookResponse, Reservation,
    ReservationStatus, ReservationUpdate, Room, User,
};
pub use transport::{DEFAULT_TIMEOUT, TransportConfig};
