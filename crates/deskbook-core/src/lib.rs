// deskbook-core: shared booking state, routing and view loading between
// deskbook-api and the CLI.

pub mod error;
pub mod router;
pub mod store;
pub mod stream;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use router::{
    ROUTES, Route, RouteMatch, RouteParams, RouteTarget, Router, ViewKind, ViewProps,
    document_title,
};
pub use store::{
    AreaTotals, BookingState, BookingStore, Breadcrumb, Collection, FetchTicket, Fetched, LookupId,
};
pub use stream::{StoreStream, StoreWatchStream};
pub use view::{
    AreasView, BookingRequest, BookingView, DesksView, LoadOutcome, RoomsView, View, ViewContext,
    ViewScope,
};

// Re-export API types at the crate root so consumers need one import path.
pub use deskbook_api::{
    ApiClient, Area, Desk, DeskStatus, NewReservation, Reservation, ReservationStatus,
    ReservationUpdate, Room, User,
};
