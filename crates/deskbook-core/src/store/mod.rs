// ── Booking store ──
//
// Single shared snapshot of what the UI currently shows. The state lives in
// a `watch` channel: every setter is one `send_modify`, so subscribers see
// each mutation and readers always get a consistent snapshot.

mod lookup;
mod sequence;
mod state;

use tokio::sync::watch;
use tracing::{debug, error, warn};

pub use lookup::LookupId;
pub use sequence::{Collection, FetchTicket, Fetched};
pub use state::{AreaTotals, BookingState, Breadcrumb};

use sequence::TicketCounter;

use crate::stream::StoreStream;
use crate::{Area, Desk, Reservation, Room};

/// Reactive booking state shared between views.
///
/// Construct one per session and hand it to views behind an `Arc`; tests
/// build isolated instances. Setters never validate their arguments and
/// never fail. The only enforced rule is the cascade of the navigation
/// context: selecting an area clears room and desk, selecting a room
/// clears the desk.
#[derive(Debug)]
pub struct BookingStore {
    state: watch::Sender<BookingState>,
    tickets: TicketCounter,
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(BookingState::default());
        Self {
            state,
            tickets: TicketCounter::default(),
        }
    }

    // ── Navigation context ───────────────────────────────────────────

    pub fn set_current_area(&self, area: Option<Area>) {
        self.state.send_modify(|s| {
            s.current_area = area;
            s.current_room = None;
            s.current_desk = None;
        });
    }

    pub fn set_current_room(&self, room: Option<Room>) {
        self.state.send_modify(|s| {
            if room.is_some() && s.current_area.is_none() {
                warn!("room selected without a current area");
            }
            s.current_room = room;
            s.current_desk = None;
        });
    }

    pub fn set_current_desk(&self, desk: Option<Desk>) {
        self.state.send_modify(|s| s.current_desk = desk);
    }

    // ── Collections ──────────────────────────────────────────────────

    pub fn set_areas(&self, areas: Vec<Area>) {
        self.state.send_modify(|s| s.areas = areas);
    }

    pub fn set_rooms(&self, rooms: Vec<Room>) {
        self.state.send_modify(|s| s.rooms = rooms);
    }

    pub fn set_desks(&self, desks: Vec<Desk>) {
        self.state.send_modify(|s| s.desks = desks);
    }

    pub fn set_reservations(&self, reservations: Vec<Reservation>) {
        self.state.send_modify(|s| s.reservations = reservations);
    }

    /// Start a sequenced fetch of `collection`.
    pub fn begin_fetch(&self, collection: Collection) -> FetchTicket {
        self.tickets.next(collection)
    }

    /// Replace a collection with fetched data unless a fetch started later
    /// has already been applied. Returns whether the data was applied.
    pub fn apply_fetched(&self, ticket: FetchTicket, data: Fetched) -> bool {
        if ticket.collection != data.collection() {
            warn!(
                ticket = ?ticket.collection,
                data = ?data.collection(),
                "fetch ticket does not match fetched collection"
            );
            return false;
        }

        let applied = self.state.send_if_modified(|s| {
            if !s.applied.admit(ticket) {
                return false;
            }
            match data {
                Fetched::Areas(v) => s.areas = v,
                Fetched::Rooms(v) => s.rooms = v,
                Fetched::Desks(v) => s.desks = v,
                Fetched::Reservations(v) => s.reservations = v,
            }
            true
        });

        if !applied {
            debug!(
                collection = ?ticket.collection,
                seq = ticket.seq,
                "discarding stale fetch result"
            );
        }
        applied
    }

    // ── UI flags ─────────────────────────────────────────────────────

    pub fn set_loading(&self, loading: bool) {
        debug!(loading, "store loading flag");
        self.state.send_modify(|s| s.is_loading = loading);
    }

    pub fn set_error(&self, message: Option<String>) {
        debug!(error = ?message, "store error");
        if let Some(msg) = &message {
            error!(error = %msg, "store error set");
        }
        self.state.send_modify(|s| s.error = message);
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Clone of the full current state.
    pub fn snapshot(&self) -> BookingState {
        self.state.borrow().clone()
    }

    pub fn current_area(&self) -> Option<Area> {
        self.state.borrow().current_area.clone()
    }

    pub fn current_room(&self) -> Option<Room> {
        self.state.borrow().current_room.clone()
    }

    pub fn current_desk(&self) -> Option<Desk> {
        self.state.borrow().current_desk.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn get_area_by_id(&self, id: impl LookupId) -> Option<Area> {
        let key = id.lookup_key()?;
        self.state.borrow().areas.iter().find(|a| a.id == key).cloned()
    }

    pub fn get_room_by_id(&self, id: impl LookupId) -> Option<Room> {
        let key = id.lookup_key()?;
        self.state.borrow().rooms.iter().find(|r| r.id == key).cloned()
    }

    pub fn get_desk_by_id(&self, id: impl LookupId) -> Option<Desk> {
        let key = id.lookup_key()?;
        self.state.borrow().desks.iter().find(|d| d.id == key).cloned()
    }

    pub fn get_reservation_by_id(&self, id: impl LookupId) -> Option<Reservation> {
        let key = id.lookup_key()?;
        self.state
            .borrow()
            .reservations
            .iter()
            .find(|r| r.id == key)
            .cloned()
    }

    /// Navigation trail for the current selection, rebuilt on every call.
    pub fn get_breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.state.borrow().breadcrumbs()
    }

    pub fn area_totals(&self) -> AreaTotals {
        self.state.borrow().area_totals()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    /// Raw receiver for `select!` loops.
    pub fn watch(&self) -> watch::Receiver<BookingState> {
        self.state.subscribe()
    }

    /// Subscription handle that yields a snapshot on every mutation.
    pub fn subscribe(&self) -> StoreStream {
        StoreStream::new(self.state.subscribe())
    }
}
