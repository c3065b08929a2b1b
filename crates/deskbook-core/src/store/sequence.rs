// ── Fetch sequencing ──
//
// Each collection hands out monotonically increasing tickets when a fetch
// starts. A response may only overwrite its collection if no newer ticket
// has been applied in the meantime, so a slow early fetch cannot clobber a
// fast later one.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::{Area, Desk, Reservation, Room};

/// The four wholesale-replaced collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Areas,
    Rooms,
    Desks,
    Reservations,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Self::Areas,
        Self::Rooms,
        Self::Desks,
        Self::Reservations,
    ];

    const fn index(self) -> usize {
        match self {
            Self::Areas => 0,
            Self::Rooms => 1,
            Self::Desks => 2,
            Self::Reservations => 3,
        }
    }
}

/// Proof that a fetch for `collection` was started at position `seq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub collection: Collection,
    pub seq: u64,
}

/// A fetched collection, ready to be applied with its ticket.
#[derive(Debug, Clone)]
pub enum Fetched {
    Areas(Vec<Area>),
    Rooms(Vec<Room>),
    Desks(Vec<Desk>),
    Reservations(Vec<Reservation>),
}

impl Fetched {
    pub fn collection(&self) -> Collection {
        match self {
            Self::Areas(_) => Collection::Areas,
            Self::Rooms(_) => Collection::Rooms,
            Self::Desks(_) => Collection::Desks,
            Self::Reservations(_) => Collection::Reservations,
        }
    }
}

/// Ticket dispenser, one counter per collection.
#[derive(Debug, Default)]
pub(crate) struct TicketCounter {
    issued: [AtomicU64; 4],
}

impl TicketCounter {
    pub(crate) fn next(&self, collection: Collection) -> FetchTicket {
        let seq = self.issued[collection.index()].fetch_add(1, Ordering::SeqCst) + 1;
        FetchTicket { collection, seq }
    }
}

/// Highest ticket applied per collection. Lives inside the watched state
/// so the check-and-apply happens under the same write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct AppliedMarks([u64; 4]);

impl AppliedMarks {
    /// Record `ticket` if it is newer than anything applied so far.
    pub(crate) fn admit(&mut self, ticket: FetchTicket) -> bool {
        let slot = &mut self.0[ticket.collection.index()];
        if ticket.seq > *slot {
            *slot = ticket.seq;
            true
        } else {
            false
        }
    }
}
