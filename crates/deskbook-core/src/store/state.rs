// ── Store snapshot types ──

use serde::Serialize;

use super::sequence::AppliedMarks;
use crate::{Area, Desk, Reservation, Room};

/// Everything the UI currently shows: the last-fetched collections, the
/// selected area/room/desk, and the transient loading/error flags.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BookingState {
    // Navigation context
    pub current_area: Option<Area>,
    pub current_room: Option<Room>,
    pub current_desk: Option<Desk>,

    // Collections, replaced wholesale on every fetch
    pub areas: Vec<Area>,
    pub rooms: Vec<Room>,
    pub desks: Vec<Desk>,
    pub reservations: Vec<Reservation>,

    // UI flags
    pub is_loading: bool,
    pub error: Option<String>,

    #[serde(skip)]
    pub(crate) applied: AppliedMarks,
}

/// One step of the navigation trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub name: String,
    pub path: String,
}

impl Breadcrumb {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Summary counts over the loaded areas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AreaTotals {
    pub areas: usize,
    pub rooms: u64,
    pub desks: u64,
}

impl BookingState {
    /// Build the breadcrumb trail for the current selection.
    ///
    /// Always starts at "Areas" (`/`). The room crumb needs a selected area
    /// to build its path, so a room selected without an area is skipped.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        let mut crumbs = vec![Breadcrumb::new("Areas", "/")];

        if let Some(area) = &self.current_area {
            crumbs.push(Breadcrumb::new(
                area.name.clone(),
                format!("/areas/{}", area.id),
            ));

            if let Some(room) = &self.current_room {
                crumbs.push(Breadcrumb::new(
                    room.name.clone(),
                    format!("/areas/{}/rooms/{}", area.id, room.id),
                ));
            }
        }

        if let Some(desk) = &self.current_desk {
            crumbs.push(Breadcrumb::new(
                format!("Desk {}", desk.identifier),
                format!("/desks/{}/book", desk.id),
            ));
        }

        crumbs
    }

    pub fn area_totals(&self) -> AreaTotals {
        AreaTotals {
            areas: self.areas.len(),
            rooms: self.areas.iter().map(|a| u64::from(a.room_count)).sum(),
            desks: self.areas.iter().map(|a| u64::from(a.desk_count)).sum(),
        }
    }
}
