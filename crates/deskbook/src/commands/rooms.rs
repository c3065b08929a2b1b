//! Rooms of one area.

use tabled::Tabled;

use deskbook_core::{BookingState, Room};

use crate::cli::OutputFormat;
use crate::output;

#[derive(Tabled)]
struct RoomRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Desks")]
    desks: u32,
    #[tabled(rename = "Bookable")]
    bookable: &'static str,
}

impl From<&Room> for RoomRow {
    fn from(r: &Room) -> Self {
        Self {
            id: r.id,
            name: r.name.clone(),
            desks: r.desk_count,
            bookable: if r.is_bookable { "yes" } else { "no" },
        }
    }
}

pub fn render(state: &BookingState, format: OutputFormat) -> String {
    if format == OutputFormat::Table && state.rooms.is_empty() {
        let area = state.current_area.as_ref().map_or("this area", |a| a.name.as_str());
        return format!("No rooms in {area}.");
    }
    output::render_list(format, &state.rooms, |r| RoomRow::from(r), |r| r.id.to_string())
}
