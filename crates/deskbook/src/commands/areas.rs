//! Office area listing.

use tabled::Tabled;

use deskbook_core::{Area, BookingState};

use crate::cli::OutputFormat;
use crate::output;

#[derive(Tabled)]
struct AreaRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Rooms")]
    rooms: u32,
    #[tabled(rename = "Desks")]
    desks: u32,
}

impl From<&Area> for AreaRow {
    fn from(a: &Area) -> Self {
        Self {
            id: a.id,
            name: a.name.clone(),
            rooms: a.room_count,
            desks: a.desk_count,
        }
    }
}

/// Areas table followed by the totals line in table mode.
pub fn render(state: &BookingState, format: OutputFormat) -> String {
    if format == OutputFormat::Table && state.areas.is_empty() {
        return "No office areas found.".into();
    }
    let list = output::render_list(format, &state.areas, |a| AreaRow::from(a), |a| a.id.to_string());
    if format != OutputFormat::Table {
        return list;
    }
    let totals = state.area_totals();
    format!(
        "{list}\n{} areas · {} rooms · {} desks",
        totals.areas, totals.rooms, totals.desks
    )
}
