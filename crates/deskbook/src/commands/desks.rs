//! Desks of one room.

use tabled::Tabled;

use deskbook_core::{BookingState, Desk};

use crate::cli::OutputFormat;
use crate::output;

#[derive(Tabled)]
struct DeskRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Desk")]
    identifier: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Position")]
    position: String,
}

impl From<&Desk> for DeskRow {
    fn from(d: &Desk) -> Self {
        Self {
            id: d.id,
            identifier: d.identifier.clone(),
            status: d.status.to_string(),
            position: position(d),
        }
    }
}

fn position(d: &Desk) -> String {
    match (d.pos_x, d.pos_y) {
        (Some(x), Some(y)) => format!("{x}, {y}"),
        _ => "-".into(),
    }
}

pub fn render(state: &BookingState, format: OutputFormat) -> String {
    if format == OutputFormat::Table && state.desks.is_empty() {
        let room = state.current_room.as_ref().map_or("this room", |r| r.name.as_str());
        return format!("No desks in {room}.");
    }
    let list = output::render_list(format, &state.desks, |d| DeskRow::from(d), |d| d.id.to_string());
    if format != OutputFormat::Table {
        return list;
    }
    let free = state.desks.iter().filter(|d| d.status.is_bookable()).count();
    format!("{list}\n{free} of {} desks available", state.desks.len())
}
