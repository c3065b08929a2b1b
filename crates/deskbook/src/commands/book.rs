//! Desk booking page and the `book` command.

use serde::Serialize;

use deskbook_core::{Area, BookingRequest, BookingState, BookingView, Desk, Reservation, Room, ViewProps};

use crate::cli::{BookArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::reservations::{ReservationRow, detail};
use super::{Session, util};

/// Structured form of the booking page.
#[derive(Serialize)]
struct BookingPage<'a> {
    desk: Option<&'a Desk>,
    room: Option<&'a Room>,
    area: Option<&'a Area>,
    reservations: &'a [Reservation],
}

pub fn render(state: &BookingState, format: OutputFormat, color: bool) -> String {
    let page = BookingPage {
        desk: state.current_desk.as_ref(),
        room: state.current_room.as_ref(),
        area: state.current_area.as_ref(),
        reservations: &state.reservations,
    };
    output::render_single(
        format,
        &page,
        |p| page_detail(p, color),
        |p| p.desk.map(|d| d.id.to_string()).unwrap_or_default(),
    )
}

fn page_detail(page: &BookingPage<'_>, color: bool) -> String {
    let Some(desk) = page.desk else {
        return "Desk not loaded.".into();
    };
    let mut lines = vec![
        format!("Desk {}", desk.identifier),
        format!("  Status: {}", output::paint_status(desk.status.as_str(), color)),
    ];
    if let Some(room) = page.room {
        lines.push(format!("  Room:   {}", room.name));
    }
    if let Some(area) = page.area {
        lines.push(format!("  Area:   {}", area.name));
    }
    lines.push(String::new());

    if page.reservations.is_empty() {
        lines.push("No reservations for this desk.".into());
    } else {
        lines.push(output::render_list(
            OutputFormat::Table,
            page.reservations,
            |r| ReservationRow::from(r),
            |r| r.id.to_string(),
        ));
    }
    lines.join("\n")
}

pub async fn handle(session: &Session, args: BookArgs, global: &GlobalOpts) -> Result<(), CliError> {
    // Resolve who the booking is for before touching the backend
    let user = args.user.or(session.config.booking.user_id);
    if user.is_none() && !args.quick {
        return Err(CliError::NoUser);
    }
    let request = BookingRequest {
        user,
        date: args.date,
        notes: args.notes.unwrap_or_else(|| session.config.booking.notes.clone()),
        quick: args.quick,
    };

    let matched = session.router.navigate(&format!("/desks/{}/book", args.desk_id))?;
    let Some(ViewProps::BookDesk { desk_id }) = matched.props() else {
        return Err(CliError::Route {
            message: format!("'{}' is not a desk", args.desk_id),
        });
    };

    let view = BookingView::new(session.ctx.clone(), desk_id);
    util::load_with_retry(session.store(), global, || view.load()).await?;
    let reservation = util::with_spinner(session.store(), global, "Booking…", view.book(request)).await?;

    let color = output::should_color(global.color_mode());
    let out = output::render_single(
        global.output_format(),
        &reservation,
        |r| detail(r, color),
        |r| r.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
