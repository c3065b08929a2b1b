//! Reservation command handlers.

use tabled::Tabled;
use tracing::debug;

use deskbook_core::{
    BookingView, Collection, CoreError, Fetched, Reservation, ReservationUpdate,
};

use crate::cli::{GlobalOpts, ReservationsArgs, ReservationsCommand};
use crate::error::CliError;
use crate::output;

use super::{Session, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct ReservationRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Desk")]
    desk: String,
    #[tabled(rename = "User")]
    user: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

impl From<&Reservation> for ReservationRow {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id,
            date: r.date.to_string(),
            desk: r.desk_identifier.clone().unwrap_or_else(|| r.desk.to_string()),
            user: r.user_name.clone().unwrap_or_else(|| r.user.to_string()),
            status: r.status.to_string(),
            notes: r.notes.clone(),
        }
    }
}

pub(crate) fn detail(r: &Reservation, color: bool) -> String {
    let desk = r.desk_identifier.clone().unwrap_or_else(|| r.desk.to_string());
    let mut lines = vec![
        format!("Reservation {}", r.id),
        format!("  Desk:   {desk}"),
        format!("  Date:   {}", r.date),
        format!("  Status: {}", output::paint_status(r.status.as_str(), color)),
    ];
    if let Some(at) = r.checked_in_at {
        lines.push(format!("  Checked in: {}", at.format("%Y-%m-%d %H:%M UTC")));
    }
    if !r.notes.is_empty() {
        lines.push(format!("  Notes:  {}", r.notes));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: ReservationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color_mode());
    let format = global.output_format();

    match args.command {
        ReservationsCommand::List { desk, date } => {
            fetch_all(session, global).await?;
            let reservations: Vec<Reservation> = session
                .store()
                .snapshot()
                .reservations
                .into_iter()
                .filter(|r| desk.is_none_or(|d| r.desk == d))
                .filter(|r| date.is_none_or(|d| r.date == d))
                .collect();
            let out = output::render_list(
                format,
                &reservations,
                |r| ReservationRow::from(r),
                |r| r.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ReservationsCommand::CheckIn { id } => {
            let view = open_for(session, id, global).await?;
            let updated = util::with_spinner(session.store(), global, "Checking in…", view.check_in(id))
                .await?;
            let out = output::render_single(format, &updated, |r| detail(r, color), |r| r.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ReservationsCommand::Update {
            id,
            status,
            notes,
            date,
        } => {
            let update = ReservationUpdate {
                status: status.map(Into::into),
                notes,
                date,
                ..ReservationUpdate::default()
            };
            if update.is_empty() {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "nothing to change; pass --status, --notes or --date".into(),
                });
            }

            let view = open_for(session, id, global).await?;
            let updated =
                util::with_spinner(session.store(), global, "Updating…", view.update(id, &update))
                    .await?;
            let out = output::render_single(format, &updated, |r| detail(r, color), |r| r.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ReservationsCommand::Cancel { id } => {
            let view = open_for(session, id, global).await?;
            let reservation = lookup(session, id)?;
            let desk = reservation
                .desk_identifier
                .clone()
                .unwrap_or_else(|| reservation.desk.to_string());
            if !util::confirm(
                &format!("Cancel reservation {id} for desk {desk} on {}?", reservation.date),
                global.yes,
            )? {
                return Ok(());
            }
            util::with_spinner(session.store(), global, "Cancelling…", view.cancel(id)).await?;
            if !global.quiet {
                eprintln!("Reservation {id} cancelled");
            }
            Ok(())
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Load every reservation into the store.
async fn fetch_all(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let store = session.store();
    let ticket = store.begin_fetch(Collection::Reservations);
    let reservations = util::tracked_fetch(
        store,
        global,
        "Failed to load reservations",
        session.ctx.api.fetch_reservations(),
    )
    .await?;
    debug!(count = reservations.len(), "reservations fetched");
    store.apply_fetched(ticket, Fetched::Reservations(reservations));
    Ok(())
}

fn lookup(session: &Session, id: i64) -> Result<Reservation, CliError> {
    session.store().get_reservation_by_id(id).ok_or_else(|| {
        CoreError::NotFound {
            entity: "reservation",
            identifier: id.to_string(),
        }
        .into()
    })
}

/// Mount and load the booking view of the desk a reservation belongs to,
/// so mutations refresh that desk's reservations afterwards.
async fn open_for(session: &Session, id: i64, global: &GlobalOpts) -> Result<BookingView, CliError> {
    fetch_all(session, global).await?;
    let reservation = lookup(session, id)?;
    let path = format!("/desks/{}/book", reservation.desk);
    let matched = session.router.navigate(&path)?;
    debug!(route = %matched, "opening desk of reservation");

    let view = BookingView::new(session.ctx.clone(), reservation.desk.to_string());
    util::load_with_retry(session.store(), global, || view.load()).await?;
    Ok(view)
}
