use chrono::{NaiveDate, Utc};
use deskbook_api::{
    ApiClient, Desk, NewReservation, QuickBookRequest, Reservation, ReservationStatus,
    ReservationUpdate,
};
use tracing::{debug, info, warn};

use super::{LoadOutcome, Mounted, ViewContext, ViewScope};
use crate::error::CoreError;
use crate::store::{BookingStore, Collection, Fetched};

pub(crate) const FAILURE: &str = "Failed to load desk";
const BOOK_FAILURE: &str = "Failed to book desk";
const UPDATE_FAILURE: &str = "Failed to update reservation";
const CANCEL_FAILURE: &str = "Failed to cancel reservation";
const REFRESH_FAILURE: &str = "Failed to refresh reservations";

/// A reservation the user is about to place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// Required unless `quick` is set.
    pub user: Option<i64>,
    pub date: NaiveDate,
    pub notes: String,
    /// Go through the backend's one-click endpoint, which picks the user
    /// itself. `user` and `notes` are not sent.
    pub quick: bool,
}

/// Booking page of one desk: the desk with its room and area, and the
/// reservations already placed on it.
#[derive(Debug, Clone)]
pub struct BookingView {
    mounted: Mounted,
    desk_id: String,
}

impl BookingView {
    pub fn new(ctx: ViewContext, desk_id: impl Into<String>) -> Self {
        Self {
            mounted: Mounted::new(ctx),
            desk_id: desk_id.into(),
        }
    }

    pub fn desk_id(&self) -> &str {
        &self.desk_id
    }

    pub fn scope(&self) -> &ViewScope {
        &self.mounted.scope
    }

    pub fn is_loading(&self) -> bool {
        self.mounted.is_loading()
    }

    /// Fetch the desk, walk up to its room and area, and load the desk's
    /// reservations alongside.
    pub async fn load(&self) -> Result<LoadOutcome, CoreError> {
        let store = self.mounted.store();
        let api = self.mounted.ctx.api.as_ref();
        let desk_id = self.desk_id.as_str();

        let context = async {
            let desk = api.fetch_desk(desk_id).await?;
            let room = match desk.room {
                Some(room_id) => Some(api.fetch_room(room_id).await?),
                None => None,
            };
            let area = match &room {
                Some(room) => Some(api.fetch_area(room.area).await?),
                None => None,
            };
            Ok::<_, deskbook_api::Error>((desk, room, area))
        };

        let fetch = async {
            let ticket = store.begin_fetch(Collection::Reservations);
            let ((desk, room, area), reservations) =
                tokio::try_join!(context, api.fetch_reservations())?;
            Ok::<_, deskbook_api::Error>((ticket, desk, room, area, reservations))
        };

        self.mounted
            .load(
                FAILURE,
                fetch,
                |store, (ticket, desk, room, area, reservations)| {
                    let reservations = for_desk(reservations, &desk);
                    debug!(desk = desk.id, count = reservations.len(), "booking view loaded");
                    if store.apply_fetched(ticket, Fetched::Reservations(reservations)) {
                        store.set_current_area(area);
                        store.set_current_room(room);
                        store.set_current_desk(Some(desk));
                    }
                },
            )
            .await
    }

    /// Reserve the loaded desk, then refresh its reservations. A failed
    /// refresh does not undo the booking; it only leaves an error message.
    pub async fn book(&self, request: BookingRequest) -> Result<Reservation, CoreError> {
        let store = self.mounted.store();
        let api = self.mounted.ctx.api.as_ref();

        let action = async {
            let desk = store.current_desk().ok_or(CoreError::NoDeskLoaded)?;
            if !desk.status.is_bookable() {
                return Err(CoreError::DeskUnavailable {
                    identifier: desk.identifier,
                    status: desk.status.to_string(),
                });
            }

            let reservation = if request.quick {
                let resp = api
                    .quick_book(&QuickBookRequest {
                        desk_id: desk.id,
                        date: request.date,
                    })
                    .await?;
                debug!(message = %resp.message, "quick book");
                resp.reservation
            } else {
                let user = request.user.ok_or(CoreError::NoUser)?;
                api.create_reservation(&NewReservation {
                    user,
                    desk: desk.id,
                    date: request.date,
                    status: ReservationStatus::Confirmed,
                    notes: request.notes,
                })
                .await?
            };

            info!(
                reservation = reservation.id,
                desk = %desk.identifier,
                date = %reservation.date,
                "desk booked"
            );
            self.refresh_reservations(store, api, &desk).await;
            Ok::<_, CoreError>(reservation)
        };

        self.mounted.act(BOOK_FAILURE, action).await
    }

    /// Patch a reservation, then refresh the desk's reservations.
    pub async fn update(
        &self,
        reservation_id: i64,
        update: &ReservationUpdate,
    ) -> Result<Reservation, CoreError> {
        let store = self.mounted.store();
        let api = self.mounted.ctx.api.as_ref();

        let action = async {
            let updated = api.update_reservation(reservation_id, update).await?;
            info!(reservation = updated.id, status = %updated.status, "reservation updated");
            if let Some(desk) = store.current_desk() {
                self.refresh_reservations(store, api, &desk).await;
            }
            Ok::<_, CoreError>(updated)
        };

        self.mounted.act(UPDATE_FAILURE, action).await
    }

    /// Mark a reservation as checked in now.
    pub async fn check_in(&self, reservation_id: i64) -> Result<Reservation, CoreError> {
        self.update(
            reservation_id,
            &ReservationUpdate {
                status: Some(ReservationStatus::CheckedIn),
                checked_in_at: Some(Utc::now()),
                ..ReservationUpdate::default()
            },
        )
        .await
    }

    /// Delete a reservation, then refresh the desk's reservations.
    pub async fn cancel(&self, reservation_id: i64) -> Result<(), CoreError> {
        let store = self.mounted.store();
        let api = self.mounted.ctx.api.as_ref();

        let action = async {
            api.delete_reservation(reservation_id).await?;
            info!(reservation = reservation_id, "reservation cancelled");
            if let Some(desk) = store.current_desk() {
                self.refresh_reservations(store, api, &desk).await;
            }
            Ok::<_, CoreError>(())
        };

        self.mounted.act(CANCEL_FAILURE, action).await
    }

    async fn refresh_reservations(&self, store: &BookingStore, api: &ApiClient, desk: &Desk) {
        let ticket = store.begin_fetch(Collection::Reservations);
        match api.fetch_reservations().await {
            Ok(reservations) => {
                if self.mounted.scope.is_live() {
                    store.apply_fetched(ticket, Fetched::Reservations(for_desk(reservations, desk)));
                }
            }
            Err(e) => {
                warn!(desk = desk.id, error = %e, "reservation refresh failed after write");
                if self.mounted.scope.is_live() {
                    store.set_error(Some(format!("{REFRESH_FAILURE}: {e}")));
                }
            }
        }
    }
}

fn for_desk(reservations: Vec<Reservation>, desk: &Desk) -> Vec<Reservation> {
    reservations.into_iter().filter(|r| r.desk == desk.id).collect()
}
