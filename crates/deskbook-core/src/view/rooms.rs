use tracing::debug;

use super::{LoadOutcome, Mounted, ViewContext, ViewScope};
use crate::error::CoreError;
use crate::store::{Collection, Fetched};

pub(crate) const FAILURE: &str = "Failed to load rooms";

/// Rooms of one area.
#[derive(Debug, Clone)]
pub struct RoomsView {
    mounted: Mounted,
    area_id: String,
}

impl RoomsView {
    /// `area_id` is the raw route parameter; it goes to the API unchecked.
    pub fn new(ctx: ViewContext, area_id: impl Into<String>) -> Self {
        Self {
            mounted: Mounted::new(ctx),
            area_id: area_id.into(),
        }
    }

    pub fn area_id(&self) -> &str {
        &self.area_id
    }

    pub fn scope(&self) -> &ViewScope {
        &self.mounted.scope
    }

    pub fn is_loading(&self) -> bool {
        self.mounted.is_loading()
    }

    pub async fn load(&self) -> Result<LoadOutcome, CoreError> {
        let store = self.mounted.store();
        let api = &self.mounted.ctx.api;
        let area_id = self.area_id.as_str();

        let fetch = async {
            let ticket = store.begin_fetch(Collection::Rooms);
            let (area, rooms) =
                tokio::try_join!(api.fetch_area(area_id), api.fetch_area_rooms(area_id))?;
            Ok::<_, deskbook_api::Error>((ticket, area, rooms))
        };

        self.mounted
            .load(FAILURE, fetch, |store, (ticket, area, rooms)| {
                debug!(area = area.id, count = rooms.len(), "rooms loaded");
                if store.apply_fetched(ticket, Fetched::Rooms(rooms)) {
                    store.set_current_area(Some(area));
                }
            })
            .await
    }
}
