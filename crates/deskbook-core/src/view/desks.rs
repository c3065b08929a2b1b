use tracing::debug;

use super::{LoadOutcome, Mounted, ViewContext, ViewScope};
use crate::error::CoreError;
use crate::store::{Collection, Fetched};

pub(crate) const FAILURE: &str = "Failed to load desks";

/// Desks of one room, with the room and its area as navigation context.
#[derive(Debug, Clone)]
pub struct DesksView {
    mounted: Mounted,
    area_id: String,
    room_id: String,
}

impl DesksView {
    pub fn new(ctx: ViewContext, area_id: impl Into<String>, room_id: impl Into<String>) -> Self {
        Self {
            mounted: Mounted::new(ctx),
            area_id: area_id.into(),
            room_id: room_id.into(),
        }
    }

    pub fn area_id(&self) -> &str {
        &self.area_id
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
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
        let (area_id, room_id) = (self.area_id.as_str(), self.room_id.as_str());

        let fetch = async {
            let ticket = store.begin_fetch(Collection::Desks);
            let (area, room, desks) = tokio::try_join!(
                api.fetch_area(area_id),
                api.fetch_room(room_id),
                api.fetch_room_desks(room_id),
            )?;
            Ok::<_, deskbook_api::Error>((ticket, area, room, desks))
        };

        self.mounted
            .load(FAILURE, fetch, |store, (ticket, area, room, desks)| {
                debug!(area = area.id, room = room.id, count = desks.len(), "desks loaded");
                if store.apply_fetched(ticket, Fetched::Desks(desks)) {
                    store.set_current_area(Some(area));
                    store.set_current_room(Some(room));
                }
            })
            .await
    }
}
