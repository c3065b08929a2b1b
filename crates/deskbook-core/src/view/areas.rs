use tracing::debug;

use super::{LoadOutcome, Mounted, ViewContext, ViewScope};
use crate::error::CoreError;
use crate::store::{Collection, Fetched};

pub(crate) const FAILURE: &str = "Failed to load office areas";

/// Landing view: every office area plus summary counts.
#[derive(Debug, Clone)]
pub struct AreasView {
    mounted: Mounted,
}

impl AreasView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            mounted: Mounted::new(ctx),
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.mounted.scope
    }

    pub fn is_loading(&self) -> bool {
        self.mounted.is_loading()
    }

    /// Fetch all areas. Landing here drops any area/room/desk selection.
    pub async fn load(&self) -> Result<LoadOutcome, CoreError> {
        let store = self.mounted.store();
        let api = &self.mounted.ctx.api;

        let fetch = async {
            let ticket = store.begin_fetch(Collection::Areas);
            let areas = api.fetch_areas().await?;
            Ok::<_, deskbook_api::Error>((ticket, areas))
        };

        self.mounted
            .load(FAILURE, fetch, |store, (ticket, areas)| {
                debug!(count = areas.len(), "areas loaded");
                if store.apply_fetched(ticket, Fetched::Areas(areas)) {
                    store.set_current_area(None);
                }
            })
            .await
    }
}
