// ── View loaders ──
//
// Each view pulls its data from the API into the store when mounted. The
// shared discipline lives here: a per-instance in-flight guard, the
// loading/error flag dance, and dropping results for views that were
// unmounted while their request was out.

mod areas;
mod booking;
mod desks;
mod rooms;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use deskbook_api::ApiClient;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub use areas::AreasView;
pub use booking::{BookingRequest, BookingView};
pub use desks::DesksView;
pub use rooms::RoomsView;

use crate::error::CoreError;
use crate::router::ViewProps;
use crate::store::BookingStore;

/// Dependencies every view is built from.
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub api: Arc<ApiClient>,
    pub store: Arc<BookingStore>,
}

impl ViewContext {
    pub fn new(api: Arc<ApiClient>, store: Arc<BookingStore>) -> Self {
        Self { api, store }
    }
}

/// Liveness of a mounted view. Cloned into every load the view starts;
/// once unmounted, those loads leave the store alone.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unmount(&self) {
        self.token.cancel();
    }

    pub fn is_live(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Resolves once the view is unmounted.
    pub async fn unmounted(&self) {
        self.token.cancelled().await;
    }
}

/// What happened to a `load()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOutcome {
    /// Data was fetched and applied to the store.
    Loaded,
    /// A load for this view instance was already running; nothing was sent.
    AlreadyLoading,
    /// The view was unmounted before the response arrived.
    Discarded,
}

// ── In-flight guard ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub(crate) struct InFlight(Arc<AtomicBool>);

impl InFlight {
    /// Claim the slot, or `None` if another call holds it.
    pub(crate) fn try_begin(&self) -> Option<InFlightGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(Arc::clone(&self.0)))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

pub(crate) struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// ── Load / action runners ────────────────────────────────────────────

/// Shared state of one mounted view instance.
#[derive(Debug, Clone)]
pub(crate) struct Mounted {
    pub(crate) ctx: ViewContext,
    pub(crate) scope: ViewScope,
    in_flight: InFlight,
}

impl Mounted {
    pub(crate) fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            scope: ViewScope::new(),
            in_flight: InFlight::default(),
        }
    }

    pub(crate) fn store(&self) -> &BookingStore {
        &self.ctx.store
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.in_flight.is_active()
    }

    /// Run `fetch` under the load discipline and hand its result to
    /// `apply` if the view is still mounted.
    ///
    /// `fetch` must not have started any I/O yet: it is only polled once
    /// the in-flight slot has been claimed.
    pub(crate) async fn load<T, F, A>(
        &self,
        failure: &str,
        fetch: F,
        apply: A,
    ) -> Result<LoadOutcome, CoreError>
    where
        F: Future<Output = Result<T, deskbook_api::Error>>,
        A: FnOnce(&BookingStore, T),
    {
        let Some(_guard) = self.in_flight.try_begin() else {
            debug!("load already in flight, skipping");
            return Ok(LoadOutcome::AlreadyLoading);
        };

        let store = self.store();
        store.set_loading(true);
        store.clear_error();

        let result = fetch.await;

        if !self.scope.is_live() {
            debug!("view unmounted, discarding load result");
            store.set_loading(false);
            return Ok(LoadOutcome::Discarded);
        }

        match result {
            Ok(data) => {
                apply(store, data);
                store.set_loading(false);
                Ok(LoadOutcome::Loaded)
            }
            Err(e) => {
                store.set_error(Some(format!("{failure}: {e}")));
                store.set_loading(false);
                Err(CoreError::Api(e))
            }
        }
    }

    /// Like [`load`](Self::load) for user-triggered mutations: a busy view
    /// rejects the action instead of skipping it, and the API result is
    /// returned even when the view has been unmounted. The loading flag is
    /// reset either way; the error is only recorded while mounted.
    pub(crate) async fn act<T, F>(&self, failure: &str, action: F) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, CoreError>>,
    {
        let Some(_guard) = self.in_flight.try_begin() else {
            warn!("view busy, rejecting action");
            return Err(CoreError::Busy);
        };

        let store = self.store();
        store.set_loading(true);
        store.clear_error();

        let result = action.await;

        if let Err(e) = &result {
            if self.scope.is_live() {
                store.set_error(Some(format!("{failure}: {e}")));
            }
        }
        store.set_loading(false);
        result
    }
}

// ── Mounted view by route ────────────────────────────────────────────

/// A mounted view chosen from route props.
#[derive(Debug, Clone)]
pub enum View {
    Areas(AreasView),
    Rooms(RoomsView),
    Desks(DesksView),
    Booking(BookingView),
}

impl View {
    pub fn mount(ctx: ViewContext, props: ViewProps) -> Self {
        match props {
            ViewProps::Areas => Self::Areas(AreasView::new(ctx)),
            ViewProps::Rooms { area_id } => Self::Rooms(RoomsView::new(ctx, area_id)),
            ViewProps::Desks { area_id, room_id } => {
                Self::Desks(DesksView::new(ctx, area_id, room_id))
            }
            ViewProps::BookDesk { desk_id } => Self::Booking(BookingView::new(ctx, desk_id)),
        }
    }

    pub async fn load(&self) -> Result<LoadOutcome, CoreError> {
        match self {
            Self::Areas(v) => v.load().await,
            Self::Rooms(v) => v.load().await,
            Self::Desks(v) => v.load().await,
            Self::Booking(v) => v.load().await,
        }
    }

    pub fn scope(&self) -> &ViewScope {
        match self {
            Self::Areas(v) => v.scope(),
            Self::Rooms(v) => v.scope(),
            Self::Desks(v) => v.scope(),
            Self::Booking(v) => v.scope(),
        }
    }

    pub fn unmount(&self) {
        self.scope().unmount();
    }
}
