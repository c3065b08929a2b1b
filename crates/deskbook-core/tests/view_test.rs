#![allow(clippy::unwrap_used)]
// Integration tests for the view loaders against a wiremock backend.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use deskbook_api::TransportConfig;
use deskbook_core::{
    ApiClient, AreasView, BookingRequest, BookingStore, BookingView, CoreError, DesksView,
    LoadOutcome, RoomsView, Router, View, ViewContext,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ViewContext) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/api/", server.uri())).unwrap();
    let api = ApiClient::with_base_url(base_url, &TransportConfig::default()).unwrap();
    let ctx = ViewContext::new(Arc::new(api), Arc::new(BookingStore::new()));
    (server, ctx)
}

fn areas_json() -> serde_json::Value {
    json!([
        { "id": 1, "name": "North Wing", "room_count": 5, "desk_count": 15 },
        { "id": 2, "name": "South Wing", "room_count": 4, "desk_count": 12 }
    ])
}

fn desk_json(status: &str) -> serde_json::Value {
    json!({
        "id": 4,
        "identifier": "1.L.01",
        "status": status,
        "room": 10,
        "room_name": "Open Office A",
        "area_name": "North Wing"
    })
}

fn reservation_json(id: i64, desk: i64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "date": "2024-06-15",
        "status": status,
        "user": 1,
        "desk": desk
    })
}

async fn mount_booking_context(server: &MockServer, desk_status: &str) {
    Mock::given(method("GET"))
        .and(path("/api/desks/4/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(desk_json(desk_status)))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/rooms/10/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 10, "name": "Open Office A", "area": 1
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/areas/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "name": "North Wing"
        })))
        .mount(server)
        .await;
}

async fn mount_reservations(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/reservations/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            reservation_json(7, 4, "confirmed"),
            reservation_json(8, 5, "confirmed"),
            reservation_json(9, 4, "checked_in")
        ])))
        .mount(server)
        .await;
}

// ── Areas ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_areas_load_populates_store() {
    let (server, ctx) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/areas/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(areas_json()))
        .expect(1)
        .mount(&server)
        .await;

    let view = AreasView::new(ctx.clone());
    let outcome = view.load().await.unwrap();

    assert_eq!(outcome, LoadOutcome::Loaded);
    let state = ctx.store.snapshot();
    assert_eq!(state.areas.len(), 2);
    assert!(!state.is_loading);
    assert!(state.error.is_none());
    assert_eq!(ctx.store.area_totals().desks, 27);
}

#[tokio::test]
async fn test_retry_after_failure_clears_error() {
    let (server, ctx) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/areas/"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/areas/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(areas_json()))
        .mount(&server)
        .await;

    let view = AreasView::new(ctx.clone());

    let err = view.load().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    let message = ctx.store.error().unwrap();
    assert!(
        message.starts_with("Failed to load office areas: "),
        "unexpected message: {message}"
    );
    assert!(!ctx.store.is_loading());
    assert!(ctx.store.snapshot().areas.is_empty());

    let outcome = view.load().await.unwrap();

    assert_eq!(outcome, LoadOutcome::Loaded);
    assert!(ctx.store.error().is_none());
    assert_eq!(ctx.store.snapshot().areas.len(), 2);
}

#[tokio::test]
async fn test_duplicate_load_calls_api_once() {
    let (server, ctx) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/areas/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(areas_json())
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let view = AreasView::new(ctx.clone());
    let (first, second) = tokio::join!(view.load(), view.load());

    assert_eq!(first.unwrap(), LoadOutcome::Loaded);
    assert_eq!(second.unwrap(), LoadOutcome::AlreadyLoading);
    assert!(!view.is_loading());
}

#[tokio::test]
async fn test_separate_instances_are_not_guarded() {
    let (server, ctx) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/areas/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(areas_json())
                .set_delay(Duration::from_millis(100)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let a = AreasView::new(ctx.clone());
    let b = AreasView::new(ctx.clone());
    let (ra, rb) = tokio::join!(a.load(), b.load());

    assert_eq!(ra.unwrap(), LoadOutcome::Loaded);
    assert_eq!(rb.unwrap(), LoadOutcome::Loaded);
}

#[tokio::test]
async fn test_unmounted_view_leaves_store_alone() {
    let (server, ctx) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/areas/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(areas_json())
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let view = AreasView::new(ctx.clone());
    let (outcome, ()) = tokio::join!(view.load(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        view.scope().unmount();
    });

    assert_eq!(outcome.unwrap(), LoadOutcome::Discarded);
    let state = ctx.store.snapshot();
    assert!(state.areas.is_empty());
    assert!(state.error.is_none());
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_action_finishing_after_unmount_resets_loading() {
    let (server, ctx) = setup().await;
    mount_booking_context(&server, "available").await;
    mount_reservations(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/api/reservations/7/"))
        .respond_with(ResponseTemplate::new(500).set_delay(Duration::from_millis(200)))
        .mount(&server)
        .await;

    let view = BookingView::new(ctx.clone(), "4");
    view.load().await.unwrap();

    let (result, ()) = tokio::join!(view.cancel(7), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        view.scope().unmount();
    });

    assert!(result.is_err());
    assert!(!ctx.store.is_loading());
    assert!(ctx.store.error().is_none());
}

// ── Rooms / desks ───────────────────────────────────────────────────

#[tokio::test]
async fn test_rooms_load_sets_area_and_rooms() {
    let (server, ctx) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/areas/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "name": "North Wing", "room_count": 1, "desk_count": 3
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/areas/1/rooms/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 10, "name": "Open Office A", "area": 1 }
        ])))
        .mount(&server)
        .await;

    let view = RoomsView::new(ctx.clone(), "1");
    view.load().await.unwrap();

    let crumbs = ctx.store.get_breadcrumbs();
    assert_eq!(crumbs.len(), 2);
    assert_eq!(crumbs[1].path, "/areas/1");
    assert_eq!(ctx.store.get_room_by_id("10").unwrap().name, "Open Office A");
}

#[tokio::test]
async fn test_slow_rooms_response_does_not_overwrite_newer() {
    let (server, ctx) = setup().await;

    for (id, name, delay) in [(1, "North Wing", 300), (2, "South Wing", 0)] {
        Mock::given(method("GET"))
            .and(path(format!("/api/areas/{id}/")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "id": id, "name": name }))
                    .set_delay(Duration::from_millis(delay)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/api/areas/{id}/rooms/")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": id * 10, "name": format!("Room of {name}"), "area": id }
            ])))
            .mount(&server)
            .await;
    }

    let slow = RoomsView::new(ctx.clone(), "1");
    let fast = RoomsView::new(ctx.clone(), "2");
    let (rs, rf) = tokio::join!(slow.load(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        fast.load().await
    });
    rs.unwrap();
    rf.unwrap();

    let state = ctx.store.snapshot();
    assert_eq!(state.rooms.len(), 1);
    assert_eq!(state.rooms[0].area, 2);
    assert_eq!(state.current_area.unwrap().id, 2);
}

#[tokio::test]
async fn test_desks_load_sets_full_context() {
    let (server, ctx) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/areas/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1, "name": "North Wing" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/rooms/10/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 10, "name": "Open Office A", "area": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/rooms/10/desks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([desk_json("available")])))
        .mount(&server)
        .await;

    let view = DesksView::new(ctx.clone(), "1", "10");
    view.load().await.unwrap();

    let crumbs = ctx.store.get_breadcrumbs();
    assert_eq!(crumbs.len(), 3);
    assert_eq!(crumbs[2].path, "/areas/1/rooms/10");
    assert_eq!(ctx.store.get_desk_by_id(4).unwrap().identifier, "1.L.01");
}

#[tokio::test]
async fn test_desks_failure_message() {
    let (server, ctx) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Not found." })))
        .mount(&server)
        .await;

    let view = DesksView::new(ctx.clone(), "1", "99");
    let err = view.load().await.unwrap_err();

    assert!(err.is_not_found());
    assert!(ctx.store.error().unwrap().starts_with("Failed to load desks: "));
}

// ── Booking ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_booking_load_filters_reservations_to_desk() {
    let (server, ctx) = setup().await;
    mount_booking_context(&server, "available").await;
    mount_reservations(&server).await;

    let view = BookingView::new(ctx.clone(), "4");
    view.load().await.unwrap();

    let state = ctx.store.snapshot();
    let ids: Vec<i64> = state.reservations.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![7, 9]);
    assert_eq!(ctx.store.get_breadcrumbs().len(), 4);
    assert_eq!(ctx.store.get_breadcrumbs()[3].path, "/desks/4/book");
}

#[tokio::test]
async fn test_book_creates_reservation_and_refreshes() {
    let (server, ctx) = setup().await;
    mount_booking_context(&server, "available").await;
    mount_reservations(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/reservations/"))
        .and(body_partial_json(json!({ "user": 3, "desk": 4, "date": "2024-06-15" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(reservation_json(7, 4, "confirmed")))
        .expect(1)
        .mount(&server)
        .await;

    let view = BookingView::new(ctx.clone(), "4");
    view.load().await.unwrap();

    let created = view
        .book(BookingRequest {
            user: Some(3),
            date: chrono::NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            notes: String::new(),
            quick: false,
        })
        .await
        .unwrap();

    assert_eq!(created.id, 7);
    assert!(!ctx.store.is_loading());
    assert_eq!(ctx.store.snapshot().reservations.len(), 2);
}

#[tokio::test]
async fn test_failed_refresh_keeps_committed_booking() {
    let (server, ctx) = setup().await;
    mount_booking_context(&server, "available").await;

    // First GET serves the booking view load, the refresh after the POST fails
    Mock::given(method("GET"))
        .and(path("/api/reservations/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            reservation_json(7, 4, "confirmed")
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/reservations/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/reservations/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(reservation_json(77, 4, "confirmed")))
        .expect(1)
        .mount(&server)
        .await;

    let view = BookingView::new(ctx.clone(), "4");
    view.load().await.unwrap();

    let created = view
        .book(BookingRequest {
            user: Some(3),
            date: chrono::NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            notes: String::new(),
            quick: false,
        })
        .await
        .unwrap();

    assert_eq!(created.id, 77);
    assert!(!ctx.store.is_loading());
    let error = ctx.store.error().unwrap();
    assert!(error.starts_with("Failed to refresh reservations: "), "{error}");
    // Last successful list stays in place
    assert_eq!(ctx.store.snapshot().reservations.len(), 1);
}

#[tokio::test]
async fn test_book_without_user_sends_nothing() {
    let (server, ctx) = setup().await;
    mount_booking_context(&server, "available").await;
    mount_reservations(&server).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let view = BookingView::new(ctx.clone(), "4");
    view.load().await.unwrap();

    let err = view
        .book(BookingRequest {
            user: None,
            date: chrono::NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            notes: String::new(),
            quick: false,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::NoUser), "got {err:?}");
}

#[tokio::test]
async fn test_disabled_desk_is_not_booked() {
    let (server, ctx) = setup().await;
    mount_booking_context(&server, "disabled").await;
    mount_reservations(&server).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let view = BookingView::new(ctx.clone(), "4");
    view.load().await.unwrap();

    let err = view
        .book(BookingRequest {
            user: None,
            date: chrono::NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            notes: String::new(),
            quick: true,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::DeskUnavailable { .. }), "got {err:?}");
    assert!(ctx.store.error().unwrap().starts_with("Failed to book desk: "));
}

#[tokio::test]
async fn test_check_in_patches_status() {
    let (server, ctx) = setup().await;
    mount_booking_context(&server, "available").await;
    mount_reservations(&server).await;

    Mock::given(method("PATCH"))
        .and(path("/api/reservations/7/"))
        .and(body_partial_json(json!({ "status": "checked_in" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reservation_json(7, 4, "checked_in")))
        .expect(1)
        .mount(&server)
        .await;

    let view = BookingView::new(ctx.clone(), "4");
    view.load().await.unwrap();
    let updated = view.check_in(7).await.unwrap();

    assert_eq!(updated.status.as_str(), "checked_in");
}

#[tokio::test]
async fn test_cancel_deletes_and_refreshes() {
    let (server, ctx) = setup().await;
    mount_booking_context(&server, "available").await;
    mount_reservations(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/api/reservations/7/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let view = BookingView::new(ctx.clone(), "4");
    view.load().await.unwrap();
    view.cancel(7).await.unwrap();

    assert!(ctx.store.error().is_none());
    assert!(!ctx.store.is_loading());
}

// ── Router → view ───────────────────────────────────────────────────

#[tokio::test]
async fn test_navigation_mounts_matched_view() {
    let (server, ctx) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/areas/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(areas_json()))
        .expect(1)
        .mount(&server)
        .await;

    let router = Router::new();
    let matched = router.navigate("/does/not/exist").unwrap();
    let view = View::mount(ctx.clone(), matched.props().unwrap());

    assert!(matches!(view, View::Areas(_)));
    assert_eq!(view.load().await.unwrap(), LoadOutcome::Loaded);
    assert_eq!(router.current_title(), "Office Areas - Corporate Workspace");
}
