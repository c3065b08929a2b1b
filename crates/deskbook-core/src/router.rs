// ── Client-side router ──
//
// Ordered route table, first match wins. Every navigation publishes the
// document title on a watch channel before it proceeds; the hook never
// blocks or cancels a navigation.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::CoreError;

/// Suffix appended to every document title.
pub const APP_NAME: &str = "Corporate Workspace";

/// Title used when the matched route has none.
pub const DEFAULT_TITLE: &str = "Booking";

const MAX_REDIRECTS: usize = 8;

/// View a route renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Areas,
    Rooms,
    Desks,
    BookDesk,
}

impl ViewKind {
    /// Build the view's props from the captured path parameters. `None`
    /// when a parameter the view needs was not captured.
    pub fn props(self, params: &RouteParams) -> Option<ViewProps> {
        let param = |name: &str| params.get(name).map(str::to_owned);
        Some(match self {
            Self::Areas => ViewProps::Areas,
            Self::Rooms => ViewProps::Rooms {
                area_id: param("areaId")?,
            },
            Self::Desks => ViewProps::Desks {
                area_id: param("areaId")?,
                room_id: param("roomId")?,
            },
            Self::BookDesk => ViewProps::BookDesk {
                desk_id: param("deskId")?,
            },
        })
    }
}

/// What a matched route does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "to")]
pub enum RouteTarget {
    View(ViewKind),
    Redirect(&'static str),
}

/// One entry of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    pub name: Option<&'static str>,
    /// Pattern: literal segments, `:param` for one segment, or
    /// `:param(.*)*` to swallow the rest of the path.
    pub path: &'static str,
    pub title: Option<&'static str>,
    pub breadcrumb: Option<&'static str>,
    pub target: RouteTarget,
}

impl Route {
    pub const fn view(
        name: &'static str,
        path: &'static str,
        title: &'static str,
        breadcrumb: &'static str,
        kind: ViewKind,
    ) -> Self {
        Self {
            name: Some(name),
            path,
            title: Some(title),
            breadcrumb: Some(breadcrumb),
            target: RouteTarget::View(kind),
        }
    }

    pub const fn redirect(path: &'static str, to: &'static str) -> Self {
        Self {
            name: None,
            path,
            title: None,
            breadcrumb: None,
            target: RouteTarget::Redirect(to),
        }
    }
}

/// The application's navigation topology. Desk booking goes through its
/// own view at `/desks/:deskId/book`.
pub static ROUTES: &[Route] = &[
    Route::view("areas", "/", "Office Areas", "Areas", ViewKind::Areas),
    Route::view("rooms", "/areas/:areaId", "Rooms", "Rooms", ViewKind::Rooms),
    Route::view(
        "desks",
        "/areas/:areaId/rooms/:roomId",
        "Desks",
        "Desks",
        ViewKind::Desks,
    ),
    Route::view(
        "book-desk",
        "/desks/:deskId/book",
        "Book Desk",
        "Book",
        ViewKind::BookDesk,
    ),
    Route::redirect("/:pathMatch(.*)*", "/"),
];

/// Parameters captured from the path, percent-decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteParams(BTreeMap<&'static str, String>);

impl RouteParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Props handed to the view a route renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewProps {
    Areas,
    Rooms { area_id: String },
    Desks { area_id: String, room_id: String },
    BookDesk { desk_id: String },
}

/// Result of resolving a path to a view route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    pub route: Route,
    pub params: RouteParams,
    /// Normalized path that was matched (after redirects).
    pub path: String,
    /// Path originally requested when a redirect was followed.
    pub redirected_from: Option<String>,
}

impl RouteMatch {
    pub fn view(&self) -> Option<ViewKind> {
        match self.route.target {
            RouteTarget::View(kind) => Some(kind),
            RouteTarget::Redirect(_) => None,
        }
    }

    pub fn props(&self) -> Option<ViewProps> {
        self.view()?.props(&self.params)
    }

    pub fn title(&self) -> String {
        document_title(self.route.title)
    }
}

impl fmt::Display for RouteMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.route.name {
            Some(name) => write!(f, "{name} ({})", self.path),
            None => f.write_str(&self.path),
        }
    }
}

/// `"<title or Booking> - Corporate Workspace"`.
pub fn document_title(title: Option<&str>) -> String {
    format!("{} - {APP_NAME}", title.unwrap_or(DEFAULT_TITLE))
}

/// Resolves paths against a route table and tracks the current location.
#[derive(Debug)]
pub struct Router {
    routes: Vec<Route>,
    title: watch::Sender<String>,
    current: watch::Sender<Option<RouteMatch>>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self::with_routes(ROUTES.to_vec())
    }

    pub fn with_routes(routes: Vec<Route>) -> Self {
        let (title, _) = watch::channel(document_title(None));
        let (current, _) = watch::channel(None);
        Self {
            routes,
            title,
            current,
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolve `path` to a view route, following redirects. No side effects.
    pub fn resolve(&self, path: &str) -> Result<RouteMatch, CoreError> {
        let requested = normalize(path);
        let mut target = requested.clone();

        for _ in 0..=MAX_REDIRECTS {
            let (route, params) = self
                .match_path(&target)
                .ok_or_else(|| CoreError::InvalidRoute {
                    path: target.clone(),
                })?;

            match route.target {
                RouteTarget::Redirect(to) => {
                    debug!(from = %target, to, "route redirect");
                    target = normalize(to);
                }
                RouteTarget::View(_) => {
                    let redirected_from = (target != requested).then(|| requested.clone());
                    return Ok(RouteMatch {
                        route,
                        params,
                        path: target,
                        redirected_from,
                    });
                }
            }
        }

        Err(CoreError::RedirectLoop { path: requested })
    }

    /// Resolve `path`, publish the document title and record the match as
    /// the current location.
    pub fn navigate(&self, path: &str) -> Result<RouteMatch, CoreError> {
        let matched = self.resolve(path)?;

        let title = matched.title();
        self.title.send_replace(title.clone());
        self.current.send_replace(Some(matched.clone()));

        info!(path = %matched.path, route = ?matched.route.name, title = %title, "navigated");
        Ok(matched)
    }

    /// Receiver for the document title; updated on every navigation.
    pub fn title(&self) -> watch::Receiver<String> {
        self.title.subscribe()
    }

    pub fn current_title(&self) -> String {
        self.title.borrow().clone()
    }

    /// Last successful navigation, if any.
    pub fn current(&self) -> Option<RouteMatch> {
        self.current.borrow().clone()
    }

    fn match_path(&self, path: &str) -> Option<(Route, RouteParams)> {
        let segments = split(path);
        self.routes
            .iter()
            .find_map(|route| match_pattern(route.path, &segments).map(|p| (*route, p)))
    }
}

// ── Matching ─────────────────────────────────────────────────────────

/// Strip query and fragment, force a leading slash, drop a trailing one.
fn normalize(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else if trimmed.is_empty() {
        "/".to_owned()
    } else {
        format!("/{trimmed}")
    }
}

fn split(path: &str) -> Vec<&str> {
    let rest = path.strip_prefix('/').unwrap_or(path);
    if rest.is_empty() {
        Vec::new()
    } else {
        rest.split('/').collect()
    }
}

fn decode(segment: &str) -> String {
    urlencoding::decode(segment).map_or_else(|_| segment.to_owned(), |s| s.into_owned())
}

fn match_pattern(pattern: &'static str, segments: &[&str]) -> Option<RouteParams> {
    let mut params = BTreeMap::new();
    let parts = split(pattern);

    for (i, &part) in parts.iter().enumerate() {
        let Some(name) = part.strip_prefix(':') else {
            if segments.get(i) != Some(&part) {
                return None;
            }
            continue;
        };

        if let Some(open) = name.find('(') {
            // Catch-all: zero or more remaining segments.
            let rest = segments.get(i..).unwrap_or_default();
            let joined = rest.iter().map(|s| decode(s)).collect::<Vec<_>>().join("/");
            params.insert(&name[..open], joined);
            return Some(RouteParams(params));
        }

        match segments.get(i) {
            Some(seg) if !seg.is_empty() => {
                params.insert(name, decode(seg));
            }
            _ => return None,
        }
    }

    (segments.len() == parts.len()).then_some(RouteParams(params))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn root_matches_areas() {
        let router = Router::new();
        let m = router.resolve("/").unwrap();
        assert_eq!(m.route.name, Some("areas"));
        assert_eq!(m.props(), Some(ViewProps::Areas));
        assert!(m.params.is_empty());
    }

    #[test]
    fn room_path_captures_both_params() {
        let router = Router::new();
        let m = router.resolve("/areas/7/rooms/3").unwrap();
        assert_eq!(m.route.name, Some("desks"));
        assert_eq!(m.params.get("areaId"), Some("7"));
        assert_eq!(m.params.get("roomId"), Some("3"));
        assert_eq!(
            m.props(),
            Some(ViewProps::Desks {
                area_id: "7".into(),
                room_id: "3".into()
            })
        );
    }

    #[test]
    fn area_path_is_rooms_view() {
        let router = Router::new();
        let m = router.resolve("/areas/12").unwrap();
        assert_eq!(
            m.props(),
            Some(ViewProps::Rooms {
                area_id: "12".into()
            })
        );
    }

    #[test]
    fn booking_path() {
        let router = Router::new();
        let m = router.resolve("/desks/4/book").unwrap();
        assert_eq!(m.route.name, Some("book-desk"));
        assert_eq!(
            m.props(),
            Some(ViewProps::BookDesk {
                desk_id: "4".into()
            })
        );
    }

    #[test]
    fn params_are_not_validated() {
        let router = Router::new();
        let m = router.resolve("/areas/abc").unwrap();
        assert_eq!(m.params.get("areaId"), Some("abc"));
    }

    #[test]
    fn params_are_percent_decoded() {
        let router = Router::new();
        let m = router.resolve("/areas/north%20wing").unwrap();
        assert_eq!(m.params.get("areaId"), Some("north wing"));
    }

    #[test]
    fn query_fragment_and_trailing_slash_are_ignored() {
        let router = Router::new();
        let m = router.resolve("/areas/7/rooms/3/?tab=map#top").unwrap();
        assert_eq!(m.route.name, Some("desks"));
        assert_eq!(m.path, "/areas/7/rooms/3");
        assert!(m.redirected_from.is_none());
    }

    #[test]
    fn segments_are_case_sensitive() {
        let router = Router::new();
        let m = router.resolve("/Areas/7").unwrap();
        assert_eq!(m.route.name, Some("areas"));
        assert_eq!(m.redirected_from.as_deref(), Some("/Areas/7"));
    }

    #[test]
    fn unknown_path_redirects_to_root() {
        let router = Router::new();
        let m = router.navigate("/nowhere").unwrap();

        assert_eq!(m.route.name, Some("areas"));
        assert_eq!(m.path, "/");
        assert_eq!(m.redirected_from.as_deref(), Some("/nowhere"));
        assert_eq!(router.current_title(), "Office Areas - Corporate Workspace");
    }

    #[test]
    fn dropped_routes_fall_through_to_root() {
        let router = Router::new();
        for path in ["/broken", "/test", "/areas/1/desks"] {
            assert_eq!(router.resolve(path).unwrap().path, "/", "{path}");
        }
    }

    #[test]
    fn navigate_publishes_title_and_current() {
        let router = Router::new();
        let mut rx = router.title();
        assert_eq!(router.current_title(), "Booking - Corporate Workspace");
        assert!(router.current().is_none());

        router.navigate("/desks/4/book").unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), "Book Desk - Corporate Workspace");
        assert_eq!(router.current().unwrap().route.name, Some("book-desk"));
    }

    #[test]
    fn untitled_route_uses_default_title() {
        let router = Router::with_routes(vec![Route {
            name: Some("plain"),
            path: "/plain",
            title: None,
            breadcrumb: None,
            target: RouteTarget::View(ViewKind::Areas),
        }]);
        router.navigate("/plain").unwrap();
        assert_eq!(router.current_title(), "Booking - Corporate Workspace");
    }

    #[test]
    fn table_without_catch_all_reports_no_route() {
        let router = Router::with_routes(vec![ROUTES[0]]);
        let err = router.navigate("/elsewhere").unwrap_err();
        assert!(matches!(err, CoreError::InvalidRoute { ref path } if path == "/elsewhere"));
        assert_eq!(router.current_title(), "Booking - Corporate Workspace");
    }

    #[test]
    fn redirect_cycle_is_reported() {
        let router = Router::with_routes(vec![
            Route::redirect("/a", "/b"),
            Route::redirect("/b", "/a"),
        ]);
        assert!(matches!(
            router.resolve("/a"),
            Err(CoreError::RedirectLoop { .. })
        ));
    }

    #[test]
    fn missing_param_yields_no_props() {
        let router = Router::with_routes(vec![Route::view(
            "odd",
            "/odd",
            "Odd",
            "Odd",
            ViewKind::Rooms,
        )]);
        assert!(router.resolve("/odd").unwrap().props().is_none());
    }

    #[test]
    fn catch_all_captures_rest() {
        let params = match_pattern("/:pathMatch(.*)*", &["a", "b%2Fc"]).unwrap();
        assert_eq!(params.get("pathMatch"), Some("a/b/c"));
        assert!(match_pattern("/:pathMatch(.*)*", &[]).is_some());
    }

    #[test]
    fn normalize_edge_cases() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("areas/1/"), "/areas/1");
        assert_eq!(normalize("/?x=1"), "/");
    }
}
