// Booking API HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, uniform request/response
// logging and error propagation. Every endpoint issues exactly one request
// and hands back the parsed body. Nothing is retried.

use std::fmt::Display;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use crate::error::Error;
use crate::models::{
    Area, Desk, NewReservation, QuickBookRequest, QuickBookResponse, Reservation,
    ReservationUpdate, Room, User,
};
use crate::transport::TransportConfig;

/// Base URL of the booking backend. Not configurable at runtime.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/";

/// Async client for the booking REST API.
///
/// Paths follow the backend's trailing-slash convention (`areas/`,
/// `areas/{id}/rooms/`). Path parameters are taken as anything `Display`
/// and are not validated before being put on the wire.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Client against [`DEFAULT_BASE_URL`] with the default 10s timeout and
    /// JSON content type.
    pub fn new() -> Result<Self, Error> {
        let base_url = Url::parse(DEFAULT_BASE_URL)?;
        Self::with_base_url(base_url, &TransportConfig::default())
    }

    /// Client against an explicit base URL (mock servers, staging).
    ///
    /// A missing trailing slash on the base path is added so relative
    /// joins keep the `/api` segment.
    pub fn with_base_url(mut base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// The base URL every endpoint path is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Areas ────────────────────────────────────────────────────────

    pub async fn fetch_areas(&self) -> Result<Vec<Area>, Error> {
        self.get("areas/").await
    }

    pub async fn fetch_area(&self, area_id: impl Display) -> Result<Area, Error> {
        self.get(&format!("areas/{area_id}/")).await
    }

    pub async fn fetch_area_rooms(&self, area_id: impl Display) -> Result<Vec<Room>, Error> {
        self.get(&format!("areas/{area_id}/rooms/")).await
    }

    pub async fn fetch_area_desks(&self, area_id: impl Display) -> Result<Vec<Desk>, Error> {
        self.get(&format!("areas/{area_id}/desks/")).await
    }

    // ── Rooms ────────────────────────────────────────────────────────

    pub async fn fetch_rooms(&self) -> Result<Vec<Room>, Error> {
        self.get("rooms/").await
    }

    pub async fn fetch_room(&self, room_id: impl Display) -> Result<Room, Error> {
        self.get(&format!("rooms/{room_id}/")).await
    }

    pub async fn fetch_room_desks(&self, room_id: impl Display) -> Result<Vec<Desk>, Error> {
        self.get(&format!("rooms/{room_id}/desks/")).await
    }

    // ── Desks ────────────────────────────────────────────────────────

    pub async fn fetch_desks(&self) -> Result<Vec<Desk>, Error> {
        self.get("desks/").await
    }

    pub async fn fetch_desk(&self, desk_id: impl Display) -> Result<Desk, Error> {
        self.get(&format!("desks/{desk_id}/")).await
    }

    // ── Users ────────────────────────────────────────────────────────

    pub async fn fetch_users(&self) -> Result<Vec<User>, Error> {
        self.get("users/").await
    }

    // ── Reservations ─────────────────────────────────────────────────

    pub async fn fetch_reservations(&self) -> Result<Vec<Reservation>, Error> {
        self.get("reservations/").await
    }

    pub async fn create_reservation(&self, body: &NewReservation) -> Result<Reservation, Error> {
        self.send_json(Method::POST, "reservations/", body).await
    }

    pub async fn update_reservation(
        &self,
        reservation_id: impl Display,
        body: &ReservationUpdate,
    ) -> Result<Reservation, Error> {
        self.send_json(Method::PATCH, &format!("reservations/{reservation_id}/"), body)
            .await
    }

    /// Delete a reservation. The backend answers 204 with no body; any
    /// body that does come back is ignored.
    pub async fn delete_reservation(&self, reservation_id: impl Display) -> Result<(), Error> {
        let url = self.url(&format!("reservations/{reservation_id}/"))?;
        self.execute(Method::DELETE, url, None::<&()>).await?;
        Ok(())
    }

    /// One-click booking through `reservations/quick_book/`. The backend
    /// picks the user and validates desk availability.
    pub async fn quick_book(&self, body: &QuickBookRequest) -> Result<QuickBookResponse, Error> {
        self.send_json(Method::POST, "reservations/quick_book/", body)
            .await
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        let value = self.execute(Method::GET, url, None::<&()>).await?;
        decode(value)
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        let value = self.execute(method, url, Some(body)).await?;
        decode(value)
    }

    /// Issue one request, log it and its outcome, and return the JSON body
    /// (`Value::Null` for an empty body).
    async fn execute<B: Serialize + Sync>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Value, Error> {
        debug!(method = %method, url = %url, "API request");

        let mut builder = self.http.request(method.clone(), url.clone());
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = match builder.send().await {
            Ok(resp) => resp,
            Err(e) => {
                error!(
                    method = %method,
                    url = %url,
                    status = ?e.status().map(|s| s.as_u16()),
                    message = %e,
                    "API error"
                );
                return Err(Error::Transport(e));
            }
        };

        let status = resp.status();
        let text = match resp.text().await {
            Ok(text) => text,
            Err(e) => {
                error!(method = %method, url = %url, status = status.as_u16(), message = %e, "API error");
                return Err(Error::Transport(e));
            }
        };

        if !status.is_success() {
            error!(
                method = %method,
                url = %url,
                status = status.as_u16(),
                data = %text,
                "API error"
            );
            return Err(Error::Http {
                status: status.as_u16(),
                url: url.to_string(),
                body: text,
            });
        }

        let value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| {
                let err = Error::Deserialization {
                    message: e.to_string(),
                    body: text.clone(),
                };
                error!(method = %method, url = %url, status = status.as_u16(), message = %err, "API error");
                err
            })?
        };

        debug!(
            status = status.as_u16(),
            url = %url,
            data_length = %data_length(&value),
            "API response"
        );

        Ok(value)
    }
}

/// Deserialize an already-parsed body into the endpoint's response type.
fn decode<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    serde_json::from_value::<T>(value.clone()).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: value.to_string(),
    })
}

/// Length of a list payload for the response log line, `N/A` otherwise.
fn data_length(value: &Value) -> String {
    match value {
        Value::Array(items) => items.len().to_string(),
        _ => "N/A".into(),
    }
}
