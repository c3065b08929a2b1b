//! Response and request types for the booking REST API.
//!
//! Field names match the backend's snake_case JSON. Fields the backend
//! computes (counts, denormalized names, timestamps) use `#[serde(default)]`
//! so partial fixtures and older backends still deserialize; unknown
//! fields are ignored.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::EnumString;

// ── Areas ────────────────────────────────────────────────────────────

/// Top-level physical zone (a floor wing), from `GET /areas/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub room_count: u32,
    #[serde(default)]
    pub desk_count: u32,
    /// URL of the floor plan SVG, if one was uploaded.
    #[serde(default)]
    pub map_svg: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

// ── Rooms ────────────────────────────────────────────────────────────

/// Subdivision of an area, from `GET /rooms/` or `GET /areas/{id}/rooms/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub name: String,
    /// Owning area id.
    pub area: i64,
    #[serde(default)]
    pub area_name: Option<String>,
    #[serde(default = "default_true")]
    pub is_bookable: bool,
    #[serde(default)]
    pub desk_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

// ── Desks ────────────────────────────────────────────────────────────

/// Bookability of a desk.
///
/// Unknown values coming from a newer backend are kept verbatim in
/// [`Other`](Self::Other) instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(from = "String", into = "String")]
pub enum DeskStatus {
    #[default]
    Available,
    Permanent,
    Disabled,
    #[strum(default)]
    Other(String),
}

impl DeskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Available => "available",
            Self::Permanent => "permanent",
            Self::Disabled => "disabled",
            Self::Other(s) => s,
        }
    }

    /// Whether a reservation can be placed on a desk with this status.
    pub fn is_bookable(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Bookable unit inside a room, from `GET /desks/`, `GET /rooms/{id}/desks/`
/// or `GET /areas/{id}/desks/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Desk {
    pub id: i64,
    /// Human identifier such as `1.L.12`.
    pub identifier: String,
    #[serde(default)]
    pub status: DeskStatus,
    /// Map coordinates on the floor plan.
    #[serde(default)]
    pub pos_x: Option<i32>,
    #[serde(default)]
    pub pos_y: Option<i32>,
    /// Owning room id.
    #[serde(default)]
    pub room: Option<i64>,
    #[serde(default)]
    pub room_name: Option<String>,
    #[serde(default)]
    pub area_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

// ── Users ────────────────────────────────────────────────────────────

/// Employee profile, from `GET /users/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    /// Human-readable permission descriptions, one per permitted area.
    #[serde(default)]
    pub area_permissions: Vec<String>,
}

impl User {
    /// `"First Last"`, falling back to the username when both are blank.
    pub fn full_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let trimmed = full.trim();
        if trimmed.is_empty() {
            self.username.clone()
        } else {
            trimmed.to_owned()
        }
    }
}

// ── Reservations ─────────────────────────────────────────────────────

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(from = "String", into = "String")]
pub enum ReservationStatus {
    #[default]
    Confirmed,
    PendingApproval,
    CheckedIn,
    Cancelled,
    #[strum(default)]
    Other(String),
}

impl ReservationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Confirmed => "confirmed",
            Self::PendingApproval => "pending_approval",
            Self::CheckedIn => "checked_in",
            Self::Cancelled => "cancelled",
            Self::Other(s) => s,
        }
    }
}

/// A day-long claim of a desk by a user, from `GET /reservations/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub checked_in_at: Option<DateTime<Utc>>,
    pub user: i64,
    #[serde(default)]
    pub user_name: Option<String>,
    pub desk: i64,
    #[serde(default)]
    pub desk_identifier: Option<String>,
    #[serde(default)]
    pub area_name: Option<String>,
}

/// Body for `POST /reservations/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReservation {
    pub user: i64,
    pub desk: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

/// Partial body for `PATCH /reservations/{id}/`. Absent fields are left
/// untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desk: Option<i64>,
}

impl ReservationUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Body for `POST /reservations/quick_book/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickBookRequest {
    pub desk_id: i64,
    pub date: NaiveDate,
}

/// Response of the one-click booking endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickBookResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub reservation: Reservation,
}

// ── String conversions for the open enums ────────────────────────────

macro_rules! open_enum_conversions {
    ($ty:ident) => {
        impl From<String> for $ty {
            fn from(s: String) -> Self {
                s.parse().unwrap_or(Self::Other(s))
            }
        }

        impl From<$ty> for String {
            fn from(v: $ty) -> Self {
                match v {
                    $ty::Other(s) => s,
                    known => known.as_str().to_owned(),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

open_enum_conversions!(DeskStatus);
open_enum_conversions!(ReservationStatus);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn area_with_counts_only() {
        let area: Area = serde_json::from_value(json!({
            "id": 1, "name": "North Wing", "room_count": 5, "desk_count": 15
        }))
        .unwrap();
        assert_eq!(area.name, "North Wing");
        assert_eq!(area.room_count, 5);
        assert!(area.map_svg.is_none());
    }

    #[test]
    fn desk_status_keeps_unknown_values() {
        let desk: Desk = serde_json::from_value(json!({
            "id": 4, "identifier": "1.L.01", "status": "reserved_for_vip"
        }))
        .unwrap();
        assert_eq!(desk.status, DeskStatus::Other("reserved_for_vip".into()));
        assert_eq!(desk.status.to_string(), "reserved_for_vip");
        assert!(!desk.status.is_bookable());
    }

    #[test]
    fn reservation_status_snake_case() {
        let status: ReservationStatus = "pending_approval".parse().unwrap();
        assert_eq!(status, ReservationStatus::PendingApproval);
        assert_eq!(
            serde_json::to_value(ReservationStatus::CheckedIn).unwrap(),
            json!("checked_in")
        );
    }

    #[test]
    fn reservation_from_backend_shape() {
        let r: Reservation = serde_json::from_value(json!({
            "id": 9,
            "date": "2024-06-15",
            "status": "confirmed",
            "notes": "",
            "created_at": "2024-06-01T08:30:00.123456Z",
            "checked_in_at": null,
            "user": 2,
            "user_name": "Ada Lovelace",
            "desk": 4,
            "desk_identifier": "1.L.01",
            "area_name": "Level 1 - Left Wing"
        }))
        .unwrap();
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert!(r.created_at.is_some());
        assert!(r.checked_in_at.is_none());
    }

    #[test]
    fn update_skips_absent_fields() {
        let update = ReservationUpdate {
            notes: Some("window seat".into()),
            ..ReservationUpdate::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "notes": "window seat" })
        );
        assert!(ReservationUpdate::default().is_empty());
    }

    #[test]
    fn user_full_name_falls_back_to_username() {
        let user: User = serde_json::from_value(json!({ "id": 1, "username": "jdoe" })).unwrap();
        assert_eq!(user.full_name(), "jdoe");
    }
}
