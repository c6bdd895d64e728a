use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::TimeSlot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub purpose: String,
    pub room: String,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub created_at: DateTime<Utc>,
}

/// A validated booking that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub purpose: String,
    pub room: String,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
}

/// Raw create request as submitted by the booking form. Every field is
/// optional here so that missing fields become validation errors instead of
/// deserialization failures.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub purpose: Option<String>,
    pub room: Option<String>,
    pub date: Option<String>,
    pub time_slot: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilter {
    pub date: Option<NaiveDate>,
    pub room: Option<String>,
}
