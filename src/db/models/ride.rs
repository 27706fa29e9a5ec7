//! Ride offer models and DTOs.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A posted ride offer as stored in the `TripDetail` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ride {
    /// Assigned by MongoDB on insert; absent until then.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub phone_number: i64,
    pub email: String,
    pub start_location: String,
    pub end_location: String,
    /// Normalized to the `YYYY-MM-DDTHH:MM` pattern by validation.
    pub date_time: String,
    pub available_seats: i64,
    pub price_per_seat: i64,
}

/// Wire representation of a ride: every stored field plus the id as hex.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideResponse {
    pub id: String,
    pub name: String,
    pub phone_number: i64,
    pub email: String,
    pub start_location: String,
    pub end_location: String,
    pub date_time: String,
    pub available_seats: i64,
    pub price_per_seat: i64,
}

impl From<Ride> for RideResponse {
    fn from(ride: Ride) -> Self {
        Self {
            id: ride.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: ride.name,
            phone_number: ride.phone_number,
            email: ride.email,
            start_location: ride.start_location,
            end_location: ride.end_location,
            date_time: ride.date_time,
            available_seats: ride.available_seats,
            price_per_seat: ride.price_per_seat,
        }
    }
}

/// A ride-offer submission as it arrives from the form.
///
/// Every field is kept as raw text so validation can report all violations
/// in one pass, including values that fail to parse as integers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RideOfferInput {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub date_time: Option<String>,
    pub available_seats: Option<String>,
    pub price_per_seat: Option<String>,
}
