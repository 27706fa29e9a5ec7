//! Ride handlers: posting, listing, and searching ride offers.

use axum::{
    extract::{Query, State},
    Form, Json,
};
use futures::TryStreamExt;
use mongodb::bson::Document;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::validation::validate_ride_offer;
use crate::db::{Db, Ride, RideOfferInput, RideResponse};
use crate::AppState;

/// Create a ride offer from a form body (POST /post-ride)
pub async fn post_ride(
    State(state): State<Arc<AppState>>,
    Form(input): Form<RideOfferInput>,
) -> Result<Json<Value>, ApiError> {
    let db = state.db()?;
    let ride = validate_ride_offer(&input)?;
    insert_ride(db, &ride).await?;

    Ok(Json(json!({ "message": "Ride posted successfully!" })))
}

/// Search rides by exact start/end location (GET /search)
pub async fn search_rides(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<RideResponse>>, ApiError> {
    let db = state.db()?;

    let rides: Vec<Ride> = db
        .rides()
        .find(search_filter(&query))
        .await?
        .try_collect()
        .await?;

    Ok(Json(rides.into_iter().map(RideResponse::from).collect()))
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Build the search filter. A missing or empty parameter matches any value,
/// so the key is left out of the filter entirely.
pub(crate) fn search_filter(query: &SearchQuery) -> Document {
    let mut filter = Document::new();

    if let Some(start) = query.start.as_deref().filter(|s| !s.is_empty()) {
        filter.insert("start_location", start);
    }
    if let Some(end) = query.end.as_deref().filter(|s| !s.is_empty()) {
        filter.insert("end_location", end);
    }

    filter
}

pub(crate) async fn insert_ride(db: &Db, ride: &Ride) -> Result<(), ApiError> {
    db.rides().insert_one(ride).await?;
    Ok(())
}

pub(crate) async fn fetch_rides(db: &Db) -> Result<Vec<Ride>, ApiError> {
    let rides = db
        .rides()
        .find(Document::new())
        .await?
        .try_collect()
        .await?;
    Ok(rides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn query(start: Option<&str>, end: Option<&str>) -> SearchQuery {
        SearchQuery {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        }
    }

    #[test]
    fn test_search_filter_both_parameters() {
        let filter = search_filter(&query(Some("NY"), Some("Boston")));
        assert_eq!(filter, doc! { "start_location": "NY", "end_location": "Boston" });
    }

    #[test]
    fn test_search_filter_single_parameter() {
        let filter = search_filter(&query(Some("NY"), None));
        assert_eq!(filter, doc! { "start_location": "NY" });

        let filter = search_filter(&query(None, Some("Boston")));
        assert_eq!(filter, doc! { "end_location": "Boston" });
    }

    #[test]
    fn test_search_filter_missing_parameters_match_everything() {
        assert_eq!(search_filter(&query(None, None)), Document::new());
    }

    #[test]
    fn test_search_filter_empty_string_is_treated_as_missing() {
        let filter = search_filter(&query(Some(""), Some("Boston")));
        assert_eq!(filter, doc! { "end_location": "Boston" });
    }
}
