// HTML surface: ride form, rides listing, admin dashboard.
// Uses Askama templates rendered server-side.

mod templates;

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::rides::{fetch_rides, insert_ride};
use crate::api::users::{fetch_users, upsert_user};
use crate::api::validation::{validate_ride_offer, validate_user_record, ValidationErrors};
use crate::db::{RideOfferInput, RideResponse, UserInput};
use crate::AppState;

pub use templates::*;

const DB_ERROR_BANNER: &str = "Database connection error";

// Helper to render templates and handle errors
fn render_template<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Template error: {}", e),
        )
            .into_response(),
    }
}

pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(ride_form).post(ride_submit))
        .route("/success", get(success))
        .route("/get-ride", get(rides_page))
        .route("/admin-dashboard", get(admin_dashboard).post(admin_submit))
}

// Ride offer form
async fn ride_form() -> Response {
    render_template(RideFormTemplate::empty())
}

// Ride offer submission: redirect to /success, or re-render the form with
// the submitted values and inline errors.
async fn ride_submit(
    State(state): State<Arc<AppState>>,
    Form(input): Form<RideOfferInput>,
) -> Response {
    let db = match state.db() {
        Ok(db) => db,
        Err(_) => {
            return render_template(RideFormTemplate::with_errors(
                &input,
                &ValidationErrors::new(),
                Some(DB_ERROR_BANNER.to_string()),
            ))
        }
    };

    let ride = match validate_ride_offer(&input) {
        Ok(ride) => ride,
        Err(errors) => return render_template(RideFormTemplate::with_errors(&input, &errors, None)),
    };

    match insert_ride(db, &ride).await {
        Ok(()) => Redirect::to("/success").into_response(),
        Err(e) => {
            tracing::error!("Failed to insert ride: {}", e);
            render_template(RideFormTemplate::with_errors(
                &input,
                &ValidationErrors::new(),
                Some("Failed to post the ride, please try again".to_string()),
            ))
        }
    }
}

async fn success() -> &'static str {
    "Your ride has been successfully posted!"
}

// All posted rides as a page
async fn rides_page(State(state): State<Arc<AppState>>) -> Response {
    match state.db() {
        Ok(db) => match fetch_rides(db).await {
            Ok(rides) => render_template(RidesTemplate {
                banner: None,
                rides: rides.into_iter().map(RideResponse::from).collect(),
            }),
            Err(e) => {
                tracing::error!("Failed to load rides: {}", e);
                render_template(RidesTemplate {
                    banner: Some("Failed to load rides".to_string()),
                    rides: Vec::new(),
                })
            }
        },
        Err(_) => render_template(RidesTemplate {
            banner: Some(DB_ERROR_BANNER.to_string()),
            rides: Vec::new(),
        }),
    }
}

/// Outcome carried across the post/redirect/get of the dashboard form.
#[derive(Debug, Default, Deserialize)]
struct DashboardQuery {
    outcome: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct OutcomeQuery<'a> {
    outcome: &'a str,
    name: &'a str,
}

fn outcome_banner(query: &DashboardQuery) -> Option<String> {
    match (query.outcome.as_deref(), query.name.as_deref()) {
        (Some("added"), Some(name)) => Some(format!("{} added successfully!", name)),
        (Some("updated"), Some(name)) => Some(format!("{} updated successfully!", name)),
        _ => None,
    }
}

// User management page
async fn admin_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let banner = outcome_banner(&query);

    let (banner, users) = match state.db() {
        Ok(db) => match fetch_users(db).await {
            Ok(users) => (banner, users.into_iter().map(UserRow::from).collect()),
            Err(e) => {
                tracing::error!("Failed to load users: {}", e);
                (Some("Failed to load users".to_string()), Vec::new())
            }
        },
        Err(_) => (Some(DB_ERROR_BANNER.to_string()), Vec::new()),
    };

    render_template(AdminDashboardTemplate::new(
        &UserInput::default(),
        &ValidationErrors::new(),
        banner,
        users,
    ))
}

// Dashboard submission: atomic upsert by email, then redirect so the
// outcome survives as query parameters.
async fn admin_submit(
    State(state): State<Arc<AppState>>,
    Form(input): Form<UserInput>,
) -> Response {
    let db = match state.db() {
        Ok(db) => db,
        Err(_) => {
            return render_template(AdminDashboardTemplate::new(
                &input,
                &ValidationErrors::new(),
                Some(DB_ERROR_BANNER.to_string()),
                Vec::new(),
            ))
        }
    };

    let user = match validate_user_record(&input) {
        Ok(user) => user,
        Err(errors) => {
            let users = match fetch_users(db).await {
                Ok(users) => users.into_iter().map(UserRow::from).collect(),
                Err(_) => Vec::new(),
            };
            return render_template(AdminDashboardTemplate::new(&input, &errors, None, users));
        }
    };

    match upsert_user(db, &user).await {
        Ok(outcome) => {
            let query = OutcomeQuery {
                outcome: outcome.as_str(),
                name: &user.name,
            };
            match serde_urlencoded::to_string(&query) {
                Ok(qs) => Redirect::to(&format!("/admin-dashboard?{}", qs)).into_response(),
                Err(_) => Redirect::to("/admin-dashboard").into_response(),
            }
        }
        Err(e) => {
            tracing::error!("Failed to upsert user: {}", e);
            render_template(AdminDashboardTemplate::new(
                &input,
                &ValidationErrors::new(),
                Some("Failed to save the user, please try again".to_string()),
                Vec::new(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_banner_formats() {
        let query = DashboardQuery {
            outcome: Some("added".to_string()),
            name: Some("Ann".to_string()),
        };
        assert_eq!(outcome_banner(&query).unwrap(), "Ann added successfully!");

        let query = DashboardQuery {
            outcome: Some("updated".to_string()),
            name: Some("Ann".to_string()),
        };
        assert_eq!(outcome_banner(&query).unwrap(), "Ann updated successfully!");
    }

    #[test]
    fn test_outcome_banner_ignores_partial_or_unknown_parameters() {
        assert_eq!(outcome_banner(&DashboardQuery::default()), None);

        let query = DashboardQuery {
            outcome: Some("added".to_string()),
            name: None,
        };
        assert_eq!(outcome_banner(&query), None);

        let query = DashboardQuery {
            outcome: Some("exploded".to_string()),
            name: Some("Ann".to_string()),
        };
        assert_eq!(outcome_banner(&query), None);
    }

    #[test]
    fn test_outcome_query_is_url_encoded() {
        let query = OutcomeQuery {
            outcome: "updated",
            name: "Ann Example",
        };
        let qs = serde_urlencoded::to_string(&query).unwrap();
        assert_eq!(qs, "outcome=updated&name=Ann+Example");
    }
}
