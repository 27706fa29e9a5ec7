// Askama template definitions

use askama::Template;

use crate::api::validation::ValidationErrors;
use crate::db::{RideOfferInput, RideResponse, User, UserInput};

/// One form field prepared for re-rendering: the submitted value plus the
/// first validation error recorded against it.
pub struct FieldView {
    pub value: String,
    pub error: Option<String>,
}

impl FieldView {
    fn new(value: &Option<String>, errors: &ValidationErrors, field: &str) -> Self {
        Self {
            value: value.clone().unwrap_or_default(),
            error: errors.first_for(field).map(str::to_string),
        }
    }
}

// Ride offer form
#[derive(Template)]
#[template(path = "ride_form.html")]
pub struct RideFormTemplate {
    pub banner: Option<String>,
    pub name: FieldView,
    pub phone_number: FieldView,
    pub email: FieldView,
    pub start_location: FieldView,
    pub end_location: FieldView,
    pub date_time: FieldView,
    pub available_seats: FieldView,
    pub price_per_seat: FieldView,
}

impl RideFormTemplate {
    pub fn empty() -> Self {
        Self::with_errors(&RideOfferInput::default(), &ValidationErrors::new(), None)
    }

    pub fn with_errors(
        input: &RideOfferInput,
        errors: &ValidationErrors,
        banner: Option<String>,
    ) -> Self {
        Self {
            banner,
            name: FieldView::new(&input.name, errors, "name"),
            phone_number: FieldView::new(&input.phone_number, errors, "phone_number"),
            email: FieldView::new(&input.email, errors, "email"),
            start_location: FieldView::new(&input.start_location, errors, "start_location"),
            end_location: FieldView::new(&input.end_location, errors, "end_location"),
            date_time: FieldView::new(&input.date_time, errors, "date_time"),
            available_seats: FieldView::new(&input.available_seats, errors, "available_seats"),
            price_per_seat: FieldView::new(&input.price_per_seat, errors, "price_per_seat"),
        }
    }
}

// Rides listing page
#[derive(Template)]
#[template(path = "rides.html")]
pub struct RidesTemplate {
    pub banner: Option<String>,
    pub rides: Vec<RideResponse>,
}

/// A user prepared for the dashboard table; the id is shown here as hex,
/// unlike the JSON admin surface.
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub phone_number: i64,
    pub email: String,
}

impl From<User> for UserRow {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: user.name,
            phone_number: user.phone_number,
            email: user.email,
        }
    }
}

// Admin dashboard: upsert form + users table
#[derive(Template)]
#[template(path = "admin_dashboard.html")]
pub struct AdminDashboardTemplate {
    pub banner: Option<String>,
    pub name: FieldView,
    pub phone_number: FieldView,
    pub email: FieldView,
    pub users: Vec<UserRow>,
}

impl AdminDashboardTemplate {
    pub fn new(
        input: &UserInput,
        errors: &ValidationErrors,
        banner: Option<String>,
        users: Vec<UserRow>,
    ) -> Self {
        Self {
            banner,
            name: FieldView::new(&input.name, errors, "name"),
            phone_number: FieldView::new(&input.phone_number, errors, "phone_number"),
            email: FieldView::new(&input.email, errors, "email"),
            users,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askama::Template;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_empty_ride_form_renders() {
        let html = RideFormTemplate::empty().render().unwrap();
        assert!(html.contains("<form"));
        assert!(html.contains("name=\"phone_number\""));
        assert!(html.contains("name=\"date_time\""));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_ride_form_rerenders_values_and_errors() {
        let input = RideOfferInput {
            name: Some("Ann".to_string()),
            email: Some("nope".to_string()),
            ..RideOfferInput::default()
        };
        let mut errors = ValidationErrors::new();
        errors.add("email", "Invalid email format");

        let html = RideFormTemplate::with_errors(&input, &errors, None)
            .render()
            .unwrap();
        assert!(html.contains("value=\"Ann\""));
        assert!(html.contains("value=\"nope\""));
        assert!(html.contains("Invalid email format"));
    }

    #[test]
    fn test_ride_form_banner() {
        let html = RideFormTemplate::with_errors(
            &RideOfferInput::default(),
            &ValidationErrors::new(),
            Some("Database connection error".to_string()),
        )
        .render()
        .unwrap();
        assert!(html.contains("Database connection error"));
    }

    #[test]
    fn test_rides_page_lists_every_field() {
        let template = RidesTemplate {
            banner: None,
            rides: vec![RideResponse {
                id: ObjectId::new().to_hex(),
                name: "Ann".to_string(),
                phone_number: 9876543210,
                email: "ann@x.com".to_string(),
                start_location: "NY".to_string(),
                end_location: "Boston".to_string(),
                date_time: "2025-06-01T08:00".to_string(),
                available_seats: 3,
                price_per_seat: 20,
            }],
        };

        let html = template.render().unwrap();
        assert!(html.contains("Ann"));
        assert!(html.contains("NY"));
        assert!(html.contains("Boston"));
        assert!(html.contains("2025-06-01T08:00"));
        // Price is part of the listing alongside the other fields
        assert!(html.contains("20"));
    }

    #[test]
    fn test_dashboard_table_shows_id_as_hex() {
        let id = ObjectId::new();
        let row = UserRow::from(User {
            id: Some(id),
            name: "Ann".to_string(),
            phone_number: 9876543210,
            email: "ann@x.com".to_string(),
        });
        assert_eq!(row.id, id.to_hex());

        let html = AdminDashboardTemplate::new(
            &UserInput::default(),
            &ValidationErrors::new(),
            None,
            vec![row],
        )
        .render()
        .unwrap();
        assert!(html.contains(&id.to_hex()));
        assert!(html.contains("ann@x.com"));
    }
}
