//! Input validation for form submissions.
//!
//! Pure functions from raw submitted text to validated entities. Every
//! violation is collected per field, not just the first, so a form can be
//! re-rendered with all of its problems at once.

use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use thiserror::Error;

use crate::api::error::ApiError;
use crate::db::{Ride, RideOfferInput, User, UserInput};

/// The fixed submission pattern for ride date-times (`YYYY-MM-DDTHH:MM`).
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

const PHONE_MIN: i64 = 1_000_000_000;
const PHONE_MAX: i64 = 9_999_999_999;

lazy_static! {
    /// Regex for validating email addresses (local@domain.tld)
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap();
}

/// Field-level validation failures, keyed by field name.
#[derive(Debug, Clone, Default, Error)]
#[error("Validation failed for {} field(s)", .fields.len())]
pub struct ValidationErrors {
    fields: HashMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, reason: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(reason.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &HashMap<String, Vec<String>> {
        &self.fields
    }

    pub fn into_fields(self) -> HashMap<String, Vec<String>> {
        self.fields
    }

    /// First reason recorded for a field, for inline form display.
    pub fn first_for(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|reasons| reasons.first())
            .map(String::as_str)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::validation(errors.into_fields())
    }
}

/// Validate a ride-offer submission into a `Ride` ready for insertion.
///
/// The date-time is normalized back through the fixed pattern, so a value
/// like `2025-6-1T8:05` is stored as `2025-06-01T08:05`.
pub fn validate_ride_offer(input: &RideOfferInput) -> Result<Ride, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = collect(&mut errors, "name", validate_name(&input.name));
    let phone_number = collect(
        &mut errors,
        "phone_number",
        validate_phone_number(&input.phone_number),
    );
    let email = collect(&mut errors, "email", validate_email(&input.email));
    let start_location = collect(
        &mut errors,
        "start_location",
        validate_location(&input.start_location, "Start location"),
    );
    let end_location = collect(
        &mut errors,
        "end_location",
        validate_location(&input.end_location, "End location"),
    );
    let date_time = collect(&mut errors, "date_time", validate_date_time(&input.date_time));
    let available_seats = collect(
        &mut errors,
        "available_seats",
        validate_integer(&input.available_seats, "Available seats"),
    );
    let price_per_seat = collect(
        &mut errors,
        "price_per_seat",
        validate_integer(&input.price_per_seat, "Price per seat"),
    );

    match (
        name,
        phone_number,
        email,
        start_location,
        end_location,
        date_time,
        available_seats,
        price_per_seat,
    ) {
        (
            Some(name),
            Some(phone_number),
            Some(email),
            Some(start_location),
            Some(end_location),
            Some(date_time),
            Some(available_seats),
            Some(price_per_seat),
        ) => Ok(Ride {
            id: None,
            name,
            phone_number,
            email,
            start_location,
            end_location,
            date_time,
            available_seats,
            price_per_seat,
        }),
        _ => Err(errors),
    }
}

/// Validate an admin-dashboard submission into a `User` ready for upsert.
pub fn validate_user_record(input: &UserInput) -> Result<User, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = collect(&mut errors, "name", validate_name(&input.name));
    let phone_number = collect(
        &mut errors,
        "phone_number",
        validate_phone_number(&input.phone_number),
    );
    let email = collect(&mut errors, "email", validate_email(&input.email));

    match (name, phone_number, email) {
        (Some(name), Some(phone_number), Some(email)) => Ok(User {
            id: None,
            name,
            phone_number,
            email,
        }),
        _ => Err(errors),
    }
}

fn collect<T>(errors: &mut ValidationErrors, field: &str, result: Result<T, String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(reason) => {
            errors.add(field, reason);
            None
        }
    }
}

/// Presence check shared by every field; empty and whitespace-only values
/// count as missing.
fn required<'a>(value: &'a Option<String>, what: &str) -> Result<&'a str, String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(format!("{} is required", what)),
    }
}

/// Validate a person's name
pub fn validate_name(name: &Option<String>) -> Result<String, String> {
    required(name, "Name").map(str::to_string)
}

/// Validate a 10-digit phone number
pub fn validate_phone_number(phone: &Option<String>) -> Result<i64, String> {
    let raw = required(phone, "Phone number")?;

    let number: i64 = raw
        .parse()
        .map_err(|_| "Phone number must be a number".to_string())?;

    if !(PHONE_MIN..=PHONE_MAX).contains(&number) {
        return Err("Phone number must be a 10-digit number".to_string());
    }

    Ok(number)
}

/// Validate an email address
pub fn validate_email(email: &Option<String>) -> Result<String, String> {
    let raw = required(email, "Email")?;

    if !EMAIL_REGEX.is_match(raw) {
        return Err("Invalid email format".to_string());
    }

    Ok(raw.to_string())
}

/// Validate a start or end location
pub fn validate_location(location: &Option<String>, what: &str) -> Result<String, String> {
    required(location, what).map(str::to_string)
}

/// Validate and normalize a date-time under the fixed pattern
pub fn validate_date_time(date_time: &Option<String>) -> Result<String, String> {
    let raw = required(date_time, "Date and time")?;

    let parsed = NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT)
        .map_err(|_| "Date and time must match the pattern YYYY-MM-DDTHH:MM".to_string())?;

    Ok(parsed.format(DATE_TIME_FORMAT).to_string())
}

/// Validate a required integer field (seats, price). No range is enforced
/// beyond fitting in an i64.
pub fn validate_integer(value: &Option<String>, what: &str) -> Result<i64, String> {
    let raw = required(value, what)?;

    raw.parse()
        .map_err(|_| format!("{} must be a number", what))
}
