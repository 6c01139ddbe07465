//! Checks run before a booking leaves the form.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::models::{BookingRequest, Field};

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").unwrap()
});

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_date(date: &str) -> bool {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

/// Validate every required field, collecting all failures.
pub fn validate(request: &BookingRequest) -> Result<(), ValidationError> {
    let mut err = ValidationError::new();

    let required = [
        (Field::Name, &request.name),
        (Field::PhoneNumber, &request.phone_number),
        (Field::Email, &request.email),
        (Field::SelectedDate, &request.selected_date),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            err.push(field, "is required");
        }
    }

    if request.selected_body_parts.is_empty() {
        err.push(Field::SelectedBodyParts, "must contain at least one body part");
    }

    // Format checks only for fields that are present.
    if !err.has(Field::PhoneNumber) && !is_valid_phone(&request.phone_number) {
        err.push(Field::PhoneNumber, "must be exactly 10 digits");
    }
    if !err.has(Field::Email) && !is_valid_email(&request.email) {
        err.push(Field::Email, "is not a valid email address");
    }
    if !err.has(Field::SelectedDate) && !is_valid_date(&request.selected_date) {
        err.push(Field::SelectedDate, "must be a calendar date (YYYY-MM-DD)");
    }

    if err.is_empty() {
        Ok(())
    } else {
        Err(err)
    }
}
