//! Field validation rules.
//!
//! Bounds are measured in characters, not bytes. Every failing field is
//! reported, not just the first.

use once_cell::sync::Lazy;
use regex::Regex;

use super::FieldErrors;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub fn is_email_shaped(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

fn check_length(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    min: usize,
    max: usize,
    too_short: &str,
    too_long: &str,
) {
    let len = value.chars().count();
    if len < min {
        errors.push(field, too_short);
    } else if len > max {
        errors.push(field, too_long);
    }
}

pub struct CustomerFields<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub address1: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub zip: &'a str,
}

pub fn validate_customer(fields: &CustomerFields<'_>) -> FieldErrors {
    let mut errors = FieldErrors::new();

    check_length(
        &mut errors,
        "first_name",
        fields.first_name,
        1,
        32,
        "First name is required",
        "First name is too long",
    );
    check_length(
        &mut errors,
        "last_name",
        fields.last_name,
        1,
        32,
        "Last name is required",
        "Last name is too long",
    );
    if !is_email_shaped(fields.email) {
        errors.push("email", "Invalid email address");
    }
    check_length(
        &mut errors,
        "phone",
        fields.phone,
        10,
        15,
        "Phone number is too short",
        "Phone number is too long",
    );
    check_length(
        &mut errors,
        "address1",
        fields.address1,
        10,
        100,
        "Address is too short",
        "Address is too long",
    );
    check_length(
        &mut errors,
        "city",
        fields.city,
        2,
        32,
        "City is too short",
        "City is too long",
    );
    check_length(
        &mut errors,
        "state",
        fields.state,
        2,
        32,
        "State is too short",
        "State is too long",
    );
    check_length(
        &mut errors,
        "zip",
        fields.zip,
        2,
        10,
        "Zip code is too short",
        "Zip code is too long",
    );

    errors
}

pub fn validate_ticket(title: &str, description: &str, tech: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();

    check_length(
        &mut errors,
        "title",
        title,
        1,
        100,
        "Title is required",
        "Title is too long.",
    );
    check_length(
        &mut errors,
        "description",
        description,
        1,
        1000,
        "Description is required.",
        "Description is too long",
    );
    if !is_email_shaped(tech) {
        errors.push("tech", "Invalid email address.");
    }

    errors
}
