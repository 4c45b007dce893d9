//! Field validation for request payloads.

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("valid mobile regex"));

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

pub type Validated<T> = std::result::Result<T, ValidationError>;

pub fn non_blank<'a>(field: &str, value: &'a str) -> Validated<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, format!("Field {field} is missing or empty")));
    }
    Ok(trimmed)
}

pub fn email(value: &str) -> Validated<String> {
    let value = non_blank("email", value)?;
    if !EMAIL_RE.is_match(value) {
        return Err(ValidationError::new("email", "Invalid email address"));
    }
    Ok(value.to_lowercase())
}

pub fn mobile_number(value: &str) -> Validated<String> {
    let value = non_blank("mobileNumber", value)?;
    if !MOBILE_RE.is_match(value) {
        return Err(ValidationError::new("mobileNumber", "Mobile number must be 10 digits"));
    }
    Ok(value.to_string())
}

/// Dates travel as `YYYY-MM-DD`, the same key the earnings report groups on.
pub fn date(field: &str, value: &str) -> Validated<NaiveDate> {
    let value = non_blank(field, value)?;
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ValidationError::new(field, format!("{field} must be a YYYY-MM-DD date")))
}

pub fn time(field: &str, value: &str) -> Validated<NaiveTime> {
    let value = non_blank(field, value)?;
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| ValidationError::new(field, format!("{field} must be an HH:MM time")))
}

pub fn guest_count(value: i64) -> Validated<i64> {
    if value < 1 {
        return Err(ValidationError::new("guestCount", "guestCount must be at least 1"));
    }
    Ok(value)
}

pub fn rating(value: i64) -> Validated<i64> {
    if !(1..=5).contains(&value) {
        return Err(ValidationError::new("rating", "rating must be between 1 and 5"));
    }
    Ok(value)
}

pub fn price(value: f64) -> Validated<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::new("price", "price must be a non-negative number"));
    }
    Ok(value)
}

pub fn password(value: &str) -> Validated<&str> {
    if value.chars().count() < 6 {
        return Err(ValidationError::new("password", "Password must be at least 6 characters"));
    }
    Ok(value)
}
