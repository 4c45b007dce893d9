//! Booking and payment status enumerations.
//!
//! The wire spellings are fixed by the frontend, including the capitalised
//! `Cancel` and the space in `not paid`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validation::ValidationError;

// ---------------------------------------------------------------------------
// Booking status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BookingStatus {
    #[default]
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "confirmed")]
    Confirmed,
    #[serde(rename = "Cancel")]
    Cancel,
}

impl BookingStatus {
    /// Every accepted spelling, in the order the API documents them.
    pub const ACCEPTED: [&'static str; 3] = ["pending", "confirmed", "Cancel"];

    /// The string stored in the DB and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending   => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancel    => "Cancel",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending"   => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "Cancel"    => Ok(BookingStatus::Cancel),
            _ => Err(ValidationError::new("status", "Invalid status value")),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Payment status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "paid", alias = "Paid")]
    Paid,
    #[default]
    #[serde(rename = "not paid", alias = "Not Paid")]
    NotPaid,
}

impl PaymentStatus {
    /// Every accepted spelling. Parsing normalises to the lowercase form.
    pub const ACCEPTED: [&'static str; 4] = ["paid", "not paid", "Paid", "Not Paid"];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid    => "paid",
            PaymentStatus::NotPaid => "not paid",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" | "Paid"         => Ok(PaymentStatus::Paid),
            "not paid" | "Not Paid" => Ok(PaymentStatus::NotPaid),
            _ => Err(ValidationError::new("paymentStatus", "Invalid status value")),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_status_whitelist() {
        for s in BookingStatus::ACCEPTED {
            let parsed: BookingStatus = s.parse().unwrap();
            assert_eq!(parsed.as_str(), s);
        }
        assert!("cancel".parse::<BookingStatus>().is_err());
        assert!("Confirmed".parse::<BookingStatus>().is_err());
        assert!("".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_booking_status_wire_format() {
        let json = serde_json::to_string(&BookingStatus::Cancel).unwrap();
        assert_eq!(json, "\"Cancel\"");
        assert_eq!(BookingStatus::default(), BookingStatus::Pending);
    }

    #[test]
    fn test_payment_status_accepts_both_casings() {
        for s in PaymentStatus::ACCEPTED {
            let parsed: PaymentStatus = s.parse().unwrap();
            assert_eq!(parsed.as_str(), s.to_lowercase());
        }
        assert_eq!("Paid".parse::<PaymentStatus>().unwrap(), PaymentStatus::Paid);
        assert_eq!("not paid".parse::<PaymentStatus>().unwrap(), PaymentStatus::NotPaid);
        assert_eq!("Not Paid".parse::<PaymentStatus>().unwrap(), PaymentStatus::NotPaid);
        assert!("unpaid".parse::<PaymentStatus>().is_err());

        let from_alias: PaymentStatus = serde_json::from_str("\"Not Paid\"").unwrap();
        assert_eq!(from_alias, PaymentStatus::NotPaid);
        assert_eq!(serde_json::to_string(&from_alias).unwrap(), "\"not paid\"");
    }
}
