/// Core marketplace records.
/// These are the Rust representations of the rows kept by workwave-db and the
/// JSON documents exchanged with the frontend (camelCase on the wire).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::status::{BookingStatus, PaymentStatus};
use crate::validation::{self, ValidationError, Validated};

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, phone: Option<String>, password_hash: String) -> Self {
        Self { id: Uuid::new_v4(), name, email, phone, password_hash, created_at: Utc::now() }
    }
}

/// Business owner account. Same shape as [`User`] but stored separately and
/// issued tokens with the admin role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Admin {
    pub fn new(name: String, email: String, phone: Option<String>, password_hash: String) -> Self {
        Self { id: Uuid::new_v4(), name, email, phone, password_hash, created_at: Utc::now() }
    }
}

// ---------------------------------------------------------------------------
// Business / Service
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: Uuid,
    pub admin_id: Uuid,
    pub business_name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_id: Uuid,
    pub service_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub date_of_birth: Option<String>,
    pub mobile_number: String,
    pub guest_count: i64,
    /// `YYYY-MM-DD`
    pub booking_date: String,
    /// `HH:MM`
    pub booking_time: String,
    pub customer_notes: Option<String>,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Booking payload as submitted by the booking form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    pub mobile_number: String,
    #[serde(deserialize_with = "number_or_string")]
    pub guest_count: i64,
    pub booking_date: String,
    pub booking_time: String,
    #[serde(default)]
    pub customer_notes: Option<String>,
}

impl NewBooking {
    /// Check every field and return the normalised payload.
    pub fn validate(self) -> Validated<Self> {
        let date_of_birth = match self.date_of_birth.as_deref().map(str::trim) {
            Some(dob) if !dob.is_empty() => {
                validation::date("dateOfBirth", dob)?;
                Some(dob.to_string())
            }
            _ => None,
        };
        validation::date("bookingDate", &self.booking_date)?;
        validation::time("bookingTime", &self.booking_time)?;

        Ok(Self {
            name: validation::non_blank("name", &self.name)?.to_string(),
            email: validation::email(&self.email)?,
            date_of_birth,
            mobile_number: validation::mobile_number(&self.mobile_number)?,
            guest_count: validation::guest_count(self.guest_count)?,
            booking_date: self.booking_date.trim().to_string(),
            booking_time: self.booking_time.trim().to_string(),
            customer_notes: self.customer_notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        })
    }
}

/// A booking field a client may change through the generic update endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingField {
    Name,
    Email,
    DateOfBirth,
    MobileNumber,
    GuestCount,
    BookingDate,
    BookingTime,
    CustomerNotes,
    Status,
}

impl BookingField {
    pub const ALL: [BookingField; 9] = [
        BookingField::Name,
        BookingField::Email,
        BookingField::DateOfBirth,
        BookingField::MobileNumber,
        BookingField::GuestCount,
        BookingField::BookingDate,
        BookingField::BookingTime,
        BookingField::CustomerNotes,
        BookingField::Status,
    ];

    /// The camelCase key used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingField::Name          => "name",
            BookingField::Email         => "email",
            BookingField::DateOfBirth   => "dateOfBirth",
            BookingField::MobileNumber  => "mobileNumber",
            BookingField::GuestCount    => "guestCount",
            BookingField::BookingDate   => "bookingDate",
            BookingField::BookingTime   => "bookingTime",
            BookingField::CustomerNotes => "customerNotes",
            BookingField::Status        => "status",
        }
    }
}

impl FromStr for BookingField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ValidationError::new(s, format!("Unknown field: {s}")))
    }
}

impl Booking {
    pub fn create(new: NewBooking, user_id: Uuid, business_id: Uuid, service_id: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            business_id,
            service_id,
            name: new.name,
            email: new.email,
            date_of_birth: new.date_of_birth,
            mobile_number: new.mobile_number,
            guest_count: new.guest_count,
            booking_date: new.booking_date,
            booking_time: new.booking_time,
            customer_notes: new.customer_notes,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::NotPaid,
            payment_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply one edit, validating the value the same way booking creation
    /// does. `value` is expected to be trimmed and non-blank.
    pub fn apply_field(&mut self, field: BookingField, value: &str) -> Validated<()> {
        let key = field.as_str();
        match field {
            BookingField::Name          => self.name = value.to_string(),
            BookingField::Email         => self.email = validation::email(value)?,
            BookingField::DateOfBirth   => {
                validation::date(key, value)?;
                self.date_of_birth = Some(value.to_string());
            }
            BookingField::MobileNumber  => self.mobile_number = validation::mobile_number(value)?,
            BookingField::GuestCount    => {
                let count = value.parse::<i64>()
                    .map_err(|_| ValidationError::new(key, "guestCount must be a number"))?;
                self.guest_count = validation::guest_count(count)?;
            }
            BookingField::BookingDate   => {
                validation::date(key, value)?;
                self.booking_date = value.to_string();
            }
            BookingField::BookingTime   => {
                validation::time(key, value)?;
                self.booking_time = value.to_string();
            }
            BookingField::CustomerNotes => self.customer_notes = Some(value.to_string()),
            BookingField::Status        => self.status = value.parse()?,
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Review
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub business_id: Uuid,
    pub user_id: Uuid,
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Forms post numbers as strings as often as not.
fn number_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form() -> serde_json::Value {
        json!({
            "name": "Asha Rao",
            "email": "asha@example.com",
            "mobileNumber": "9876543210",
            "guestCount": "3",
            "bookingDate": "2024-05-01",
            "bookingTime": "18:30",
            "customerNotes": "  window seat "
        })
    }

    #[test]
    fn test_new_booking_accepts_string_guest_count() {
        let new: NewBooking = serde_json::from_value(form()).unwrap();
        let new = new.validate().unwrap();
        assert_eq!(new.guest_count, 3);
        assert_eq!(new.customer_notes.as_deref(), Some("window seat"));
        assert!(new.date_of_birth.is_none());
    }

    #[test]
    fn test_new_booking_rejects_bad_date() {
        let mut raw = form();
        raw["bookingDate"] = json!("01-05-2024");
        let new: NewBooking = serde_json::from_value(raw).unwrap();
        let err = new.validate().unwrap_err();
        assert_eq!(err.field, "bookingDate");
    }

    #[test]
    fn test_created_booking_defaults() {
        let new: NewBooking = serde_json::from_value(form()).unwrap();
        let booking = Booking::create(new.validate().unwrap(), Uuid::new_v4(), Uuid::new_v4(), None);
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.payment_status, PaymentStatus::NotPaid);

        let wire = serde_json::to_value(&booking).unwrap();
        assert_eq!(wire["status"], "pending");
        assert_eq!(wire["paymentStatus"], "not paid");
        assert_eq!(wire["bookingDate"], "2024-05-01");
    }

    #[test]
    fn test_booking_field_names() {
        for field in BookingField::ALL {
            assert_eq!(field.as_str().parse::<BookingField>().unwrap(), field);
        }
        let err = "business".parse::<BookingField>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown field: business");
        assert!("GuestCount".parse::<BookingField>().is_err());
    }

    #[test]
    fn test_apply_field() {
        let new: NewBooking = serde_json::from_value(form()).unwrap();
        let mut booking = Booking::create(new.validate().unwrap(), Uuid::new_v4(), Uuid::new_v4(), None);

        booking.apply_field(BookingField::GuestCount, "5").unwrap();
        assert_eq!(booking.guest_count, 5);
        booking.apply_field(BookingField::Status, "confirmed").unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);

        assert!(booking.apply_field(BookingField::GuestCount, "0").is_err());
        assert!(booking.apply_field(BookingField::Status, "done").is_err());
        assert_eq!(booking.guest_count, 5);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User::new("A".into(), "a@b.co".into(), None, "secret-hash".into());
        let wire = serde_json::to_string(&user).unwrap();
        assert!(!wire.contains("secret-hash"));
    }
}
