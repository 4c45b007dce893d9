//! Row <-> record conversion helpers.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;
use workwave_common::{Admin, Booking, Business, Review, Service, User};

use crate::error::{DbError, Result};
use crate::schema;

/// Fixed-width timestamp so string order matches time order.
pub(crate) fn fmt_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn corrupt(table: &'static str, reason: impl std::fmt::Display) -> DbError {
    DbError::Corrupt { table, reason: reason.to_string() }
}

fn uuid_col(row: &SqliteRow, table: &'static str, col: &str) -> Result<Uuid> {
    let raw: String = row.try_get(col)?;
    Uuid::parse_str(&raw).map_err(|e| corrupt(table, format!("{col}: {e}")))
}

fn opt_uuid_col(row: &SqliteRow, table: &'static str, col: &str) -> Result<Option<Uuid>> {
    let raw: Option<String> = row.try_get(col)?;
    raw.map(|s| Uuid::parse_str(&s).map_err(|e| corrupt(table, format!("{col}: {e}"))))
        .transpose()
}

fn ts_col(row: &SqliteRow, table: &'static str, col: &str) -> Result<DateTime<Utc>> {
    let raw: String = row.try_get(col)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| corrupt(table, format!("{col}: {e}")))
}

pub(crate) fn row_to_user(row: &SqliteRow) -> Result<User> {
    Ok(User {
        id: uuid_col(row, schema::TABLE_USERS, "id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        password_hash: row.try_get("password_hash")?,
        created_at: ts_col(row, schema::TABLE_USERS, "created_at")?,
    })
}

pub(crate) fn row_to_admin(row: &SqliteRow) -> Result<Admin> {
    Ok(Admin {
        id: uuid_col(row, schema::TABLE_ADMINS, "id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        password_hash: row.try_get("password_hash")?,
        created_at: ts_col(row, schema::TABLE_ADMINS, "created_at")?,
    })
}

pub(crate) fn row_to_business(row: &SqliteRow) -> Result<Business> {
    Ok(Business {
        id: uuid_col(row, schema::TABLE_BUSINESSES, "id")?,
        admin_id: uuid_col(row, schema::TABLE_BUSINESSES, "admin_id")?,
        business_name: row.try_get("business_name")?,
        description: row.try_get("description")?,
        address: row.try_get("address")?,
        category: row.try_get("category")?,
        created_at: ts_col(row, schema::TABLE_BUSINESSES, "created_at")?,
    })
}

pub(crate) fn row_to_service(row: &SqliteRow) -> Result<Service> {
    Ok(Service {
        id: uuid_col(row, schema::TABLE_SERVICES, "id")?,
        business_id: uuid_col(row, schema::TABLE_SERVICES, "business_id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        created_at: ts_col(row, schema::TABLE_SERVICES, "created_at")?,
    })
}

pub(crate) fn row_to_booking(row: &SqliteRow) -> Result<Booking> {
    let table = schema::TABLE_BOOKINGS;
    let status: String = row.try_get("status")?;
    let payment_status: String = row.try_get("payment_status")?;

    Ok(Booking {
        id: uuid_col(row, table, "id")?,
        user_id: uuid_col(row, table, "user_id")?,
        business_id: uuid_col(row, table, "business_id")?,
        service_id: opt_uuid_col(row, table, "service_id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        date_of_birth: row.try_get("date_of_birth")?,
        mobile_number: row.try_get("mobile_number")?,
        guest_count: row.try_get("guest_count")?,
        booking_date: row.try_get("booking_date")?,
        booking_time: row.try_get("booking_time")?,
        customer_notes: row.try_get("customer_notes")?,
        status: status.parse().map_err(|e| corrupt(table, e))?,
        payment_status: payment_status.parse().map_err(|e| corrupt(table, e))?,
        payment_id: row.try_get("payment_id")?,
        created_at: ts_col(row, table, "created_at")?,
        updated_at: ts_col(row, table, "updated_at")?,
    })
}

pub(crate) fn row_to_review(row: &SqliteRow) -> Result<Review> {
    Ok(Review {
        id: uuid_col(row, schema::TABLE_REVIEWS, "id")?,
        business_id: uuid_col(row, schema::TABLE_REVIEWS, "business_id")?,
        user_id: uuid_col(row, schema::TABLE_REVIEWS, "user_id")?,
        rating: row.try_get("rating")?,
        comment: row.try_get("comment")?,
        created_at: ts_col(row, schema::TABLE_REVIEWS, "created_at")?,
    })
}
