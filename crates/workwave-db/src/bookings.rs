//! Booking repository.
//!
//! Provides CRUD operations for bookings plus the two read models the API
//! needs: a user's bookings joined with business and service names, and the
//! per-date rows behind the earnings report.

use crate::database::Database;
use crate::error::Result;
use crate::rows::{fmt_ts, row_to_booking};
use chrono::Utc;
use serde::Serialize;
use sqlx::{QueryBuilder, Row, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use workwave_common::{Booking, BookingStatus, PaymentStatus};

/// Service name and price shown next to a booking.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceSummary {
    pub name: String,
    pub price: f64,
}

/// A booking as listed on the user dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub business_name: String,
    pub service: Option<ServiceSummary>,
}

/// One booking's contribution to the earnings report.
#[derive(Debug, Clone, PartialEq)]
pub struct EarningsRow {
    pub booking_date: String,
    /// `None` when the booking has no service attached.
    pub price: Option<f64>,
}

/// Repository for booking operations.
#[derive(Clone)]
pub struct BookingRepository {
    db: Arc<Database>,
}

impl BookingRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a new booking.
    pub async fn insert(&self, booking: &Booking) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings
                (id, user_id, business_id, service_id, name, email, date_of_birth,
                 mobile_number, guest_count, booking_date, booking_time, customer_notes,
                 status, payment_status, payment_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(booking.id.to_string())
        .bind(booking.user_id.to_string())
        .bind(booking.business_id.to_string())
        .bind(booking.service_id.map(|id| id.to_string()))
        .bind(&booking.name)
        .bind(&booking.email)
        .bind(&booking.date_of_birth)
        .bind(&booking.mobile_number)
        .bind(booking.guest_count)
        .bind(&booking.booking_date)
        .bind(&booking.booking_time)
        .bind(&booking.customer_notes)
        .bind(booking.status.as_str())
        .bind(booking.payment_status.as_str())
        .bind(&booking.payment_id)
        .bind(fmt_ts(&booking.created_at))
        .bind(fmt_ts(&booking.updated_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Find a booking by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>> {
        let row = sqlx::query("SELECT * FROM bookings WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(self.db.pool())
            .await?;
        row.as_ref().map(row_to_booking).transpose()
    }

    /// Write back every editable column of a booking.
    /// Returns `false` if the booking no longer exists.
    pub async fn update(&self, booking: &Booking) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE bookings SET
                name = ?, email = ?, date_of_birth = ?, mobile_number = ?,
                guest_count = ?, booking_date = ?, booking_time = ?,
                customer_notes = ?, status = ?, payment_status = ?,
                payment_id = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&booking.name)
        .bind(&booking.email)
        .bind(&booking.date_of_birth)
        .bind(&booking.mobile_number)
        .bind(booking.guest_count)
        .bind(&booking.booking_date)
        .bind(&booking.booking_time)
        .bind(&booking.customer_notes)
        .bind(booking.status.as_str())
        .bind(booking.payment_status.as_str())
        .bind(&booking.payment_id)
        .bind(fmt_ts(&booking.updated_at))
        .bind(booking.id.to_string())
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the booking status and return the updated booking.
    pub async fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<Option<Booking>> {
        let result = sqlx::query("UPDATE bookings SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(fmt_ts(&Utc::now()))
            .bind(id.to_string())
            .execute(self.db.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    /// Record a payment outcome and return the updated booking.
    pub async fn update_payment(
        &self,
        id: Uuid,
        payment_status: PaymentStatus,
        payment_id: Option<&str>,
    ) -> Result<Option<Booking>> {
        let result = sqlx::query(
            "UPDATE bookings SET payment_status = ?, payment_id = ?, updated_at = ? WHERE id = ?",
        )
        .bind(payment_status.as_str())
        .bind(payment_id)
        .bind(fmt_ts(&Utc::now()))
        .bind(id.to_string())
        .execute(self.db.pool())
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    /// Delete a booking, returning what was removed.
    pub async fn delete(&self, id: Uuid) -> Result<Option<Booking>> {
        let mut tx = self.db.pool().begin().await?;

        let row = sqlx::query("SELECT * FROM bookings WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let booking = row_to_booking(&row)?;

        sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(Some(booking))
    }

    pub async fn list_for_business(&self, business_id: Uuid) -> Result<Vec<Booking>> {
        let rows = sqlx::query(
            "SELECT * FROM bookings WHERE business_id = ? ORDER BY created_at ASC, rowid ASC",
        )
        .bind(business_id.to_string())
        .fetch_all(self.db.pool())
        .await?;
        rows.iter().map(row_to_booking).collect()
    }

    /// A user's bookings, newest first, with business and service names.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<BookingWithDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT b.*,
                   bz.business_name AS joined_business_name,
                   s.name           AS joined_service_name,
                   s.price          AS joined_service_price
            FROM bookings b
            JOIN businesses bz ON bz.id = b.business_id
            LEFT JOIN services s ON s.id = b.service_id
            WHERE b.user_id = ?
            ORDER BY b.created_at DESC, b.rowid DESC
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| -> Result<BookingWithDetails> {
                let service_name: Option<String> = row.try_get("joined_service_name")?;
                let service_price: Option<f64> = row.try_get("joined_service_price")?;
                Ok(BookingWithDetails {
                    booking: row_to_booking(row)?,
                    business_name: row.try_get("joined_business_name")?,
                    service: service_name.map(|name| ServiceSummary {
                        name,
                        price: service_price.unwrap_or(0.0),
                    }),
                })
            })
            .collect()
    }

    /// Booking dates and service prices for a business on the given dates.
    pub async fn earnings_rows(&self, business_id: Uuid, dates: &[String]) -> Result<Vec<EarningsRow>> {
        if dates.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT b.booking_date, s.price FROM bookings b \
             LEFT JOIN services s ON s.id = b.service_id \
             WHERE b.business_id = ",
        );
        qb.push_bind(business_id.to_string());
        qb.push(" AND b.booking_date IN (");
        let mut separated = qb.separated(", ");
        for date in dates {
            separated.push_bind(date.as_str());
        }
        separated.push_unseparated(")");

        let rows = qb.build().fetch_all(self.db.pool()).await?;
        rows.iter()
            .map(|row| -> Result<EarningsRow> {
                Ok(EarningsRow {
                    booking_date: row.try_get("booking_date")?,
                    price: row.try_get("price")?,
                })
            })
            .collect()
    }

    pub async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    struct Seed {
        db: Arc<Database>,
        user_id: Uuid,
        business_id: Uuid,
        service_id: Uuid,
    }

    async fn seed() -> Seed {
        let db = Arc::new(Database::in_memory().await.unwrap());
        let admin = fixtures::admin(&db, "owner@example.com").await;
        let business = fixtures::business(&db, admin.id, "Harbour Spa").await;
        let service = fixtures::service(&db, business.id, "Massage", 1500.0).await;
        let user = fixtures::user(&db, "guest@example.com").await;
        Seed { db, user_id: user.id, business_id: business.id, service_id: service.id }
    }

    #[tokio::test]
    async fn test_insert_and_find_round_trip_fields() {
        let s = seed().await;
        let booking = fixtures::booking(&s.db, s.user_id, s.business_id, Some(s.service_id), "2024-05-01").await;

        let repo = BookingRepository::new(s.db.clone());
        let found = repo.find_by_id(booking.id).await.unwrap().unwrap();
        assert_eq!(found.service_id, Some(s.service_id));
        assert_eq!(found.status, BookingStatus::Pending);
        assert_eq!(found.payment_status, PaymentStatus::NotPaid);
        assert_eq!(found.created_at.timestamp_micros(), booking.created_at.timestamp_micros());
    }

    #[tokio::test]
    async fn test_update_status_and_payment() {
        let s = seed().await;
        let booking = fixtures::booking(&s.db, s.user_id, s.business_id, None, "2024-05-01").await;
        let repo = BookingRepository::new(s.db.clone());

        let updated = repo.update_status(booking.id, BookingStatus::Cancel).await.unwrap().unwrap();
        assert_eq!(updated.status, BookingStatus::Cancel);

        let paid = repo
            .update_payment(booking.id, PaymentStatus::Paid, Some("pay_123"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(paid.payment_status, PaymentStatus::Paid);
        assert_eq!(paid.payment_id.as_deref(), Some("pay_123"));

        assert!(repo.update_status(Uuid::new_v4(), BookingStatus::Confirmed).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_returns_removed_booking() {
        let s = seed().await;
        let booking = fixtures::booking(&s.db, s.user_id, s.business_id, None, "2024-05-01").await;
        let repo = BookingRepository::new(s.db.clone());

        let removed = repo.delete(booking.id).await.unwrap().unwrap();
        assert_eq!(removed.id, booking.id);
        assert!(repo.delete(booking.id).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_for_user_joins_names() {
        let s = seed().await;
        fixtures::booking(&s.db, s.user_id, s.business_id, Some(s.service_id), "2024-05-01").await;
        fixtures::booking(&s.db, s.user_id, s.business_id, None, "2024-05-02").await;

        let repo = BookingRepository::new(s.db.clone());
        let listed = repo.list_for_user(s.user_id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|b| b.business_name == "Harbour Spa"));

        let with_service = listed.iter().find(|b| b.service.is_some()).unwrap();
        let service = with_service.service.as_ref().unwrap();
        assert_eq!(service.name, "Massage");
        assert_eq!(service.price, 1500.0);

        let wire = serde_json::to_value(with_service).unwrap();
        assert_eq!(wire["businessName"], "Harbour Spa");
        assert_eq!(wire["bookingDate"], "2024-05-01");
    }

    #[tokio::test]
    async fn test_earnings_rows_filters_dates() {
        let s = seed().await;
        fixtures::booking(&s.db, s.user_id, s.business_id, Some(s.service_id), "2024-05-01").await;
        fixtures::booking(&s.db, s.user_id, s.business_id, None, "2024-05-01").await;
        fixtures::booking(&s.db, s.user_id, s.business_id, Some(s.service_id), "2024-04-01").await;

        let repo = BookingRepository::new(s.db.clone());
        let rows = repo
            .earnings_rows(s.business_id, &["2024-05-01".to_string(), "2024-05-02".to_string()])
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.contains(&EarningsRow { booking_date: "2024-05-01".into(), price: Some(1500.0) }));
        assert!(rows.contains(&EarningsRow { booking_date: "2024-05-01".into(), price: None }));

        assert!(repo.earnings_rows(s.business_id, &[]).await.unwrap().is_empty());
    }
}
