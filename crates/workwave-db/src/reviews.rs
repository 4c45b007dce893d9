//! Review repository.

use crate::database::Database;
use crate::error::Result;
use crate::rows::{fmt_ts, row_to_review};
use std::sync::Arc;
use uuid::Uuid;
use workwave_common::Review;

#[derive(Clone)]
pub struct ReviewRepository {
    db: Arc<Database>,
}

impl ReviewRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn insert(&self, review: &Review) -> Result<()> {
        sqlx::query(
            "INSERT INTO reviews (id, business_id, user_id, rating, comment, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(review.id.to_string())
        .bind(review.business_id.to_string())
        .bind(review.user_id.to_string())
        .bind(review.rating)
        .bind(&review.comment)
        .bind(fmt_ts(&review.created_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Reviews for a business, newest first.
    pub async fn list_for_business(&self, business_id: Uuid) -> Result<Vec<Review>> {
        let rows = sqlx::query(
            "SELECT * FROM reviews WHERE business_id = ? ORDER BY created_at DESC, rowid DESC",
        )
        .bind(business_id.to_string())
        .fetch_all(self.db.pool())
        .await?;
        rows.iter().map(row_to_review).collect()
    }
}
