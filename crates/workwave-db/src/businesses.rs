//! Business repository.

use crate::database::Database;
use crate::error::Result;
use crate::rows::{fmt_ts, row_to_business};
use std::sync::Arc;
use uuid::Uuid;
use workwave_common::Business;

#[derive(Clone)]
pub struct BusinessRepository {
    db: Arc<Database>,
}

impl BusinessRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn insert(&self, business: &Business) -> Result<()> {
        sqlx::query(
            "INSERT INTO businesses (id, admin_id, business_name, description, address, category, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(business.id.to_string())
        .bind(business.admin_id.to_string())
        .bind(&business.business_name)
        .bind(&business.description)
        .bind(&business.address)
        .bind(&business.category)
        .bind(fmt_ts(&business.created_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Business>> {
        let row = sqlx::query("SELECT * FROM businesses WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(self.db.pool())
            .await?;
        row.as_ref().map(row_to_business).transpose()
    }

    /// All businesses, oldest first.
    pub async fn list_all(&self) -> Result<Vec<Business>> {
        let rows = sqlx::query("SELECT * FROM businesses ORDER BY created_at ASC, rowid ASC")
            .fetch_all(self.db.pool())
            .await?;
        rows.iter().map(row_to_business).collect()
    }

    pub async fn list_for_admin(&self, admin_id: Uuid) -> Result<Vec<Business>> {
        let rows = sqlx::query(
            "SELECT * FROM businesses WHERE admin_id = ? ORDER BY created_at ASC, rowid ASC",
        )
        .bind(admin_id.to_string())
        .fetch_all(self.db.pool())
        .await?;
        rows.iter().map(row_to_business).collect()
    }

    /// The admin's first registered business, which the dashboard reports on.
    pub async fn first_for_admin(&self, admin_id: Uuid) -> Result<Option<Business>> {
        let row = sqlx::query(
            "SELECT * FROM businesses WHERE admin_id = ? ORDER BY created_at ASC, rowid ASC LIMIT 1",
        )
        .bind(admin_id.to_string())
        .fetch_optional(self.db.pool())
        .await?;
        row.as_ref().map(row_to_business).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn test_first_for_admin_is_oldest() {
        let db = Arc::new(Database::in_memory().await.unwrap());
        let admin = fixtures::admin(&db, "owner@example.com").await;
        let first = fixtures::business(&db, admin.id, "Harbour Spa").await;
        let _second = fixtures::business(&db, admin.id, "Harbour Gym").await;

        let repo = BusinessRepository::new(db.clone());
        let found = repo.first_for_admin(admin.id).await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
        assert_eq!(repo.list_for_admin(admin.id).await.unwrap().len(), 2);
        assert!(repo.first_for_admin(Uuid::new_v4()).await.unwrap().is_none());
    }
}
