//! Service (bookable offering) repository.

use crate::database::Database;
use crate::error::Result;
use crate::rows::{fmt_ts, row_to_service};
use std::sync::Arc;
use uuid::Uuid;
use workwave_common::Service;

#[derive(Clone)]
pub struct ServiceRepository {
    db: Arc<Database>,
}

impl ServiceRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn insert(&self, service: &Service) -> Result<()> {
        sqlx::query(
            "INSERT INTO services (id, business_id, name, description, price, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(service.id.to_string())
        .bind(service.business_id.to_string())
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.price)
        .bind(fmt_ts(&service.created_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Service>> {
        let row = sqlx::query("SELECT * FROM services WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(self.db.pool())
            .await?;
        row.as_ref().map(row_to_service).transpose()
    }

    pub async fn list_for_business(&self, business_id: Uuid) -> Result<Vec<Service>> {
        let rows = sqlx::query(
            "SELECT * FROM services WHERE business_id = ? ORDER BY created_at ASC, rowid ASC",
        )
        .bind(business_id.to_string())
        .fetch_all(self.db.pool())
        .await?;
        rows.iter().map(row_to_service).collect()
    }
}
