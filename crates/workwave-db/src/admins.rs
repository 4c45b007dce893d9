//! Admin (business owner) repository.

use crate::database::Database;
use crate::error::{DbError, Result};
use crate::rows::{fmt_ts, row_to_admin};
use std::sync::Arc;
use uuid::Uuid;
use workwave_common::Admin;

#[derive(Clone)]
pub struct AdminRepository {
    db: Arc<Database>,
}

impl AdminRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn insert(&self, admin: &Admin) -> Result<()> {
        sqlx::query(
            "INSERT INTO admins (id, name, email, phone, password_hash, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(admin.id.to_string())
        .bind(&admin.name)
        .bind(&admin.email)
        .bind(&admin.phone)
        .bind(&admin.password_hash)
        .bind(fmt_ts(&admin.created_at))
        .execute(self.db.pool())
        .await
        .map_err(|e| DbError::on_insert(e, format!("admin email {}", admin.email)))?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>> {
        let row = sqlx::query("SELECT * FROM admins WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(self.db.pool())
            .await?;
        row.as_ref().map(row_to_admin).transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Admin>> {
        let row = sqlx::query("SELECT * FROM admins WHERE email = ?")
            .bind(email)
            .fetch_optional(self.db.pool())
            .await?;
        row.as_ref().map(row_to_admin).transpose()
    }

    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<()> {
        let result = sqlx::query("UPDATE admins SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id.to_string())
            .execute(self.db.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("admin {id}")));
        }
        Ok(())
    }
}
