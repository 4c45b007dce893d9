//! HTTP handlers for all API routes.

pub mod root;
pub mod accounts;
pub mod business;
pub mod services;
pub mod reviews;
pub mod bookings;
pub mod earnings;
pub mod dashboard;
pub mod otp;
pub mod orders;

use uuid::Uuid;
use workwave_common::{Admin, User};

use crate::auth::Role;
use crate::error::ApiError;
use crate::otp::OtpStore;
use crate::state::AppState;

/// Which account table a request targets. Users and admins share the
/// login, registration and password-reset flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    User,
    Admin,
}

/// The fields of a user or admin the shared flows need.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl From<User> for Account {
    fn from(u: User) -> Self {
        Self { id: u.id, name: u.name, email: u.email, password_hash: u.password_hash }
    }
}

impl From<Admin> for Account {
    fn from(a: Admin) -> Self {
        Self { id: a.id, name: a.name, email: a.email, password_hash: a.password_hash }
    }
}

impl Audience {
    pub fn role(self) -> Role {
        match self {
            Audience::User  => Role::User,
            Audience::Admin => Role::Admin,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Audience::User  => "User",
            Audience::Admin => "Admin",
        }
    }

    pub fn otps(self, state: &AppState) -> &OtpStore {
        match self {
            Audience::User  => &state.user_otps,
            Audience::Admin => &state.admin_otps,
        }
    }

    pub async fn find_by_email(self, state: &AppState, email: &str) -> Result<Option<Account>, ApiError> {
        Ok(match self {
            Audience::User  => state.users.find_by_email(email).await?.map(Account::from),
            Audience::Admin => state.admins.find_by_email(email).await?.map(Account::from),
        })
    }

    pub async fn update_password(self, state: &AppState, id: Uuid, hash: &str) -> Result<(), ApiError> {
        match self {
            Audience::User  => state.users.update_password(id, hash).await?,
            Audience::Admin => state.admins.update_password(id, hash).await?,
        }
        Ok(())
    }
}
