//! WorkWave Database Layer
//!
//! An embedded SQLite store (through `sqlx`) holding users, admins,
//! businesses, services, bookings and reviews. Each table has a repository
//! that converts between rows and the records in `workwave-common`.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use workwave_db::{Database, BookingRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite://data/workwave.db", 5).await?;
//!     db.initialize().await?;
//!
//!     let bookings = BookingRepository::new(Arc::new(db));
//!     println!("{} bookings", bookings.count().await?);
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
pub mod schema;
mod rows;
pub mod users;
pub mod admins;
pub mod businesses;
pub mod services;
pub mod bookings;
pub mod reviews;
#[cfg(test)]
mod fixtures;

pub use database::{Database, DatabaseStats};
pub use error::{DbError, Result};
pub use users::UserRepository;
pub use admins::AdminRepository;
pub use businesses::BusinessRepository;
pub use services::ServiceRepository;
pub use bookings::{BookingRepository, BookingWithDetails, EarningsRow, ServiceSummary};
pub use reviews::ReviewRepository;
