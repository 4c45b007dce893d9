//! workwave-web: HTTP API for the WorkWave booking marketplace.
//! Provides:
//!   - User and admin accounts with JWT cookie sessions
//!   - Businesses, services and reviews
//!   - Booking creation, status/payment updates and edits
//!   - Ten-day earnings report for admins
//!   - Password reset by emailed one-time code
//!   - Razorpay order creation and payment verification

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod otp;
pub mod router;
pub mod state;
