//! workwave-common: Shared records, status enums, validation and errors used
//! across all WorkWave crates.

pub mod error;
pub mod entities;
pub mod status;
pub mod validation;

// Re-export commonly used types
pub use entities::{Admin, Booking, BookingField, Business, NewBooking, Review, Service, User};
pub use error::{Result, WorkwaveError};
pub use status::{BookingStatus, PaymentStatus};
pub use validation::ValidationError;
