//! workwave-payments: payment gateway integration.
//!
//! Orders are created through the Razorpay orders API; the checkout widget
//! then returns a signed payment id that [`verify_payment_signature`] checks
//! before a booking is marked paid.

pub mod gateway;
pub mod razorpay;
pub mod signature;

pub use gateway::{Order, OrderRequest, PaymentError, PaymentGateway};
pub use razorpay::RazorpayClient;
pub use signature::verify_payment_signature;
