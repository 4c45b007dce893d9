//! workwave-mail: outbound email for WorkWave.
//!
//! Messages are rendered from embedded minijinja templates and handed to a
//! [`Mailer`]:
//!   HttpMailer: POSTs JSON to a transactional email HTTP API
//!   LogMailer: writes the message to the log (development default)

pub mod mailer;
pub mod templates;

pub use mailer::{EmailMessage, HttpMailer, LogMailer, MailError, Mailer};
pub use templates::Templates;
