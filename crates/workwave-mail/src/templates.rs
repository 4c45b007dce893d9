//! Embedded email templates.

use minijinja::{context, Environment};

use crate::mailer::{EmailMessage, MailError};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("otp_reset.html", include_str!("../templates/otp_reset.html")),
    ("booking_confirmation.html", include_str!("../templates/booking_confirmation.html")),
    ("welcome_user.html", include_str!("../templates/welcome_user.html")),
    ("welcome_admin.html", include_str!("../templates/welcome_admin.html")),
];

/// Renders every transactional email WorkWave sends.
pub struct Templates {
    env: Environment<'static>,
    support_email: String,
}

impl Templates {
    pub fn new(support_email: impl Into<String>) -> Result<Self, MailError> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env, support_email: support_email.into() })
    }

    fn render(&self, name: &str, to: &str, subject: &str, ctx: minijinja::Value) -> Result<EmailMessage, MailError> {
        let html = self.env.get_template(name)?.render(context! {
            support_email => self.support_email,
            ..ctx
        })?;
        Ok(EmailMessage { to: to.to_string(), subject: subject.to_string(), html })
    }

    pub fn otp_reset(&self, to: &str, name: &str, otp: &str, ttl_minutes: u64) -> Result<EmailMessage, MailError> {
        self.render(
            "otp_reset.html",
            to,
            "Password Reset - WorkWave",
            context! { name, otp, ttl_minutes },
        )
    }

    pub fn booking_confirmation(
        &self,
        to: &str,
        name: &str,
        date: &str,
        time: &str,
        guests: i64,
    ) -> Result<EmailMessage, MailError> {
        self.render(
            "booking_confirmation.html",
            to,
            "Booking Confirmation - WorkWave",
            context! { name, date, time, guests },
        )
    }

    pub fn welcome_user(&self, to: &str, name: &str) -> Result<EmailMessage, MailError> {
        self.render(
            "welcome_user.html",
            to,
            "Welcome to WorkWave! Your Business Solutions Await",
            context! { name },
        )
    }

    pub fn welcome_admin(&self, to: &str, name: &str) -> Result<EmailMessage, MailError> {
        self.render(
            "welcome_admin.html",
            to,
            "Welcome to WorkWave Admin! Your Management Portal Awaits",
            context! { name },
        )
    }
}
