//! Shared application state for the web server.

use rand::{distributions::Alphanumeric, Rng};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use std::time::Duration;

use workwave_common::WorkwaveError;
use workwave_db::{
    AdminRepository, BookingRepository, BusinessRepository, Database, ReviewRepository,
    ServiceRepository, UserRepository,
};
use workwave_mail::{EmailMessage, HttpMailer, LogMailer, MailError, Mailer, Templates};
use workwave_payments::{PaymentGateway, RazorpayClient};

use crate::auth::JwtKeys;
use crate::config::{Config, MailProvider};
use crate::otp::OtpStore;

/// Non-infrastructure settings the handlers need.
#[derive(Debug, Clone)]
pub struct StateSettings {
    pub jwt_secret: SecretString,
    pub token_ttl_hours: i64,
    pub otp_ttl_minutes: u64,
    pub support_email: String,
    pub payment_secret: SecretString,
    pub default_currency: String,
}

impl Default for StateSettings {
    fn default() -> Self {
        Self {
            jwt_secret: random_secret(),
            token_ttl_hours: 24,
            otp_ttl_minutes: 15,
            support_email: "support@workwave.com".to_string(),
            payment_secret: SecretString::from(String::new()),
            default_currency: "INR".to_string(),
        }
    }
}

impl StateSettings {
    pub fn from_config(config: &Config) -> Self {
        let jwt_secret = config.auth.jwt_secret.clone().unwrap_or_else(|| {
            tracing::warn!("WORKWAVE_JWT_SECRET not set; using a random secret, tokens will not survive a restart");
            random_secret()
        });
        let payment_secret = config.payments.key_secret.clone().unwrap_or_else(|| {
            tracing::warn!("RAZORPAY_KEY_SECRET not set; payment verification will always fail");
            SecretString::from(String::new())
        });
        Self {
            jwt_secret,
            token_ttl_hours: config.auth.token_ttl_hours,
            otp_ttl_minutes: config.otp.ttl_minutes,
            support_email: config.mail.support_email.clone(),
            payment_secret,
            default_currency: config.payments.currency.clone(),
        }
    }
}

fn random_secret() -> SecretString {
    let secret: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect();
    SecretString::from(secret)
}

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub db: Arc<Database>,
    pub users: UserRepository,
    pub admins: AdminRepository,
    pub businesses: BusinessRepository,
    pub services: ServiceRepository,
    pub bookings: BookingRepository,
    pub reviews: ReviewRepository,
    pub mailer: Arc<dyn Mailer>,
    pub templates: Templates,
    pub payments: Arc<dyn PaymentGateway>,
    pub payment_secret: SecretString,
    pub default_currency: String,
    pub jwt: JwtKeys,
    pub user_otps: OtpStore,
    pub admin_otps: OtpStore,
    pub otp_ttl_minutes: u64,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(
        db: Arc<Database>,
        mailer: Arc<dyn Mailer>,
        payments: Arc<dyn PaymentGateway>,
        settings: StateSettings,
    ) -> Result<Self, WorkwaveError> {
        let templates = Templates::new(settings.support_email.clone())
            .map_err(|e| WorkwaveError::Config(format!("email templates: {e}")))?;
        let otp_ttl = Duration::from_secs(settings.otp_ttl_minutes * 60);

        Ok(Self {
            users: UserRepository::new(db.clone()),
            admins: AdminRepository::new(db.clone()),
            businesses: BusinessRepository::new(db.clone()),
            services: ServiceRepository::new(db.clone()),
            bookings: BookingRepository::new(db.clone()),
            reviews: ReviewRepository::new(db.clone()),
            db,
            mailer,
            templates,
            payments,
            payment_secret: settings.payment_secret,
            default_currency: settings.default_currency,
            jwt: JwtKeys::new(settings.jwt_secret.expose_secret().as_bytes(), settings.token_ttl_hours),
            user_otps: OtpStore::new(otp_ttl),
            admin_otps: OtpStore::new(otp_ttl),
            otp_ttl_minutes: settings.otp_ttl_minutes,
        })
    }

    /// Wire the real mailer and payment gateway from configuration.
    pub fn from_config(db: Arc<Database>, config: &Config) -> Result<Self, WorkwaveError> {
        let mailer: Arc<dyn Mailer> = match config.mail.provider {
            MailProvider::Log => Arc::new(LogMailer),
            MailProvider::Http => {
                let api_url = config.mail.api_url.clone()
                    .ok_or_else(|| WorkwaveError::Config("mail.api_url is required for the http provider".into()))?;
                let api_key = config.mail.api_key.clone()
                    .ok_or_else(|| WorkwaveError::Config("WORKWAVE_MAIL_API_KEY is required for the http provider".into()))?;
                Arc::new(HttpMailer::new(api_url, api_key, config.mail.from.clone()))
            }
        };

        let razorpay = RazorpayClient::new(
            config.payments.base_url.clone(),
            config.payments.key_id.clone(),
            config.payments.key_secret.clone().unwrap_or_else(|| SecretString::from(String::new())),
        );
        if razorpay.key_id().is_empty() {
            tracing::warn!("RAZORPAY_KEY_ID not set; order creation will be rejected by the gateway");
        } else {
            tracing::info!(key_id = razorpay.key_id(), "razorpay client configured");
        }
        let payments: Arc<dyn PaymentGateway> = Arc::new(razorpay);

        Self::new(db, mailer, payments, StateSettings::from_config(config))
    }

    /// Send a message whose delivery is not part of the request's outcome.
    /// Failures are logged only.
    pub async fn send_best_effort(&self, message: Result<EmailMessage, MailError>) {
        let result = match message {
            Ok(msg) => self.mailer.send(&msg).await.map(|_| msg.to),
            Err(e) => Err(e),
        };
        match result {
            Ok(to) => tracing::debug!(%to, "email sent"),
            Err(e) => tracing::warn!(error = %e, "email delivery failed"),
        }
    }
}
