//! Shared harness for router-level tests: in-memory database, recording
//! mailer and a scripted payment gateway.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use secrecy::SecretString;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use workwave_db::Database;
use workwave_mail::{EmailMessage, MailError, Mailer};
use workwave_payments::{Order, OrderRequest, PaymentError, PaymentGateway};
use workwave_web::{
    router::build_router,
    state::{AppState, StateSettings},
};

pub const PAYMENT_SECRET: &str = "rzp_test_secret";

#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<EmailMessage>>,
    pub fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self { sent: Mutex::new(Vec::new()), fail: true }
    }

    pub fn messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Rejected { status: 503, message: "mail provider down".into() });
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct StubGateway {
    pub requests: Mutex<Vec<OrderRequest>>,
    pub fail: bool,
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_order(&self, req: &OrderRequest) -> Result<Order, PaymentError> {
        if self.fail {
            return Err(PaymentError::Gateway { status: 401, message: "Authentication failed".into() });
        }
        self.requests.lock().unwrap().push(req.clone());
        Ok(Order {
            id: "order_TEST123".into(),
            amount: req.amount,
            currency: req.currency.clone(),
            receipt: Some(req.receipt.clone()),
            status: Some("created".into()),
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub db: Arc<Database>,
    pub mailer: Arc<RecordingMailer>,
    pub gateway: Arc<StubGateway>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with(RecordingMailer::default(), StubGateway::default()).await
    }

    pub async fn with(mailer: RecordingMailer, gateway: StubGateway) -> Self {
        let db = Arc::new(Database::in_memory().await.unwrap());
        let mailer = Arc::new(mailer);
        let gateway = Arc::new(gateway);
        let settings = StateSettings {
            jwt_secret: SecretString::from("integration-test-secret".to_string()),
            payment_secret: SecretString::from(PAYMENT_SECRET.to_string()),
            ..StateSettings::default()
        };
        let state = AppState::new(db.clone(), mailer.clone(), gateway.clone(), settings).unwrap();
        Self { router: build_router(state, &[]), db, mailer, gateway }
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    pub async fn call(&self, method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> (StatusCode, Value) {
        self.send(request(method, uri, body, token)).await
    }

    /// Register then log in, returning the session token.
    pub async fn signup(&self, kind: &str, email: &str, password: &str) -> String {
        let (status, _) = self.call(
            Method::POST,
            &format!("/{kind}/register"),
            Some(serde_json::json!({ "name": "Asha", "email": email, "password": password })),
            None,
        ).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self.call(
            Method::POST,
            &format!("/{kind}/login"),
            Some(serde_json::json!({ "email": email, "password": password })),
            None,
        ).await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    /// Admin with one business offering one service. Returns
    /// (admin token, business id, service id).
    pub async fn seed_business(&self, email: &str, price: f64) -> (String, String, String) {
        let token = self.signup("admin", email, "admin-pass").await;
        let (status, business) = self.call(
            Method::POST,
            "/business",
            Some(serde_json::json!({ "businessName": "Sea Breeze Spa", "category": "Wellness" })),
            Some(&token),
        ).await;
        assert_eq!(status, StatusCode::CREATED);
        let business_id = business["id"].as_str().unwrap().to_string();

        let (status, service) = self.call(
            Method::POST,
            &format!("/services/{business_id}"),
            Some(serde_json::json!({ "name": "Massage", "price": price })),
            Some(&token),
        ).await;
        assert_eq!(status, StatusCode::CREATED);
        let service_id = service["id"].as_str().unwrap().to_string();

        (token, business_id, service_id)
    }
}

pub fn request(method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn booking_body(date: &str) -> Value {
    serde_json::json!({
        "name": "Asha Rao",
        "email": "asha@example.com",
        "mobileNumber": "9876543210",
        "guestCount": "2",
        "bookingDate": date,
        "bookingTime": "18:30",
        "customerNotes": "Window seat"
    })
}
