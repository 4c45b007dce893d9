//! Razorpay orders API client.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::gateway::{Order, OrderRequest, PaymentError, PaymentGateway};

pub const DEFAULT_BASE_URL: &str = "https://api.razorpay.com";

pub struct RazorpayClient {
    base_url: String,
    key_id: String,
    key_secret: SecretString,
    client: reqwest::Client,
}

impl RazorpayClient {
    pub fn new(base_url: impl Into<String>, key_id: impl Into<String>, key_secret: SecretString) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            key_id: key_id.into(),
            key_secret,
            client: reqwest::Client::new(),
        }
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }
}

#[derive(Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
    payment_capture: u8,
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_order(&self, req: &OrderRequest) -> Result<Order, PaymentError> {
        req.validate()?;

        let resp = self.client
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(&self.key_id, Some(self.key_secret.expose_secret()))
            .json(&CreateOrderBody {
                amount: req.amount,
                currency: req.currency.trim(),
                receipt: &req.receipt,
                payment_capture: 1,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body: serde_json::Value = resp.json().await.unwrap_or_default();
            let message = body["error"]["description"]
                .as_str()
                .unwrap_or("unknown gateway error")
                .to_string();
            tracing::warn!(status = status.as_u16(), %message, "razorpay rejected order");
            return Err(PaymentError::Gateway { status: status.as_u16(), message });
        }

        let order: Order = resp.json().await?;
        tracing::info!(order_id = %order.id, amount = order.amount, "razorpay order created");
        Ok(order)
    }
}
