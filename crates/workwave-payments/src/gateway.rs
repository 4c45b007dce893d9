//! Gateway trait and order types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid order: {0}")]
    InvalidOrder(String),
    #[error("Gateway error [{status}]: {message}")]
    Gateway { status: u16, message: String },
}

/// Order creation request. `amount` is in the currency's minor unit
/// (paise for INR).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl OrderRequest {
    pub fn validate(&self) -> Result<(), PaymentError> {
        if self.amount <= 0 {
            return Err(PaymentError::InvalidOrder("amount must be positive".into()));
        }
        let currency = self.currency.trim();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PaymentError::InvalidOrder(format!("unsupported currency '{}'", self.currency)));
        }
        Ok(())
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_order(&self, req: &OrderRequest) -> Result<Order, PaymentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(amount: i64, currency: &str) -> OrderRequest {
        OrderRequest { amount, currency: currency.into(), receipt: "receipt#1".into() }
    }

    #[test]
    fn test_order_request_validation() {
        assert!(req(50_000, "INR").validate().is_ok());
        assert!(req(0, "INR").validate().is_err());
        assert!(req(100, "RUPEES").validate().is_err());
    }
}
