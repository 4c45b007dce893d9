//! Razorpay checkout: order creation and payment signature verification.

use axum::{extract::State, Json};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;
use workwave_common::PaymentStatus;
use workwave_payments::{verify_payment_signature, OrderRequest, PaymentError};

use crate::error::{parse_id, ApiError, ApiJson};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct CreateOrder {
    /// Minor currency units (paise).
    pub amount: i64,
    pub currency: Option<String>,
}

/// POST /orders
pub async fn create_order(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<CreateOrder>,
) -> Result<Json<Value>, ApiError> {
    let order_req = OrderRequest {
        amount: req.amount,
        currency: req.currency
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| state.default_currency.clone()),
        receipt: format!("rcpt_{}", Uuid::new_v4().simple()),
    };
    order_req.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let order = state.payments.create_order(&order_req).await.map_err(|e| {
        match &e {
            PaymentError::Gateway { status, .. } => tracing::error!(status, error = %e, "gateway rejected order"),
            _ => tracing::error!(error = %e, "order creation failed"),
        }
        ApiError::internal()
    })?;

    tracing::info!(order_id = %order.id, amount = order.amount, "order created");
    Ok(Json(json!({
        "order_id": order.id,
        "currency": order.currency,
        "amount": order.amount,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPayment {
    #[serde(default)]
    pub razorpay_order_id: String,
    #[serde(default)]
    pub razorpay_payment_id: String,
    #[serde(default)]
    pub razorpay_signature: String,
    #[serde(default)]
    pub booking_id: String,
}

/// POST /orders/verify
pub async fn verify_payment(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<VerifyPayment>,
) -> Result<Json<Value>, ApiError> {
    let valid = verify_payment_signature(
        &req.razorpay_order_id,
        &req.razorpay_payment_id,
        &req.razorpay_signature,
        state.payment_secret.expose_secret(),
    );
    if !valid {
        tracing::warn!(order_id = %req.razorpay_order_id, "payment signature mismatch");
        return Err(ApiError::BadRequest("Invalid payment signature".to_string()));
    }

    let booking_id = parse_id(&req.booking_id, "Booking")?;
    let booking = state.bookings
        .update_payment(booking_id, PaymentStatus::Paid, Some(&req.razorpay_payment_id))
        .await?
        .ok_or_else(|| ApiError::NotFound("Booking not found".to_string()))?;

    tracing::info!(%booking_id, payment_id = %req.razorpay_payment_id, "payment verified");
    Ok(Json(json!({ "msg": "Payment verified", "booking": booking })))
}
