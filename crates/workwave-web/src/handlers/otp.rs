//! Password reset by emailed one-time code.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::hash_password;
use crate::error::{ApiError, ApiJson};
use crate::handlers::Audience;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub getotp: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub new_password: String,
    pub confirm_password: Option<String>,
}

fn normalise_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

async fn send_otp(state: &SharedState, audience: Audience, req: SendOtpRequest) -> Result<Json<Value>, ApiError> {
    let email = match req.email.as_deref().map(normalise_email) {
        Some(e) if !e.is_empty() => e,
        _ => return Err(ApiError::BadRequest("Email is required".to_string())),
    };

    let account = audience.find_by_email(state, &email).await?
        .ok_or_else(|| ApiError::BadRequest(format!("{} not found", audience.label())))?;

    let code = audience.otps(state).issue(&account.email).await;
    let message = state.templates
        .otp_reset(&account.email, &account.name, &code, state.otp_ttl_minutes)
        .map_err(|e| {
            tracing::error!(error = %e, "failed to render OTP email");
            ApiError::Internal("Failed to send email".to_string())
        })?;

    state.mailer.send(&message).await.map_err(|e| {
        tracing::error!(error = %e, email = %account.email, "failed to send OTP email");
        ApiError::Internal("Failed to send email".to_string())
    })?;

    tracing::info!(audience = audience.label(), email = %account.email, "password reset code sent");
    Ok(Json(json!({ "msg": "OTP sent successfully" })))
}

async fn verify_otp(state: &SharedState, audience: Audience, req: VerifyOtpRequest) -> Result<Json<Value>, ApiError> {
    let email = normalise_email(&req.email);
    let account = audience.find_by_email(state, &email).await?
        .ok_or_else(|| ApiError::NotFound(format!("{} Not Found", audience.label())))?;

    let otps = audience.otps(state);
    otps.check(&account.email, &req.getotp).await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    if let Some(confirm) = &req.confirm_password {
        if *confirm != req.new_password {
            return Err(ApiError::BadRequest("Passwords do not match".to_string()));
        }
    }

    let hash = hash_password(&req.new_password)?;
    audience.update_password(state, account.id, &hash).await?;
    otps.consume(&account.email).await;
    tracing::info!(audience = audience.label(), email = %account.email, "password reset");

    let msg = match audience {
        Audience::User  => "Password Updated Successfully",
        Audience::Admin => "Admin Password Updated Successfully",
    };
    Ok(Json(json!({ "msg": msg, "nextPage": true })))
}

/// POST /otp/sendOtp
pub async fn send_user_otp(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<SendOtpRequest>,
) -> Result<Json<Value>, ApiError> {
    send_otp(&state, Audience::User, req).await
}

/// POST /otp/verify
pub async fn verify_user_otp(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<VerifyOtpRequest>,
) -> Result<Json<Value>, ApiError> {
    verify_otp(&state, Audience::User, req).await
}

/// POST /otp/sendOtpAdmin
pub async fn send_admin_otp(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<SendOtpRequest>,
) -> Result<Json<Value>, ApiError> {
    send_otp(&state, Audience::Admin, req).await
}

/// POST /otp/verifyAdmin
pub async fn verify_admin_otp(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<VerifyOtpRequest>,
) -> Result<Json<Value>, ApiError> {
    verify_otp(&state, Audience::Admin, req).await
}
