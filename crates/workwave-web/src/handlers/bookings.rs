//! Booking lifecycle: create, status and payment updates, field edits and
//! deletion.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use workwave_common::{
    validation, Booking, BookingField, BookingStatus, Business, NewBooking, PaymentStatus, ValidationError,
};

use crate::auth::AuthUser;
use crate::error::{parse_id, ApiError, ApiJson};
use crate::state::SharedState;

fn booking_not_found() -> ApiError {
    ApiError::NotFound("Booking not found".to_string())
}

/// POST /booking/addbooking/{businessId}/{serviceId}
pub async fn add_booking(
    State(state): State<SharedState>,
    AuthUser(claims): AuthUser,
    Path((business_id, service_id)): Path<(String, String)>,
    ApiJson(req): ApiJson<NewBooking>,
) -> Result<impl IntoResponse, ApiError> {
    let new = req.validate()?;

    let user = state.users.find_by_id(claims.sub).await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let business_id = parse_id(&business_id, "Business")?;
    if state.businesses.find_by_id(business_id).await?.is_none() {
        return Err(ApiError::NotFound("Business not found".to_string()));
    }

    let service_id = parse_id(&service_id, "Service")?;
    match state.services.find_by_id(service_id).await? {
        Some(service) if service.business_id == business_id => {}
        _ => return Err(ApiError::NotFound("Service not found".to_string())),
    }

    let booking = Booking::create(new, user.id, business_id, Some(service_id));
    state.bookings.insert(&booking).await?;
    tracing::info!(booking_id = %booking.id, user_id = %user.id, %business_id, "booking created");

    state.send_best_effort(state.templates.booking_confirmation(
        &booking.email,
        &booking.name,
        &booking.booking_date,
        &booking.booking_time,
        booking.guest_count,
    )).await;

    Ok((StatusCode::CREATED, Json(json!({
        "msg": "Booking created successfully!",
        "data": booking,
    }))))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatus {
    #[serde(default)]
    pub booking_id: String,
    #[serde(default)]
    pub status: String,
}

/// POST /booking/updateStatus
pub async fn update_status(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<UpdateStatus>,
) -> Result<Json<Value>, ApiError> {
    // Whitelist first: an invalid status is a 400 even for unknown bookings.
    let status: BookingStatus = req.status.parse()?;
    let id = parse_id(&req.booking_id, "Booking")?;

    let booking = state.bookings.update_status(id, status).await?.ok_or_else(booking_not_found)?;
    tracing::info!(booking_id = %id, %status, "booking status updated");
    Ok(Json(json!({ "message": "Booking status updated", "booking": booking })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePayment {
    pub payment_id: Option<String>,
    #[serde(default)]
    pub booking_id: String,
    #[serde(default)]
    pub payment_status: String,
}

/// PUT /booking/updatePayment
pub async fn update_payment(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<UpdatePayment>,
) -> Result<Json<Value>, ApiError> {
    let payment_status: PaymentStatus = req.payment_status.parse()?;
    let id = parse_id(&req.booking_id, "Booking")?;
    let payment_id = req.payment_id.as_deref().map(str::trim).filter(|p| !p.is_empty());

    let booking = state.bookings.update_payment(id, payment_status, payment_id).await?
        .ok_or_else(booking_not_found)?;
    tracing::info!(booking_id = %id, %payment_status, "booking payment updated");
    Ok(Json(json!({ "message": "Payment status updated", "booking": booking })))
}

/// A business with every booking made against it.
#[derive(Debug, Serialize)]
pub struct BusinessWithBookings {
    #[serde(flatten)]
    pub business: Business,
    pub bookings: Vec<Booking>,
}

/// GET /booking/getBooking
pub async fn list_businesses_with_bookings(
    State(state): State<SharedState>,
) -> Result<Json<Value>, ApiError> {
    let businesses = state.businesses.list_all().await?;
    let mut data = Vec::with_capacity(businesses.len());
    for business in businesses {
        let bookings = state.bookings.list_for_business(business.id).await?;
        data.push(BusinessWithBookings { business, bookings });
    }
    Ok(Json(json!({ "status": 200, "msg": "Businesses exist", "data": data })))
}

/// Check every key and value of an update body before anything is applied.
/// Returns the parsed fields with trimmed values.
pub fn check_edits(edits: &Map<String, Value>) -> Result<Vec<(BookingField, &str)>, ValidationError> {
    let mut checked = Vec::with_capacity(edits.len());
    for (key, value) in edits {
        let field: BookingField = key.parse()?;
        let value = validation::non_blank(key, value.as_str().unwrap_or_default())?;
        checked.push((field, value));
    }
    Ok(checked)
}

/// Apply checked edits to `booking`.
pub fn apply_edits(booking: &mut Booking, edits: &[(BookingField, &str)]) -> Result<(), ValidationError> {
    for &(field, value) in edits {
        booking.apply_field(field, value)?;
    }
    Ok(())
}

/// POST /booking/update-booking/{id}
pub async fn update_booking(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    ApiJson(edits): ApiJson<Map<String, Value>>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "Booking")?;
    let checked = check_edits(&edits)?;
    let mut booking = state.bookings.find_by_id(id).await?.ok_or_else(booking_not_found)?;

    apply_edits(&mut booking, &checked)?;
    if !state.bookings.update(&booking).await? {
        return Err(booking_not_found());
    }
    tracing::info!(booking_id = %id, fields = edits.len(), "booking updated");
    Ok(Json(json!({ "status": 200, "msg": "Booking updated", "data": booking })))
}

/// POST /booking/delete-booking/{id}
pub async fn delete_booking(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "Booking")?;
    let booking = state.bookings.delete(id).await?.ok_or_else(booking_not_found)?;
    tracing::info!(booking_id = %id, "booking deleted");
    Ok(Json(json!({ "status": 200, "msg": "Booking deleted successfully", "data": booking })))
}
