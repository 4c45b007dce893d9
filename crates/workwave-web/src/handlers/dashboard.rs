//! The signed-in user's booking history.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::SharedState;

/// GET /usdashboard/bookings
pub async fn user_bookings(
    State(state): State<SharedState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Value>, ApiError> {
    if state.users.find_by_id(claims.sub).await?.is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }
    let bookings = state.bookings.list_for_user(claims.sub).await?;
    Ok(Json(json!({ "bookings": bookings })))
}
