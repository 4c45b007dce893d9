//! Customer reviews of a business.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use workwave_common::{validation, Review};

use crate::auth::AuthUser;
use crate::error::{parse_id, ApiError, ApiJson};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct CreateReview {
    pub rating: i64,
    pub comment: Option<String>,
}

/// POST /reviews/{businessId}
pub async fn create_review(
    State(state): State<SharedState>,
    AuthUser(claims): AuthUser,
    Path(business_id): Path<String>,
    ApiJson(req): ApiJson<CreateReview>,
) -> Result<impl IntoResponse, ApiError> {
    let business_id = parse_id(&business_id, "Business")?;
    if state.businesses.find_by_id(business_id).await?.is_none() {
        return Err(ApiError::NotFound("Business not found".to_string()));
    }

    let review = Review {
        id: Uuid::new_v4(),
        business_id,
        user_id: claims.sub,
        rating: validation::rating(req.rating)?,
        comment: req.comment.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()),
        created_at: Utc::now(),
    };
    state.reviews.insert(&review).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /reviews/{businessId}
pub async fn list_reviews(
    State(state): State<SharedState>,
    Path(business_id): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let business_id = parse_id(&business_id, "Business")?;
    Ok(Json(state.reviews.list_for_business(business_id).await?))
}
