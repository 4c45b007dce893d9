//! Business listings owned by admins.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use workwave_common::{validation, Business};

use crate::auth::AuthAdmin;
use crate::error::{parse_id, ApiError, ApiJson};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusiness {
    #[serde(default)]
    pub business_name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub category: Option<String>,
}

fn optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// POST /business
pub async fn create_business(
    State(state): State<SharedState>,
    AuthAdmin(claims): AuthAdmin,
    ApiJson(req): ApiJson<CreateBusiness>,
) -> Result<impl IntoResponse, ApiError> {
    let business = Business {
        id: Uuid::new_v4(),
        admin_id: claims.sub,
        business_name: validation::non_blank("businessName", &req.business_name)?.to_string(),
        description: optional(req.description),
        address: optional(req.address),
        category: optional(req.category),
        created_at: Utc::now(),
    };
    state.businesses.insert(&business).await?;
    tracing::info!(business_id = %business.id, admin_id = %claims.sub, "business created");
    Ok((StatusCode::CREATED, Json(business)))
}

/// GET /business/{id}
pub async fn get_business(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Business>, ApiError> {
    let id = parse_id(&id, "Business")?;
    state.businesses.find_by_id(id).await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Business not found".to_string()))
}
