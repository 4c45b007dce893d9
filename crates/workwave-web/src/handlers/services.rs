//! Services offered by a business.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use workwave_common::{validation, Service};

use crate::auth::AuthAdmin;
use crate::error::{parse_id, ApiError, ApiJson};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct CreateService {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

/// POST /services/{businessId}
pub async fn create_service(
    State(state): State<SharedState>,
    AuthAdmin(claims): AuthAdmin,
    Path(business_id): Path<String>,
    ApiJson(req): ApiJson<CreateService>,
) -> Result<impl IntoResponse, ApiError> {
    let business_id = parse_id(&business_id, "Business")?;
    let business = state.businesses.find_by_id(business_id).await?
        .ok_or_else(|| ApiError::NotFound("Business not found".to_string()))?;
    if business.admin_id != claims.sub {
        return Err(ApiError::Forbidden("You do not own this business".to_string()));
    }

    let service = Service {
        id: Uuid::new_v4(),
        business_id,
        name: validation::non_blank("name", &req.name)?.to_string(),
        description: req.description.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
        price: validation::price(req.price)?,
        created_at: Utc::now(),
    };
    state.services.insert(&service).await?;
    tracing::info!(service_id = %service.id, %business_id, "service created");
    Ok((StatusCode::CREATED, Json(service)))
}

/// GET /services/{businessId}
pub async fn list_services(
    State(state): State<SharedState>,
    Path(business_id): Path<String>,
) -> Result<Json<Vec<Service>>, ApiError> {
    let business_id = parse_id(&business_id, "Business")?;
    Ok(Json(state.services.list_for_business(business_id).await?))
}
