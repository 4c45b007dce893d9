//! Registration and login for users and business owners.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::json;
use workwave_common::{validation, Admin, User};
use workwave_db::DbError;

use crate::auth::{hash_password, verify_password, TOKEN_COOKIE};
use crate::error::{ApiError, ApiJson};
use crate::handlers::Audience;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

struct Registration {
    name: String,
    email: String,
    phone: Option<String>,
    password_hash: String,
}

fn prepare(req: RegisterRequest) -> Result<Registration, ApiError> {
    let name = validation::non_blank("name", &req.name)?.to_string();
    let email = validation::email(&req.email)?;
    validation::password(&req.password)?;
    let phone = match req.phone.as_deref().map(str::trim) {
        Some(p) if !p.is_empty() => Some(validation::mobile_number(p)?),
        _ => None,
    };
    Ok(Registration { name, email, phone, password_hash: hash_password(&req.password)? })
}

fn duplicate_as_conflict(err: DbError, audience: Audience) -> ApiError {
    match err {
        DbError::Duplicate(_) => ApiError::Conflict(format!("{} already exists", audience.label())),
        other => other.into(),
    }
}

/// POST /user/register
pub async fn register_user(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let reg = prepare(req)?;
    let user = User::new(reg.name, reg.email, reg.phone, reg.password_hash);
    state.users.insert(&user).await.map_err(|e| duplicate_as_conflict(e, Audience::User))?;
    tracing::info!(user_id = %user.id, "user registered");

    state.send_best_effort(state.templates.welcome_user(&user.email, &user.name)).await;

    Ok((StatusCode::CREATED, Json(json!({
        "msg": "User registered successfully",
        "data": user,
    }))))
}

/// POST /admin/register
pub async fn register_admin(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let reg = prepare(req)?;
    let admin = Admin::new(reg.name, reg.email, reg.phone, reg.password_hash);
    state.admins.insert(&admin).await.map_err(|e| duplicate_as_conflict(e, Audience::Admin))?;
    tracing::info!(admin_id = %admin.id, "admin registered");

    state.send_best_effort(state.templates.welcome_admin(&admin.email, &admin.name)).await;

    Ok((StatusCode::CREATED, Json(json!({
        "msg": "Admin registered successfully",
        "data": admin,
    }))))
}

async fn login(
    state: &SharedState,
    audience: Audience,
    jar: CookieJar,
    req: LoginRequest,
) -> Result<(CookieJar, Json<serde_json::Value>), ApiError> {
    let invalid = || ApiError::Unauthorized("Invalid email or password".to_string());

    let email = validation::email(&req.email).map_err(|_| invalid())?;
    let account = audience.find_by_email(state, &email).await?.ok_or_else(invalid)?;
    if !verify_password(&req.password, &account.password_hash) {
        tracing::debug!(email = %email, "login rejected");
        return Err(invalid());
    }

    let token = state.jwt.issue(account.id, audience.role())?;
    let cookie = Cookie::build((TOKEN_COOKIE, token.clone()))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax);

    Ok((
        jar.add(cookie),
        Json(json!({ "msg": "Login successful", "token": token })),
    ))
}

/// POST /user/login
pub async fn login_user(
    State(state): State<SharedState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    login(&state, Audience::User, jar, req).await
}

/// POST /admin/login
pub async fn login_admin(
    State(state): State<SharedState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    login(&state, Audience::Admin, jar, req).await
}
