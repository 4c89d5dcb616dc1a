use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::User,
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn is_unique_violation(e: &anyhow::Error) -> bool {
    e.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .and_then(|d| d.code())
        .map(|c| c == "23505")
        .unwrap_or(false)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::validation("Email and password required"));
    }
    if !is_valid_email(&payload.email) {
        warn!("register rejected: invalid email format");
        return Err(ApiError::validation("Invalid email format"));
    }
    if payload.password.len() < 6 {
        warn!("register rejected: password too short");
        return Err(ApiError::validation(
            "Password must be at least 6 characters",
        ));
    }

    // Generic conflict message: never reveal whether the email exists.
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!("register rejected: email already taken");
        return Err(ApiError::conflict("Registration failed"));
    }

    let hash = hash_password(&payload.password)?;
    let user = match User::create(&state.db, &payload.email, &hash).await {
        Ok(u) => u,
        // Lost the race against a concurrent registration of the same email.
        Err(e) if is_unique_violation(&e) => {
            warn!("register rejected: email already taken");
            return Err(ApiError::conflict("Registration failed"));
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(RegisterResponse { success: true })))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::validation("Email and password required"));
    }
    if !is_valid_email(&payload.email) {
        warn!("login rejected: invalid email format");
        return Err(ApiError::validation("Invalid email format"));
    }
    // A too-short password can never match a stored hash; reject it with the
    // credential message rather than a format hint.
    if payload.password.len() < 6 {
        warn!("login rejected: password too short");
        return Err(ApiError::validation("Invalid credentials"));
    }

    // Unknown email and wrong password produce identical responses so the
    // endpoint cannot be used to enumerate accounts.
    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!("login rejected: unknown email");
            return Err(ApiError::auth("Invalid credentials"));
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login rejected: wrong password");
        return Err(ApiError::auth("Invalid credentials"));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.email)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse { token }))
}
