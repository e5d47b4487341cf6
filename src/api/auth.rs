use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::validation::{MAX_EMAIL_LEN, MAX_NAME_LEN, require_text};
use crate::auth::{Claims, create_jwt, hash_password, verify_password};
use crate::domain::DomainError;
use crate::infrastructure::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    name: String,
    email: String,
    password: String,
    repeat_password: String,
}

impl RegisterRequest {
    fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name, MAX_NAME_LEN)?;
        require_text("email", &self.email, MAX_EMAIL_LEN)?;
        if self.password.is_empty() {
            return Err(DomainError::Validation("password is required".to_string()));
        }
        if self.password != self.repeat_password {
            return Err(DomainError::Validation(
                "Passwords have to match.".to_string(),
            ));
        }
        Ok(())
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    responses(
        (status = 201, description = "Account created"),
        (status = 409, description = "Name or email already used"),
        (status = 422, description = "Invalid input")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, DomainError> {
    payload.validate()?;

    let password_hash = hash_password(&payload.password)?;
    let user = state
        .user_repo
        .register(payload.name, payload.email, password_hash)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Registration Successful! Log in!",
            "user": user
        })),
    ))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    responses(
        (status = 200, description = "Bearer token and profile"),
        (status = 401, description = "Wrong email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, DomainError> {
    tracing::info!("Login attempt for: {}", payload.email);

    let Some(user) = state.user_repo.find_by_email(&payload.email).await? else {
        tracing::warn!("No account for: {}", payload.email);
        return Err(DomainError::Unauthorized);
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        tracing::warn!("Password verification failed for user #{}", user.id);
        return Err(DomainError::Unauthorized);
    }

    let token = create_jwt(user.id, &user.name)?;
    Ok(Json(json!({ "token": token, "user": user })))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user's profile"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn get_me(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<Value>, DomainError> {
    let user = state
        .user_repo
        .find_by_id(claims.user_id()?)
        .await?
        .ok_or(DomainError::NotFound)?;

    Ok(Json(json!({ "user": user })))
}
