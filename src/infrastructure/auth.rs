//! Credential handling: password hashing and bearer tokens
//!
//! The identity store only ever sees the opaque hashes produced here.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::env;

use crate::domain::DomainError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub name: String,
    pub exp: usize,
}

impl Claims {
    /// The authenticated user's id
    pub fn user_id(&self) -> Result<i32, DomainError> {
        self.sub.parse().map_err(|_| DomainError::Unauthorized)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Claims
where
    S: Send + Sync,
{
    type Rejection = DomainError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or(DomainError::Unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(DomainError::Unauthorized)?;

        decode_jwt(token).map_err(|e| {
            tracing::warn!("Rejected bearer token: {}", e);
            DomainError::Unauthorized
        })
    }
}

pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DomainError::Internal(e.to_string()))?
        .to_string();
    Ok(password_hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, DomainError> {
    let parsed_hash =
        PasswordHash::new(password_hash).map_err(|e| DomainError::Internal(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn get_jwt_secret() -> Result<String, DomainError> {
    match env::var("JWT_SECRET") {
        Ok(secret) => Ok(secret),
        Err(_) if cfg!(debug_assertions) => Ok("secret".to_string()),
        Err(_) => Err(DomainError::Internal(
            "JWT_SECRET environment variable must be set in production".to_string(),
        )),
    }
}

pub fn create_jwt(user_id: i32, name: &str) -> Result<String, DomainError> {
    let secret = get_jwt_secret()?;
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .ok_or_else(|| DomainError::Internal("token expiry overflow".to_string()))?
        .timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        name: name.to_owned(),
        exp: expiration as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| DomainError::Internal(e.to_string()))
}

pub fn decode_jwt(token: &str) -> Result<Claims, DomainError> {
    let secret = get_jwt_secret()?;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| DomainError::Unauthorized)
}
