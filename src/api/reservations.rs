//! Reservation workflow handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{Value, json};

use crate::auth::Claims;
use crate::domain::DomainError;
use crate::infrastructure::AppState;

#[utoipa::path(
    post,
    path = "/api/books/{id}/reservation",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 201, description = "Request recorded"),
        (status = 400, description = "Caller owns the book"),
        (status = 404, description = "No such book or user")
    )
)]
pub async fn request_book(
    State(state): State<AppState>,
    claims: Claims,
    Path(book_id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    state
        .reservations
        .request(claims.user_id()?, book_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Reservation requested" })),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}/reservation",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Request withdrawn"),
        (status = 404, description = "No pending request")
    )
)]
pub async fn cancel_request(
    State(state): State<AppState>,
    claims: Claims,
    Path(book_id): Path<i32>,
) -> Result<Json<Value>, DomainError> {
    state.reservations.cancel(claims.user_id()?, book_id).await?;
    Ok(Json(json!({ "message": "Reservation cancelled" })))
}

#[utoipa::path(
    get,
    path = "/api/reservations/incoming",
    responses(
        (status = 200, description = "Pending requests on the caller's books"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn list_incoming(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<Value>, DomainError> {
    let requests = state
        .reservations
        .list_incoming_for_owner(claims.user_id()?)
        .await?;

    Ok(Json(json!({ "requests": requests })))
}

#[utoipa::path(
    get,
    path = "/api/reservations/outgoing",
    responses(
        (status = 200, description = "Pending requests made by the caller"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn list_outgoing(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<Value>, DomainError> {
    let requests = state
        .reservations
        .list_outgoing_for_user(claims.user_id()?)
        .await?;

    Ok(Json(json!({ "requests": requests })))
}

#[utoipa::path(
    post,
    path = "/api/books/{id}/reservations/{user_id}/approve",
    params(
        ("id" = i32, Path, description = "Book id"),
        ("user_id" = i32, Path, description = "Requester id")
    ),
    responses(
        (status = 200, description = "Book assigned to the requester"),
        (status = 403, description = "Caller does not own the book"),
        (status = 404, description = "No such request"),
        (status = 409, description = "Book already assigned")
    )
)]
pub async fn approve_request(
    State(state): State<AppState>,
    claims: Claims,
    Path((book_id, user_id)): Path<(i32, i32)>,
) -> Result<Json<Value>, DomainError> {
    state
        .reservations
        .approve(book_id, user_id, claims.user_id()?)
        .await?;

    Ok(Json(json!({
        "message": "Reservation approved",
        "assigned_to": user_id
    })))
}

#[utoipa::path(
    post,
    path = "/api/books/{id}/reservations/{user_id}/reject",
    params(
        ("id" = i32, Path, description = "Book id"),
        ("user_id" = i32, Path, description = "Requester id")
    ),
    responses(
        (status = 200, description = "Request discarded"),
        (status = 403, description = "Caller does not own the book"),
        (status = 404, description = "No such request")
    )
)]
pub async fn reject_request(
    State(state): State<AppState>,
    claims: Claims,
    Path((book_id, user_id)): Path<(i32, i32)>,
) -> Result<Json<Value>, DomainError> {
    state
        .reservations
        .reject(book_id, user_id, claims.user_id()?)
        .await?;

    Ok(Json(json!({ "message": "Reservation rejected" })))
}
