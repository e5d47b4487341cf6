use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::auth::Claims;
use crate::domain::DomainError;
use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/api/wishlist",
    responses(
        (status = 200, description = "Books on the caller's wishlist"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn list_wishlist(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<Value>, DomainError> {
    let books = state
        .wishlist_repo
        .find_books_for_user(claims.user_id()?)
        .await?;

    Ok(Json(json!({
        "total": books.len(),
        "books": books
    })))
}

#[utoipa::path(
    post,
    path = "/api/books/{id}/wishlist",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book is on the wishlist"),
        (status = 404, description = "No such book or user")
    )
)]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    claims: Claims,
    Path(book_id): Path<i32>,
) -> Result<Json<Value>, DomainError> {
    state.wishlist_repo.add(claims.user_id()?, book_id).await?;
    Ok(Json(json!({ "message": "Added to wishlist" })))
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}/wishlist",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book removed from the wishlist"),
        (status = 404, description = "Book was not on the wishlist")
    )
)]
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    claims: Claims,
    Path(book_id): Path<i32>,
) -> Result<Json<Value>, DomainError> {
    state
        .wishlist_repo
        .remove(claims.user_id()?, book_id)
        .await?;
    Ok(Json(json!({ "message": "Removed from wishlist" })))
}
