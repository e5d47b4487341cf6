use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::validation::{
    MAX_AUTHOR_LEN, MAX_SUMMARY_LEN, MAX_TITLE_LEN, check_photo, require_text,
};
use crate::auth::Claims;
use crate::domain::{DomainError, ListingUpdate, NewListing};
use crate::infrastructure::AppState;
use crate::services::book_detail;

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub summary: String,
    pub photo: Option<String>,
}

impl CreateBookRequest {
    fn into_listing(self) -> Result<NewListing, DomainError> {
        require_text("title", &self.title, MAX_TITLE_LEN)?;
        require_text("author", &self.author, MAX_AUTHOR_LEN)?;
        require_text("summary", &self.summary, MAX_SUMMARY_LEN)?;
        if let Some(photo) = &self.photo {
            check_photo(photo)?;
        }

        Ok(NewListing {
            title: self.title,
            author: self.author,
            year: self.year,
            summary: self.summary,
            photo: self.photo,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    pub summary: Option<String>,
}

impl UpdateBookRequest {
    fn into_update(self) -> Result<ListingUpdate, DomainError> {
        if let Some(title) = &self.title {
            require_text("title", title, MAX_TITLE_LEN)?;
        }
        if let Some(author) = &self.author {
            require_text("author", author, MAX_AUTHOR_LEN)?;
        }
        if let Some(summary) = &self.summary {
            require_text("summary", summary, MAX_SUMMARY_LEN)?;
        }

        Ok(ListingUpdate {
            title: self.title,
            author: self.author,
            year: self.year,
            summary: self.summary,
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/books",
    responses(
        (status = 200, description = "Every listing")
    )
)]
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Value>, DomainError> {
    let books = state.book_repo.find_all().await?;

    Ok(Json(json!({
        "total": books.len(),
        "books": books
    })))
}

#[utoipa::path(
    get,
    path = "/api/books/mine",
    responses(
        (status = 200, description = "Listings owned by the caller"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn list_my_books(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<Value>, DomainError> {
    let books = state.book_repo.find_by_owner(claims.user_id()?).await?;

    Ok(Json(json!({
        "total": books.len(),
        "books": books
    })))
}

#[utoipa::path(
    post,
    path = "/api/books",
    responses(
        (status = 201, description = "Listing created"),
        (status = 401, description = "Not logged in"),
        (status = 422, description = "Invalid input")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<CreateBookRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let listing = payload.into_listing()?;
    let book = state.book_repo.create(claims.user_id()?, listing).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Book is added",
            "book": book
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book with viewer flags"),
        (status = 404, description = "No such book")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    headers: HeaderMap,
    claims: Result<Claims, DomainError>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, DomainError> {
    // Bad credentials fall back to the anonymous view
    let viewer_id = match claims.and_then(|c| c.user_id()) {
        Ok(viewer) => Some(viewer),
        Err(e) => {
            if headers.contains_key(header::AUTHORIZATION) {
                tracing::debug!("Ignoring credentials on book #{}: {}", id, e);
            }
            None
        }
    };

    let detail = book_detail(&state, id, viewer_id).await?;
    Ok(Json(json!({ "book": detail })))
}

#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Listing updated"),
        (status = 403, description = "Caller does not own the book"),
        (status = 404, description = "No such book")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBookRequest>,
) -> Result<Json<Value>, DomainError> {
    let update = payload.into_update()?;
    let book = state
        .book_repo
        .update(id, claims.user_id()?, update)
        .await?;

    Ok(Json(json!({ "book": book })))
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Listing deleted"),
        (status = 403, description = "Caller does not own the book"),
        (status = 404, description = "No such book")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i32>,
) -> Result<Json<Value>, DomainError> {
    state.book_repo.delete(id, claims.user_id()?).await?;
    Ok(Json(json!({ "message": "Book deleted successfully" })))
}
