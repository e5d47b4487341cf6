//! Book Service - Pure business logic without HTTP layer
//!
//! Composes the catalog, identity, wishlist and reservation components into
//! the per-viewer book detail.

use serde::Serialize;

use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::Book;

/// A book as seen by a particular (possibly anonymous) viewer
#[derive(Debug, Clone, Serialize)]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: Book,
    pub owner_name: String,
    pub is_owner: bool,
    pub is_in_wishlist: bool,
    pub has_requested: bool,
}

/// Load a book together with the viewer-dependent flags.
///
/// Wishlist and request flags are only meaningful for a logged-in viewer who
/// does not own the book; they are `false` otherwise.
pub async fn book_detail(
    state: &AppState,
    book_id: i32,
    viewer_id: Option<i32>,
) -> Result<BookDetail, DomainError> {
    let book = state
        .book_repo
        .find_by_id(book_id)
        .await?
        .ok_or(DomainError::NotFound)?;

    let owner_name = state
        .user_repo
        .find_by_id(book.user_id)
        .await?
        .map(|u| u.name)
        .unwrap_or_else(|| "Unknown".to_string());

    let is_owner = viewer_id.is_some_and(|viewer| book.is_owned_by(viewer));

    let (is_in_wishlist, has_requested) = match viewer_id {
        Some(viewer) if !is_owner => (
            state.wishlist_repo.contains(viewer, book_id).await?,
            state.reservations.has_requested(viewer, book_id).await?,
        ),
        _ => (false, false),
    };

    Ok(BookDetail {
        book,
        owner_name,
        is_owner,
        is_in_wishlist,
        has_requested,
    })
}
