//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::DomainError;
use crate::models::{Book, User};

/// Fields required to put a book up for exchange
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewListing {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub summary: String,
    /// Reference produced by the media store; falls back to the placeholder
    pub photo: Option<String>,
}

/// Owner edits to an existing listing. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ListingUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    pub summary: Option<String>,
}

/// Repository trait for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create an account. Name and email must both be unused.
    async fn register(
        &self,
        name: String,
        email: String,
        password_hash: String,
    ) -> Result<User, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError>;
}

/// Repository trait for book listings
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find every listing, oldest first
    async fn find_all(&self) -> Result<Vec<Book>, DomainError>;

    /// Find the listings owned by one user
    async fn find_by_owner(&self, owner_id: i32) -> Result<Vec<Book>, DomainError>;

    /// Find a single book by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError>;

    /// Create a listing owned by `owner_id`
    async fn create(&self, owner_id: i32, listing: NewListing) -> Result<Book, DomainError>;

    /// Apply an owner's edits
    async fn update(
        &self,
        id: i32,
        editor_id: i32,
        update: ListingUpdate,
    ) -> Result<Book, DomainError>;

    /// Delete a listing along with every wishlist entry and reservation
    /// request that points at it
    async fn delete(&self, id: i32, editor_id: i32) -> Result<(), DomainError>;
}

/// Repository trait for the user/book wishlist relation
#[async_trait]
pub trait WishlistRepository: Send + Sync {
    /// Add a book to a wishlist. Adding twice is a no-op.
    async fn add(&self, user_id: i32, book_id: i32) -> Result<(), DomainError>;

    /// Remove a book from a wishlist, `NotFound` if it was never there
    async fn remove(&self, user_id: i32, book_id: i32) -> Result<(), DomainError>;

    async fn find_books_for_user(&self, user_id: i32) -> Result<Vec<Book>, DomainError>;

    async fn contains(&self, user_id: i32, book_id: i32) -> Result<bool, DomainError>;
}
