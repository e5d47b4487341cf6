//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{BookRepository, UserRepository, WishlistRepository};
use crate::infrastructure::{SeaOrmBookRepository, SeaOrmUserRepository, SeaOrmWishlistRepository};
use crate::services::{ReservationPolicy, ReservationService};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    /// Identity store
    pub user_repo: Arc<dyn UserRepository>,
    /// Catalog store
    pub book_repo: Arc<dyn BookRepository>,
    /// Wishlist relation
    pub wishlist_repo: Arc<dyn WishlistRepository>,
    /// Reservation workflow
    pub reservations: ReservationService,
}

impl AppState {
    /// Create a new AppState with the default (strict) reservation policy
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_policy(db, ReservationPolicy::default())
    }

    pub fn with_policy(db: DatabaseConnection, policy: ReservationPolicy) -> Self {
        let user_repo = Arc::new(SeaOrmUserRepository::new(db.clone()));
        let book_repo = Arc::new(SeaOrmBookRepository::new(db.clone()));
        let wishlist_repo = Arc::new(SeaOrmWishlistRepository::new(db.clone()));
        let reservations = ReservationService::new(db.clone(), policy);

        Self {
            db,
            user_repo,
            book_repo,
            wishlist_repo,
            reservations,
        }
    }

    /// Get the database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
