pub mod auth;
pub mod books;
pub mod error;
pub mod health;
pub mod reservations;
pub mod validation;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::get_me))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/mine", get(books::list_my_books))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Wishlist
        .route("/wishlist", get(wishlist::list_wishlist))
        .route(
            "/books/:id/wishlist",
            post(wishlist::add_to_wishlist).delete(wishlist::remove_from_wishlist),
        )
        // Reservations
        .route(
            "/books/:id/reservation",
            post(reservations::request_book).delete(reservations::cancel_request),
        )
        .route("/reservations/incoming", get(reservations::list_incoming))
        .route("/reservations/outgoing", get(reservations::list_outgoing))
        .route(
            "/books/:id/reservations/:user_id/approve",
            post(reservations::approve_request),
        )
        .route(
            "/books/:id/reservations/:user_id/reject",
            post(reservations::reject_request),
        )
        .with_state(state)
}
