//! Repository implementations using SeaORM

pub mod book_repository;
pub mod user_repository;
pub mod wishlist_repository;

pub use book_repository::SeaOrmBookRepository;
pub use user_repository::SeaOrmUserRepository;
pub use wishlist_repository::SeaOrmWishlistRepository;
