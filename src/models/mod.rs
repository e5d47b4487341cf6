pub mod book;
pub mod reservation_request;
pub mod user;
pub mod wishlist;

pub use book::Book;
pub use user::User;
