use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::auth::register,
        api::auth::login,
        api::auth::get_me,
        api::books::list_books,
        api::books::list_my_books,
        api::books::create_book,
        api::books::get_book,
        api::books::update_book,
        api::books::delete_book,
        api::wishlist::list_wishlist,
        api::wishlist::add_to_wishlist,
        api::wishlist::remove_from_wishlist,
        api::reservations::request_book,
        api::reservations::cancel_request,
        api::reservations::list_incoming,
        api::reservations::list_outgoing,
        api::reservations::approve_request,
        api::reservations::reject_request,
    ),
    tags(
        (name = "bookswap", description = "Book exchange API")
    )
)]
pub struct ApiDoc;
