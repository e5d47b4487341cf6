//! Services Layer
//!
//! This module contains pure business logic extracted from HTTP handlers.

pub mod book_service;
pub mod reservation_service;

// Re-export for convenience
pub use book_service::{BookDetail, book_detail};
pub use reservation_service::{
    IncomingRequest, OutgoingRequest, ReservationPolicy, ReservationService,
};
