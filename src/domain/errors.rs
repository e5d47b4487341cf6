//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Referenced user, book or relation row is absent
    NotFound,
    /// Actor is not the owner of the book they are trying to change
    NotOwner,
    /// Display name already registered
    DuplicateName,
    /// Email already registered
    DuplicateEmail,
    /// A user asked to reserve a book they own
    SelfReservation,
    /// The book has already been assigned to a requester
    AlreadyAssigned,
    /// Credentials missing, invalid or expired
    Unauthorized,
    /// Validation error with message
    Validation(String),
    /// Database/persistence error
    Database(String),
    /// Generic internal error
    Internal(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound => write!(f, "Resource not found"),
            DomainError::NotOwner => write!(f, "Only the owner of this book can do that"),
            DomainError::DuplicateName => write!(f, "This name is used. Please enter other name."),
            DomainError::DuplicateEmail => {
                write!(f, "This email is used. Please enter other email.")
            }
            DomainError::SelfReservation => write!(f, "You cannot reserve your own book"),
            DomainError::AlreadyAssigned => write!(f, "This book has already been assigned"),
            DomainError::Unauthorized => write!(f, "Invalid credentials"),
            DomainError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}
