//! Reservation Service - the request / approve / reject workflow
//!
//! Per (user, book) pair a reservation moves from *none* to *requested* when
//! the user asks for the book, then leaves *requested* when the owner approves
//! (the book is assigned to the user) or rejects (nothing else changes). Both
//! outcomes delete the request row, so asking again is always possible.
//!
//! Every transition runs in its own transaction.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;

use crate::domain::DomainError;
use crate::models::book::{self, Entity as BookEntity};
use crate::models::reservation_request::{self, Entity as ReservationEntity};
use crate::models::user::{self, Entity as UserEntity};

/// How strictly the workflow guards against self-requests and double
/// assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationPolicy {
    /// Owners cannot request their own books, and an assigned book cannot be
    /// approved for anyone else.
    #[default]
    Strict,
    /// No guards: any user may request any book and approval always
    /// overwrites the current assignment.
    Permissive,
}

impl ReservationPolicy {
    fn forbids_self_request(self) -> bool {
        matches!(self, ReservationPolicy::Strict)
    }

    fn forbids_reassignment(self) -> bool {
        matches!(self, ReservationPolicy::Strict)
    }
}

impl fmt::Display for ReservationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservationPolicy::Strict => write!(f, "strict"),
            ReservationPolicy::Permissive => write!(f, "permissive"),
        }
    }
}

impl FromStr for ReservationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ReservationPolicy::Strict),
            "permissive" => Ok(ReservationPolicy::Permissive),
            other => Err(format!("Unknown reservation policy '{}'", other)),
        }
    }
}

/// A pending request on one of the owner's books
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomingRequest {
    pub book_id: i32,
    pub book_title: String,
    pub requester_id: i32,
    pub requester_name: String,
    pub requested_at: String,
}

/// A pending request the user has made on someone else's book
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingRequest {
    pub book_id: i32,
    pub book_title: String,
    pub owner_id: i32,
    pub owner_name: String,
    pub requested_at: String,
}

#[derive(Clone)]
pub struct ReservationService {
    db: DatabaseConnection,
    policy: ReservationPolicy,
}

impl ReservationService {
    pub fn new(db: DatabaseConnection, policy: ReservationPolicy) -> Self {
        Self { db, policy }
    }

    pub fn policy(&self) -> ReservationPolicy {
        self.policy
    }

    /// Ask for a book. Asking twice leaves a single request.
    pub async fn request(&self, user_id: i32, book_id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        if UserEntity::find_by_id(user_id).one(&txn).await?.is_none() {
            return Err(DomainError::NotFound);
        }

        let book = BookEntity::find_by_id(book_id)
            .one(&txn)
            .await?
            .ok_or(DomainError::NotFound)?;

        if book.user_id == user_id && self.policy.forbids_self_request() {
            tracing::warn!("User #{} tried to reserve their own book #{}", user_id, book_id);
            return Err(DomainError::SelfReservation);
        }

        let existing = ReservationEntity::find_by_id((user_id, book_id))
            .one(&txn)
            .await?;

        if existing.is_none() {
            reservation_request::ActiveModel {
                user_id: Set(user_id),
                book_id: Set(book_id),
                created_at: Set(chrono::Utc::now().to_rfc3339()),
            }
            .insert(&txn)
            .await?;
            tracing::info!("User #{} requested book #{}", user_id, book_id);
        }

        txn.commit().await?;
        Ok(())
    }

    /// Withdraw a pending request
    pub async fn cancel(&self, user_id: i32, book_id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let result = ReservationEntity::delete_many()
            .filter(reservation_request::Column::UserId.eq(user_id))
            .filter(reservation_request::Column::BookId.eq(book_id))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        txn.commit().await?;
        tracing::info!("User #{} cancelled their request on book #{}", user_id, book_id);
        Ok(())
    }

    /// Turn down a request. Only the request row goes away.
    pub async fn reject(
        &self,
        book_id: i32,
        user_id: i32,
        acting_user_id: i32,
    ) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let (_, request) = load_for_decision(&txn, book_id, user_id, acting_user_id).await?;
        request.delete(&txn).await?;

        txn.commit().await?;
        tracing::info!("Owner #{} rejected user #{} on book #{}", acting_user_id, user_id, book_id);
        Ok(())
    }

    /// Grant the book to the requester and close the request.
    pub async fn approve(
        &self,
        book_id: i32,
        user_id: i32,
        acting_user_id: i32,
    ) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let (book, request) = load_for_decision(&txn, book_id, user_id, acting_user_id).await?;

        if let Some(current) = book.assigned_to
            && self.policy.forbids_reassignment()
        {
            tracing::warn!(
                "Book #{} is already assigned to user #{}, refusing to approve user #{}",
                book_id,
                current,
                user_id
            );
            return Err(DomainError::AlreadyAssigned);
        }

        let mut active: book::ActiveModel = book.into();
        active.assigned_to = Set(Some(user_id));
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        active.update(&txn).await?;

        request.delete(&txn).await?;

        txn.commit().await?;
        tracing::info!(
            "Owner #{} approved user #{} on book #{}",
            acting_user_id,
            user_id,
            book_id
        );
        Ok(())
    }

    /// Pending requests on every book `owner_id` owns, oldest first
    pub async fn list_incoming_for_owner(
        &self,
        owner_id: i32,
    ) -> Result<Vec<IncomingRequest>, DomainError> {
        let books = BookEntity::find()
            .filter(book::Column::UserId.eq(owner_id))
            .all(&self.db)
            .await?;

        if books.is_empty() {
            return Ok(Vec::new());
        }

        let titles: HashMap<i32, String> = books.into_iter().map(|b| (b.id, b.title)).collect();
        let book_ids: Vec<i32> = titles.keys().copied().collect();

        let requests = ReservationEntity::find()
            .filter(reservation_request::Column::BookId.is_in(book_ids))
            .order_by_asc(reservation_request::Column::CreatedAt)
            .order_by_asc(reservation_request::Column::BookId)
            .find_also_related(UserEntity)
            .all(&self.db)
            .await?;

        let result = requests
            .into_iter()
            .map(|(request, requester)| IncomingRequest {
                book_title: titles
                    .get(&request.book_id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown".to_string()),
                requester_name: requester
                    .map(|u| u.name)
                    .unwrap_or_else(|| "Unknown".to_string()),
                book_id: request.book_id,
                requester_id: request.user_id,
                requested_at: request.created_at,
            })
            .collect();

        Ok(result)
    }

    /// Pending requests `user_id` has made, oldest first
    pub async fn list_outgoing_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<OutgoingRequest>, DomainError> {
        let requests = ReservationEntity::find()
            .filter(reservation_request::Column::UserId.eq(user_id))
            .order_by_asc(reservation_request::Column::CreatedAt)
            .order_by_asc(reservation_request::Column::BookId)
            .find_also_related(BookEntity)
            .all(&self.db)
            .await?;

        let owner_ids: Vec<i32> = requests
            .iter()
            .filter_map(|(_, book)| book.as_ref().map(|b| b.user_id))
            .collect();

        let mut owner_names: HashMap<i32, String> = HashMap::new();
        if !owner_ids.is_empty() {
            let owners = UserEntity::find()
                .filter(user::Column::Id.is_in(owner_ids))
                .all(&self.db)
                .await?;
            owner_names.extend(owners.into_iter().map(|u| (u.id, u.name)));
        }

        let result = requests
            .into_iter()
            .filter_map(|(request, book)| {
                let book = book?;
                Some(OutgoingRequest {
                    book_id: book.id,
                    book_title: book.title,
                    owner_id: book.user_id,
                    owner_name: owner_names
                        .get(&book.user_id)
                        .cloned()
                        .unwrap_or_else(|| "Unknown".to_string()),
                    requested_at: request.created_at,
                })
            })
            .collect();

        Ok(result)
    }

    pub async fn has_requested(&self, user_id: i32, book_id: i32) -> Result<bool, DomainError> {
        let request = ReservationEntity::find_by_id((user_id, book_id))
            .one(&self.db)
            .await?;

        Ok(request.is_some())
    }
}

/// Shared preconditions of approve and reject: the request must exist and the
/// acting user must own the book.
async fn load_for_decision(
    txn: &DatabaseTransaction,
    book_id: i32,
    user_id: i32,
    acting_user_id: i32,
) -> Result<(book::Model, reservation_request::Model), DomainError> {
    let request = ReservationEntity::find_by_id((user_id, book_id))
        .one(txn)
        .await?
        .ok_or(DomainError::NotFound)?;

    let book = BookEntity::find_by_id(book_id)
        .one(txn)
        .await?
        .ok_or(DomainError::NotFound)?;

    if book.user_id != acting_user_id {
        tracing::warn!(
            "User #{} tried to decide on book #{} owned by #{}",
            acting_user_id,
            book_id,
            book.user_id
        );
        return Err(DomainError::NotOwner);
    }

    Ok((book, request))
}
