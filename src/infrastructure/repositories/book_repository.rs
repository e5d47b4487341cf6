//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::domain::{BookRepository, DomainError, ListingUpdate, NewListing};
use crate::models::Book;
use crate::models::book::{ActiveModel, Column, DEFAULT_PHOTO, Entity as BookEntity};
use crate::models::user::Entity as UserEntity;
use crate::models::{reservation_request, wishlist};

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self) -> Result<Vec<Book>, DomainError> {
        let books = BookEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(books.into_iter().map(Book::from).collect())
    }

    async fn find_by_owner(&self, owner_id: i32) -> Result<Vec<Book>, DomainError> {
        let books = BookEntity::find()
            .filter(Column::UserId.eq(owner_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(books.into_iter().map(Book::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        let book = BookEntity::find_by_id(id).one(&self.db).await?;
        Ok(book.map(Book::from))
    }

    async fn create(&self, owner_id: i32, listing: NewListing) -> Result<Book, DomainError> {
        if UserEntity::find_by_id(owner_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(DomainError::NotFound);
        }

        let now = chrono::Utc::now().to_rfc3339();

        let new_book = ActiveModel {
            title: Set(listing.title),
            author: Set(listing.author),
            year: Set(listing.year),
            summary: Set(listing.summary),
            photo: Set(listing
                .photo
                .unwrap_or_else(|| DEFAULT_PHOTO.to_string())),
            user_id: Set(owner_id),
            assigned_to: Set(None),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = new_book.insert(&self.db).await?;
        tracing::info!(
            "User #{} listed book #{} ({})",
            owner_id,
            result.id,
            result.title
        );
        Ok(Book::from(result))
    }

    async fn update(
        &self,
        id: i32,
        editor_id: i32,
        update: ListingUpdate,
    ) -> Result<Book, DomainError> {
        let existing = BookEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        if existing.user_id != editor_id {
            tracing::warn!("User #{} tried to edit book #{} they do not own", editor_id, id);
            return Err(DomainError::NotOwner);
        }

        let mut active: ActiveModel = existing.into();
        if let Some(title) = update.title {
            active.title = Set(title);
        }
        if let Some(author) = update.author {
            active.author = Set(author);
        }
        if let Some(year) = update.year {
            active.year = Set(year);
        }
        if let Some(summary) = update.summary {
            active.summary = Set(summary);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let result = active.update(&self.db).await?;
        Ok(Book::from(result))
    }

    async fn delete(&self, id: i32, editor_id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let existing = BookEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(DomainError::NotFound)?;

        if existing.user_id != editor_id {
            tracing::warn!(
                "User #{} tried to delete book #{} they do not own",
                editor_id,
                id
            );
            return Err(DomainError::NotOwner);
        }

        let wished = wishlist::Entity::delete_many()
            .filter(wishlist::Column::BookId.eq(id))
            .exec(&txn)
            .await?;
        let requested = reservation_request::Entity::delete_many()
            .filter(reservation_request::Column::BookId.eq(id))
            .exec(&txn)
            .await?;

        existing.delete(&txn).await?;
        txn.commit().await?;

        tracing::info!(
            "Deleted book #{} ({} wishlist entries, {} open requests)",
            id,
            wished.rows_affected,
            requested.rows_affected
        );
        Ok(())
    }
}
