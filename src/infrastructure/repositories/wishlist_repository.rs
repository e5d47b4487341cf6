//! SeaORM implementation of WishlistRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, SqlErr,
};

use crate::domain::{DomainError, WishlistRepository};
use crate::models::Book;
use crate::models::book::Entity as BookEntity;
use crate::models::user::Entity as UserEntity;
use crate::models::wishlist::{self, ActiveModel, Entity as WishlistEntity};

/// SeaORM-based implementation of WishlistRepository
pub struct SeaOrmWishlistRepository {
    db: DatabaseConnection,
}

impl SeaOrmWishlistRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WishlistRepository for SeaOrmWishlistRepository {
    async fn add(&self, user_id: i32, book_id: i32) -> Result<(), DomainError> {
        if UserEntity::find_by_id(user_id).one(&self.db).await?.is_none() {
            return Err(DomainError::NotFound);
        }
        if BookEntity::find_by_id(book_id).one(&self.db).await?.is_none() {
            return Err(DomainError::NotFound);
        }

        // Check if already exists
        if WishlistEntity::find_by_id((user_id, book_id))
            .one(&self.db)
            .await?
            .is_some()
        {
            return Ok(()); // Already exists, idempotent
        }

        let entry = ActiveModel {
            user_id: Set(user_id),
            book_id: Set(book_id),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        match entry.insert(&self.db).await {
            Ok(_) => {
                tracing::debug!("User #{} wishlisted book #{}", user_id, book_id);
                Ok(())
            }
            // Lost a race against an identical insert
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove(&self, user_id: i32, book_id: i32) -> Result<(), DomainError> {
        let result = WishlistEntity::delete_many()
            .filter(wishlist::Column::UserId.eq(user_id))
            .filter(wishlist::Column::BookId.eq(book_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn find_books_for_user(&self, user_id: i32) -> Result<Vec<Book>, DomainError> {
        let books = BookEntity::find()
            .join(JoinType::InnerJoin, wishlist::Relation::Book.def().rev())
            .filter(wishlist::Column::UserId.eq(user_id))
            .order_by_asc(wishlist::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(books.into_iter().map(Book::from).collect())
    }

    async fn contains(&self, user_id: i32, book_id: i32) -> Result<bool, DomainError> {
        let entry = WishlistEntity::find_by_id((user_id, book_id))
            .one(&self.db)
            .await?;

        Ok(entry.is_some())
    }
}
