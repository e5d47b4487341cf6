//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr, TransactionTrait,
};

use crate::domain::{DomainError, UserRepository};
use crate::models::User;
use crate::models::user::{ActiveModel, Column, Entity as UserEntity};

/// SeaORM-based implementation of UserRepository
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Map a UNIQUE violation raised by the store onto the column it hit.
fn map_unique_violation(err: DbErr) -> DomainError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) if msg.contains("email") => {
            DomainError::DuplicateEmail
        }
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::DuplicateName,
        _ => DomainError::from(err),
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn register(
        &self,
        name: String,
        email: String,
        password_hash: String,
    ) -> Result<User, DomainError> {
        let txn = self.db.begin().await?;

        if UserEntity::find()
            .filter(Column::Name.eq(&name))
            .one(&txn)
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicateName);
        }

        if UserEntity::find()
            .filter(Column::Email.eq(&email))
            .one(&txn)
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicateEmail);
        }

        let now = chrono::Utc::now().to_rfc3339();
        let user = ActiveModel {
            name: Set(name),
            email: Set(email),
            password_hash: Set(password_hash),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = user.insert(&txn).await.map_err(map_unique_violation)?;
        txn.commit().await?;

        tracing::info!("Registered user #{} ({})", result.id, result.name);
        Ok(User::from(result))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let user = UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(user.map(User::from))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        let user = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(user.map(User::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn account(name: &str, email: &str) -> ActiveModel {
        ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set("hash".to_string()),
            created_at: Set("2024-01-01T00:00:00Z".to_string()),
            updated_at: Set("2024-01-01T00:00:00Z".to_string()),
            ..Default::default()
        }
    }

    // Inserts bypassing the pre-checks so the store's UNIQUE constraints fire
    #[tokio::test]
    async fn test_unique_violations_map_to_column() {
        let db = db::init_db("sqlite::memory:").await.unwrap();
        account("Alice", "a@x.com").insert(&db).await.unwrap();

        let same_email = account("Other", "a@x.com").insert(&db).await.unwrap_err();
        assert_eq!(map_unique_violation(same_email), DomainError::DuplicateEmail);

        let same_name = account("Alice", "other@x.com").insert(&db).await.unwrap_err();
        assert_eq!(map_unique_violation(same_name), DomainError::DuplicateName);
    }

    #[tokio::test]
    async fn test_other_errors_stay_database_errors() {
        let err = DbErr::Custom("connection reset".to_string());
        assert!(matches!(map_unique_violation(err), DomainError::Database(_)));
    }
}
