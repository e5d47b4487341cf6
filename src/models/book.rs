use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Placeholder image reference used when a listing is created without a photo.
pub const DEFAULT_PHOTO: &str = "default.jpg";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub summary: String,
    #[sea_orm(default_value = "default.jpg")]
    pub photo: String,
    pub user_id: i32,
    // Plain user id, no foreign key
    pub assigned_to: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Owner,
    #[sea_orm(has_many = "super::wishlist::Entity")]
    Wishlist,
    #[sea_orm(has_many = "super::reservation_request::Entity")]
    ReservationRequests,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::wishlist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wishlist.def()
    }
}

impl Related<super::reservation_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReservationRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub summary: String,
    pub photo: String,
    pub user_id: i32,
    pub assigned_to: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

impl Book {
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }
}

impl From<Model> for Book {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            author: model.author,
            year: model.year,
            summary: model.summary,
            photo: model.photo,
            user_id: model.user_id,
            assigned_to: model.assigned_to,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
