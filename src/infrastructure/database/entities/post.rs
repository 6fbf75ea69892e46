//! Post entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::timestamp_value;
use crate::infrastructure::database::store::QueryableEntity;
use crate::shared::pagination::{PageRecord, QueryValue};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "posts")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub content: String,
    pub like_count: i32,
    pub comment_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl QueryableEntity for Entity {
    fn column(field: &str) -> Option<Column> {
        Some(match field {
            "id" => Column::Id,
            "authorId" => Column::AuthorId,
            "title" => Column::Title,
            "content" => Column::Content,
            "likeCount" => Column::LikeCount,
            "commentCount" => Column::CommentCount,
            "createdAt" => Column::CreatedAt,
            "updatedAt" => Column::UpdatedAt,
            _ => return None,
        })
    }
}

impl PageRecord for Model {
    fn id(&self) -> i64 {
        self.id.into()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn field(&self, name: &str) -> Option<QueryValue> {
        Some(match name {
            "id" => self.id.into(),
            "authorId" => self.author_id.into(),
            "title" => self.title.as_str().into(),
            "content" => self.content.as_str().into(),
            "likeCount" => self.like_count.into(),
            "commentCount" => self.comment_count.into(),
            "createdAt" => timestamp_value(&self.created_at),
            "updatedAt" => timestamp_value(&self.updated_at),
            _ => return None,
        })
    }

    fn has_field(name: &str) -> bool {
        Entity::column(name).is_some()
    }
}
