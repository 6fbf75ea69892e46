//! Chat message entity
//!
//! Messages are written by the chat gateway; only listing and plain inserts
//! live here.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::timestamp_value;
use crate::infrastructure::database::store::QueryableEntity;
use crate::shared::pagination::{PageRecord, QueryValue};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "messages")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub chat_id: i32,
    pub author_id: i32,
    pub message: String,
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
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl QueryableEntity for Entity {
    fn column(field: &str) -> Option<Column> {
        Some(match field {
            "id" => Column::Id,
            "chatId" => Column::ChatId,
            "authorId" => Column::AuthorId,
            "message" => Column::Message,
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
            "chatId" => self.chat_id.into(),
            "authorId" => self.author_id.into(),
            "message" => self.message.as_str().into(),
            "createdAt" => timestamp_value(&self.created_at),
            "updatedAt" => timestamp_value(&self.updated_at),
            _ => return None,
        })
    }

    fn has_field(name: &str) -> bool {
        Entity::column(name).is_some()
    }
}
