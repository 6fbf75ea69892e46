use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, User, UserRepositoryInterface, UserRole,
};
use crate::infrastructure::crypto::PasswordHasher;
use crate::infrastructure::database::entities::user;
use crate::infrastructure::database::store::SeaOrmStore;
use crate::shared::{Page, PaginationRequest, Paginator};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
    store: SeaOrmStore<user::Entity>,
    paginator: Arc<Paginator>,
    hasher: PasswordHasher,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection, paginator: Arc<Paginator>, hasher: PasswordHasher) -> Self {
        Self {
            store: SeaOrmStore::new(db.clone()),
            db,
            paginator,
            hasher,
        }
    }

    async fn is_taken(&self, column: user::Column, value: &str) -> DomainResult<bool> {
        let existing = user::Entity::find()
            .filter(column.eq(value))
            .one(&self.db)
            .await?;
        Ok(existing.is_some())
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::User => UserRole::User,
        user::UserRole::Admin => UserRole::Admin,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::User => user::UserRole::User,
        UserRole::Admin => user::UserRole::Admin,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        nickname: model.nickname,
        email: model.email,
        role: entity_role_to_domain(model.role),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for SeaOrmUserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        if self.is_taken(user::Column::Nickname, &dto.nickname).await? {
            return Err(DomainError::Conflict("Nickname already exists".to_string()));
        }
        if self.is_taken(user::Column::Email, &dto.email).await? {
            return Err(DomainError::Conflict("Email already exists".to_string()));
        }

        let password_hash = self
            .hasher
            .hash(&dto.password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;

        let now = Utc::now();
        let new_user = user::ActiveModel {
            nickname: Set(dto.nickname),
            email: Set(dto.email),
            password_hash: Set(password_hash),
            role: Set(domain_role_to_entity(dto.role.unwrap_or_default())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        // A concurrent insert can still win the race past the checks above.
        let model = new_user.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                DomainError::Conflict("Nickname or email already exists".to_string())
            } else {
                DomainError::Database(e)
            }
        })?;

        Ok(user_model_to_domain(model))
    }

    async fn list_users(&self, request: &PaginationRequest) -> DomainResult<Page<User>> {
        let page = self
            .paginator
            .paginate(request, &self.store, &[], "users")
            .await?;
        Ok(page.map(user_model_to_domain))
    }

    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(user_model_to_domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::setup_db;
    use crate::shared::pagination::PaginationConfig;

    async fn repo() -> SeaOrmUserRepository {
        let db = setup_db().await;
        let paginator = Arc::new(Paginator::new(PaginationConfig::default()).unwrap());
        SeaOrmUserRepository::new(db, paginator, PasswordHasher::new(4))
    }

    fn dto(nickname: &str, email: &str) -> CreateUserDto {
        CreateUserDto {
            nickname: nickname.to_string(),
            email: email.to_string(),
            password: "pw123".to_string(),
            role: None,
        }
    }

    #[tokio::test]
    async fn create_hashes_password_and_defaults_role() {
        let repo = repo().await;
        let created = repo.create_user(dto("alice", "alice@example.com")).await.unwrap();
        assert_eq!(created.role, UserRole::User);

        let stored = user::Entity::find_by_id(created.id)
            .one(&repo.db)
            .await
            .unwrap()
            .unwrap();
        assert_ne!(stored.password_hash, "pw123");
        assert!(repo.hasher.verify("pw123", &stored.password_hash).unwrap());
        assert_eq!(repo.get_user_by_id(created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn duplicate_nickname_or_email_conflicts() {
        let repo = repo().await;
        repo.create_user(dto("bob", "bob@example.com")).await.unwrap();

        let err = repo.create_user(dto("bob", "other@example.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(ref m) if m.contains("Nickname")));

        let err = repo.create_user(dto("robert", "bob@example.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(ref m) if m.contains("Email")));
    }

    #[tokio::test]
    async fn lists_users_filtered_by_role() {
        let repo = repo().await;
        repo.create_user(dto("carol", "carol@example.com")).await.unwrap();
        repo.create_user(CreateUserDto {
            role: Some(UserRole::Admin),
            ..dto("dave", "dave@example.com")
        })
        .await
        .unwrap();

        let request = PaginationRequest::new().with("where__role", "admin");
        let page = repo.list_users(&request).await.unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.data[0].nickname, "dave");
        assert_eq!(page.next, None);

        let hidden = PaginationRequest::new().with("where__passwordHash__like", "%");
        assert!(repo.list_users(&hidden).await.is_err());
    }
}
