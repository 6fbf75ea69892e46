pub mod entities;
pub mod migrator;
pub mod repositories;
pub mod store;

pub use store::{QueryableEntity, SeaOrmStore};

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde::Deserialize;
use tracing::info;

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./blog.db?mode=rwc")
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./blog.db?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            ..Self::default()
        }
    }

    /// Private in-memory database; a single connection keeps every query on it.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .sqlx_logging(false);
    let db = Database::connect(options).await?;
    info!("Database connected successfully");
    Ok(db)
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{Duration, TimeZone, Utc};
    use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
    use sea_orm_migration::MigratorTrait;

    use super::entities::{post, user};
    use super::migrator::Migrator;
    use super::{init_database, DatabaseConfig};

    pub async fn setup_db() -> DatabaseConnection {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    pub async fn seed_user(db: &DatabaseConnection, nickname: &str) -> user::Model {
        let now = Utc::now();
        user::ActiveModel {
            nickname: Set(nickname.to_string()),
            email: Set(format!("{}@example.com", nickname)),
            password_hash: Set("x".to_string()),
            role: Set(user::UserRole::User),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
    }

    /// Posts created one minute apart, in the order given.
    pub async fn seed_posts(
        db: &DatabaseConnection,
        author_id: i32,
        titles: &[&str],
    ) -> Vec<post::Model> {
        let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut posts = Vec::new();
        for (i, title) in titles.iter().enumerate() {
            let at = epoch + Duration::minutes(i as i64);
            let model = post::ActiveModel {
                author_id: Set(author_id),
                title: Set(title.to_string()),
                content: Set(format!("content of {}", title)),
                like_count: Set(0),
                comment_count: Set(0),
                created_at: Set(at),
                updated_at: Set(at),
                ..Default::default()
            }
            .insert(db)
            .await
            .unwrap();
            posts.push(model);
        }
        posts
    }
}
