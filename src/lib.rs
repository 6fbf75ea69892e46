//! # Blog Service
//!
//! Blog and chat backend: posts, comments, users and chat messages, all
//! listed through one filterable pagination engine.
//!
//! ## Architecture
//!
//! - **shared::pagination**: query grammar, predicate compiler, cursor and
//!   offset pagination, page envelope
//! - **domain**: aggregates, DTOs, repository interfaces and errors
//! - **infrastructure**: SeaORM entities, migrations and repositories,
//!   in-memory store, password hashing, shutdown handling
//! - **interfaces**: REST API with Swagger documentation
//! - **config**: TOML configuration

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::{create_api_router, AppState};
