//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod server;
pub mod storage;

pub use database::{init_database, DatabaseConfig, SeaOrmStore};
pub use server::{listen_for_shutdown_signals, ShutdownSignal};
pub use storage::InMemoryStore;
