//! Non-database record stores

pub mod memory;

pub use memory::InMemoryStore;
