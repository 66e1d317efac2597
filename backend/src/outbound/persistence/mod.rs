//! Persistence adapters for the driven repository ports.
//!
//! Two families live here: in-memory stores for tests and local development,
//! and Diesel-backed SQLite repositories for real deployments.

pub mod diesel_comment_repository;
mod diesel_helpers;
pub mod diesel_news_repository;
pub mod diesel_note_repository;
pub mod diesel_user_repository;
pub mod memory;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_news_repository::DieselNewsRepository;
pub use diesel_note_repository::DieselNoteRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use memory::{
    MemoryCommentRepository, MemoryNewsRepository, MemoryNoteRepository, MemoryUserRepository,
};
pub use pool::{DbPool, PoolConfig, PoolError};
