//! # Blogly Infrastructure
//!
//! Concrete implementations of the ports defined in `blogly-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL persistence via SeaORM
//! - `minimal` - in-memory store only

pub mod database;
pub mod memory;

pub use memory::{MemoryPostRepository, MemoryStore, MemoryTagRepository, MemoryUserRepository};

#[cfg(feature = "postgres")]
pub use database::{SeaOrmPostRepository, SeaOrmTagRepository, SeaOrmUserRepository};
