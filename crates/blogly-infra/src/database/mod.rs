//! Database connection management and SeaORM repositories.

mod connections;

#[cfg(feature = "postgres")]
pub mod entity;

#[cfg(feature = "postgres")]
mod schema;

#[cfg(feature = "postgres")]
mod seaorm_repo;

pub use connections::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use connections::connect;

#[cfg(feature = "postgres")]
pub use sea_orm::DbErr;

#[cfg(feature = "postgres")]
pub use schema::create_tables;

#[cfg(feature = "postgres")]
pub use seaorm_repo::{SeaOrmPostRepository, SeaOrmTagRepository, SeaOrmUserRepository};

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
