//! SeaORM entities mirroring the relational schema.

pub mod post;
pub mod post_tag;
pub mod tag;
pub mod user;
