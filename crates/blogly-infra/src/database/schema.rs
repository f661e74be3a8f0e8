//! Schema bootstrap.
//!
//! Tables are created straight from the entity definitions, so the foreign
//! keys carry the cascade rules declared on the relations: deleting a user
//! removes its posts, deleting a post or tag removes its join rows.

use sea_orm::{ConnectionTrait, DbConn, DbErr, Schema};

use super::entity::{post, post_tag, tag, user};

/// Create all tables if they do not already exist.
pub async fn create_tables(db: &DbConn) -> Result<(), DbErr> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    // Referenced tables first.
    let statements = [
        schema.create_table_from_entity(user::Entity),
        schema.create_table_from_entity(tag::Entity),
        schema.create_table_from_entity(post::Entity),
        schema.create_table_from_entity(post_tag::Entity),
    ];

    for mut statement in statements {
        db.execute(builder.build(statement.if_not_exists())).await?;
    }

    tracing::info!("Database schema ready");
    Ok(())
}
