//! SeaORM repository implementations.
//!
//! Every mutating operation that touches more than one row runs inside a
//! transaction; an uncommitted transaction rolls back on drop, so no error
//! path can leave a partial write behind.

use std::collections::BTreeSet;
use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbConn, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use blogly_core::domain::{
    NewPost, NewTag, NewUser, Post, PostUpdate, PostWithTags, Tag, TagWithPosts, User,
};
use blogly_core::error::RepoError;
use blogly_core::ports::{PostRepository, TagRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};

/// Generic SeaORM repository carrier; the port traits are implemented on
/// per-entity aliases of this type.
pub struct SeaOrmRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> SeaOrmRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// SeaORM user repository.
pub type SeaOrmUserRepository = SeaOrmRepository<UserEntity>;

/// SeaORM post repository.
pub type SeaOrmPostRepository = SeaOrmRepository<PostEntity>;

/// SeaORM tag repository.
pub type SeaOrmTagRepository = SeaOrmRepository<TagEntity>;

fn map_db_err(err: DbErr) -> RepoError {
    match &err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        _ => {
            let msg = err.to_string();
            if msg.contains("duplicate") || msg.contains("unique") {
                RepoError::Constraint(msg)
            } else {
                RepoError::Query(msg)
            }
        }
    }
}

/// Insert join rows for the given tag ids, skipping ids that do not resolve
/// to an existing tag.
async fn link_tags<C>(conn: &C, post_id: i32, tag_ids: &BTreeSet<i32>) -> Result<(), RepoError>
where
    C: ConnectionTrait,
{
    if tag_ids.is_empty() {
        return Ok(());
    }

    let known = TagEntity::find()
        .filter(tag::Column::Id.is_in(tag_ids.iter().copied()))
        .all(conn)
        .await
        .map_err(map_db_err)?;

    if known.len() < tag_ids.len() {
        tracing::debug!(
            post_id,
            submitted = tag_ids.len(),
            resolved = known.len(),
            "Skipping unknown tag ids"
        );
    }

    let links: Vec<post_tag::ActiveModel> = known
        .into_iter()
        .map(|tag| post_tag::ActiveModel {
            post_id: Set(post_id),
            tag_id: Set(tag.id),
        })
        .collect();

    if !links.is_empty() {
        PostTagEntity::insert_many(links)
            .exec(conn)
            .await
            .map_err(map_db_err)?;
    }

    Ok(())
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, input: NewUser) -> Result<User, RepoError> {
        let model = user::ActiveModel::from(input)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        let found = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(found.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let rows = UserEntity::find()
            .order_by_asc(user::Column::LastName)
            .order_by_asc(user::Column::FirstName)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, input: NewUser) -> Result<User, RepoError> {
        let existing = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active: user::ActiveModel = existing.into();
        active.first_name = Set(input.first_name);
        active.last_name = Set(input.last_name);
        active.image_url = Set(input.image_url);

        let model = active.update(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        // Owned posts and their join rows go with the user via the schema's
        // ON DELETE CASCADE rules.
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn posts_by_user(&self, user_id: i32) -> Result<Vec<Post>, RepoError> {
        let rows = PostEntity::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn create(&self, input: NewPost) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let model = post::ActiveModel::from(&input)
            .insert(&txn)
            .await
            .map_err(map_db_err)?;
        link_tags(&txn, model.id, &input.tag_ids).await?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn find_with_tags(&self, id: i32) -> Result<Option<PostWithTags>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let tags = model
            .find_related(TagEntity)
            .order_by_asc(tag::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(Some(PostWithTags {
            post: model.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }))
    }

    async fn update(&self, id: i32, input: PostUpdate) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active: post::ActiveModel = existing.into();
        active.title = Set(input.title);
        active.content = Set(input.content);
        let model = active.update(&txn).await.map_err(map_db_err)?;

        // Wholesale replace of the tag set.
        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        link_tags(&txn, id, &input.tag_ids).await?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<i32, RepoError> {
        let existing = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;
        let owner_id = existing.user_id;

        // Join rows cascade with the post.
        existing.delete(&self.db).await.map_err(map_db_err)?;

        Ok(owner_id)
    }
}

#[async_trait]
impl TagRepository for SeaOrmTagRepository {
    async fn create(&self, input: NewTag) -> Result<Tag, RepoError> {
        let model = tag::ActiveModel::from(input)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RepoError> {
        let found = TagEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(found.map(Into::into))
    }

    async fn find_with_posts(&self, id: i32) -> Result<Option<TagWithPosts>, RepoError> {
        let Some(model) = TagEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let posts = model
            .find_related(PostEntity)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(Some(TagWithPosts {
            tag: model.into(),
            posts: posts.into_iter().map(Into::into).collect(),
        }))
    }

    async fn list(&self) -> Result<Vec<Tag>, RepoError> {
        let rows = TagEntity::find()
            .order_by_asc(tag::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, input: NewTag) -> Result<Tag, RepoError> {
        let existing = TagEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active: tag::ActiveModel = existing.into();
        active.name = Set(input.name);

        let model = active.update(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        // Join rows cascade with the tag; posts carrying it are untouched.
        let result = TagEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
