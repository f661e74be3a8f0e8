use async_trait::async_trait;

use crate::domain::{NewPost, NewTag, NewUser, Post, PostUpdate, PostWithTags, Tag, TagWithPosts, User};
use crate::error::RepoError;

/// User repository. Relations are reached through explicit queries
/// (`posts_by_user`), never implicit traversal.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, input: NewUser) -> Result<User, RepoError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError>;

    /// All users ordered by (last_name, first_name) ascending.
    async fn list(&self) -> Result<Vec<User>, RepoError>;

    async fn update(&self, id: i32, input: NewUser) -> Result<User, RepoError>;

    /// Deletes the user together with the owned posts and their tag links.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;

    async fn posts_by_user(&self, user_id: i32) -> Result<Vec<Post>, RepoError>;
}

/// Post repository. Every write is atomic: the post row and its tag links
/// land together or not at all.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Creates the post and links the given tag ids, skipping ids that do
    /// not resolve to an existing tag.
    async fn create(&self, input: NewPost) -> Result<Post, RepoError>;

    async fn find_with_tags(&self, id: i32) -> Result<Option<PostWithTags>, RepoError>;

    /// Updates title/content and replaces the tag set wholesale with the
    /// submitted one.
    async fn update(&self, id: i32, input: PostUpdate) -> Result<Post, RepoError>;

    /// Removes the post and its tag links; returns the owning user's id.
    async fn delete(&self, id: i32) -> Result<i32, RepoError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Fails with `RepoError::Constraint` when the name is already taken.
    async fn create(&self, input: NewTag) -> Result<Tag, RepoError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RepoError>;

    async fn find_with_posts(&self, id: i32) -> Result<Option<TagWithPosts>, RepoError>;

    /// All tags in insertion (id) order.
    async fn list(&self) -> Result<Vec<Tag>, RepoError>;

    async fn update(&self, id: i32, input: NewTag) -> Result<Tag, RepoError>;

    /// Removes the tag and its links; posts carrying the tag are untouched.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}
