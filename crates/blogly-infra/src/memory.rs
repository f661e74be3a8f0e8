//! In-memory repository implementations.
//!
//! Used as the fallback when no database is configured and as the test
//! double for the HTTP layer. All three repositories share one store behind
//! a single async lock so the cross-table rules (cascade on user delete,
//! tag-name uniqueness, join-row cleanup) hold exactly as they do in the
//! relational schema. Note: data is lost on process restart.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use blogly_core::domain::{
    NewPost, NewTag, NewUser, Post, PostUpdate, PostWithTags, Tag, TagWithPosts, User,
};
use blogly_core::error::RepoError;
use blogly_core::ports::{PostRepository, TagRepository, UserRepository};

#[derive(Debug, Default)]
struct Store {
    users: BTreeMap<i32, User>,
    posts: BTreeMap<i32, Post>,
    tags: BTreeMap<i32, Tag>,
    post_tags: BTreeSet<(i32, i32)>,
    next_user_id: i32,
    next_post_id: i32,
    next_tag_id: i32,
}

fn bump(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

/// Shared handle to the in-memory store. Clone it once per repository.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Store>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// In-memory user repository.
pub struct MemoryUserRepository {
    store: MemoryStore,
}

impl MemoryUserRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

/// In-memory post repository.
pub struct MemoryPostRepository {
    store: MemoryStore,
}

impl MemoryPostRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

/// In-memory tag repository.
pub struct MemoryTagRepository {
    store: MemoryStore,
}

impl MemoryTagRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, input: NewUser) -> Result<User, RepoError> {
        let mut store = self.store.inner.write().await;
        let id = bump(&mut store.next_user_id);
        let user = User {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
            image_url: input.image_url,
        };
        store.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        let store = self.store.inner.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let store = self.store.inner.read().await;
        let mut users: Vec<User> = store.users.values().cloned().collect();
        users.sort_by(|a, b| {
            (a.last_name.as_str(), a.first_name.as_str())
                .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
        });
        Ok(users)
    }

    async fn update(&self, id: i32, input: NewUser) -> Result<User, RepoError> {
        let mut store = self.store.inner.write().await;
        let user = store.users.get_mut(&id).ok_or(RepoError::NotFound)?;
        user.first_name = input.first_name;
        user.last_name = input.last_name;
        user.image_url = input.image_url;
        Ok(user.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut store = self.store.inner.write().await;
        if store.users.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }

        // Cascade: owned posts and their join rows go with the user.
        let owned: BTreeSet<i32> = store
            .posts
            .values()
            .filter(|post| post.user_id == id)
            .map(|post| post.id)
            .collect();
        store.posts.retain(|post_id, _| !owned.contains(post_id));
        store
            .post_tags
            .retain(|(post_id, _)| !owned.contains(post_id));

        Ok(())
    }

    async fn posts_by_user(&self, user_id: i32) -> Result<Vec<Post>, RepoError> {
        let store = self.store.inner.read().await;
        Ok(store
            .posts
            .values()
            .filter(|post| post.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn create(&self, input: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.inner.write().await;
        if !store.users.contains_key(&input.user_id) {
            return Err(RepoError::Constraint(format!(
                "post references missing user {}",
                input.user_id
            )));
        }

        let id = bump(&mut store.next_post_id);
        let post = Post {
            id,
            user_id: input.user_id,
            title: input.title,
            content: input.content,
            created_at: Utc::now(),
        };
        store.posts.insert(id, post.clone());

        // Unknown tag ids are skipped rather than rejected.
        let links: Vec<(i32, i32)> = input
            .tag_ids
            .iter()
            .filter(|tag_id| store.tags.contains_key(tag_id))
            .map(|tag_id| (id, *tag_id))
            .collect();
        store.post_tags.extend(links);

        Ok(post)
    }

    async fn find_with_tags(&self, id: i32) -> Result<Option<PostWithTags>, RepoError> {
        let store = self.store.inner.read().await;
        let Some(post) = store.posts.get(&id).cloned() else {
            return Ok(None);
        };

        let tags = store
            .post_tags
            .iter()
            .filter(|(post_id, _)| *post_id == id)
            .filter_map(|(_, tag_id)| store.tags.get(tag_id).cloned())
            .collect();

        Ok(Some(PostWithTags { post, tags }))
    }

    async fn update(&self, id: i32, input: PostUpdate) -> Result<Post, RepoError> {
        let mut store = self.store.inner.write().await;
        let post = store.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.title = input.title;
        post.content = input.content;
        let updated = post.clone();

        // Wholesale replace of the tag set.
        store.post_tags.retain(|(post_id, _)| *post_id != id);
        let links: Vec<(i32, i32)> = input
            .tag_ids
            .iter()
            .filter(|tag_id| store.tags.contains_key(tag_id))
            .map(|tag_id| (id, *tag_id))
            .collect();
        store.post_tags.extend(links);

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<i32, RepoError> {
        let mut store = self.store.inner.write().await;
        let post = store.posts.remove(&id).ok_or(RepoError::NotFound)?;
        store.post_tags.retain(|(post_id, _)| *post_id != id);
        Ok(post.user_id)
    }
}

#[async_trait]
impl TagRepository for MemoryTagRepository {
    async fn create(&self, input: NewTag) -> Result<Tag, RepoError> {
        let mut store = self.store.inner.write().await;
        if store.tags.values().any(|tag| tag.name == input.name) {
            return Err(RepoError::Constraint(format!(
                "tag name '{}' already exists",
                input.name
            )));
        }

        let id = bump(&mut store.next_tag_id);
        let tag = Tag {
            id,
            name: input.name,
        };
        store.tags.insert(id, tag.clone());
        Ok(tag)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RepoError> {
        let store = self.store.inner.read().await;
        Ok(store.tags.get(&id).cloned())
    }

    async fn find_with_posts(&self, id: i32) -> Result<Option<TagWithPosts>, RepoError> {
        let store = self.store.inner.read().await;
        let Some(tag) = store.tags.get(&id).cloned() else {
            return Ok(None);
        };

        let posts = store
            .post_tags
            .iter()
            .filter(|(_, tag_id)| *tag_id == id)
            .filter_map(|(post_id, _)| store.posts.get(post_id).cloned())
            .collect();

        Ok(Some(TagWithPosts { tag, posts }))
    }

    async fn list(&self) -> Result<Vec<Tag>, RepoError> {
        let store = self.store.inner.read().await;
        Ok(store.tags.values().cloned().collect())
    }

    async fn update(&self, id: i32, input: NewTag) -> Result<Tag, RepoError> {
        let mut store = self.store.inner.write().await;
        if store
            .tags
            .values()
            .any(|tag| tag.id != id && tag.name == input.name)
        {
            return Err(RepoError::Constraint(format!(
                "tag name '{}' already exists",
                input.name
            )));
        }

        let tag = store.tags.get_mut(&id).ok_or(RepoError::NotFound)?;
        tag.name = input.name;
        Ok(tag.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut store = self.store.inner.write().await;
        if store.tags.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        store.post_tags.retain(|(_, tag_id)| *tag_id != id);
        Ok(())
    }
}
