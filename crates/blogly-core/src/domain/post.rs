use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Tag;
use crate::error::DomainError;

/// Placeholder body applied when a post is submitted without content.
pub const DEFAULT_CONTENT: &str = "No Content";

/// Post entity - owned by exactly one user, tagged through the join table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub content: String,
    /// Set once at creation time, never updated.
    pub created_at: DateTime<Utc>,
}

/// A post with its tag set resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithTags {
    pub post: Post,
    pub tags: Vec<Tag>,
}

/// Validated input for creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: i32,
    pub title: String,
    pub content: String,
    pub tag_ids: BTreeSet<i32>,
}

impl NewPost {
    pub fn new(
        user_id: i32,
        title: impl Into<String>,
        content: Option<String>,
        tag_ids: BTreeSet<i32>,
    ) -> Result<Self, DomainError> {
        let (title, content) = validate_fields(title.into(), content)?;
        Ok(Self {
            user_id,
            title,
            content,
            tag_ids,
        })
    }
}

/// Validated input for updating a post. The tag set replaces the existing
/// one wholesale.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub title: String,
    pub content: String,
    pub tag_ids: BTreeSet<i32>,
}

impl PostUpdate {
    pub fn new(
        title: impl Into<String>,
        content: Option<String>,
        tag_ids: BTreeSet<i32>,
    ) -> Result<Self, DomainError> {
        let (title, content) = validate_fields(title.into(), content)?;
        Ok(Self {
            title,
            content,
            tag_ids,
        })
    }
}

// Shared by create and update so the content default is one rule.
fn validate_fields(
    title: String,
    content: Option<String>,
) -> Result<(String, String), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::Validation("title must not be empty".to_string()));
    }
    let content = match content {
        Some(text) if !text.trim().is_empty() => text,
        _ => DEFAULT_CONTENT.to_string(),
    };
    Ok((title, content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_defaults_on_create() {
        let input = NewPost::new(1, "First Post", Some("".to_string()), BTreeSet::new()).unwrap();
        assert_eq!(input.content, DEFAULT_CONTENT);

        let input = NewPost::new(1, "First Post", None, BTreeSet::new()).unwrap();
        assert_eq!(input.content, DEFAULT_CONTENT);
    }

    #[test]
    fn empty_content_defaults_on_update() {
        let input = PostUpdate::new("Edited", Some(" ".to_string()), BTreeSet::new()).unwrap();
        assert_eq!(input.content, DEFAULT_CONTENT);
    }

    #[test]
    fn provided_content_is_kept() {
        let input = NewPost::new(1, "First Post", Some("hello".to_string()), BTreeSet::new())
            .unwrap();
        assert_eq!(input.content, "hello");
    }

    #[test]
    fn empty_title_is_rejected() {
        assert!(matches!(
            NewPost::new(1, "", None, BTreeSet::new()),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            PostUpdate::new("   ", None, BTreeSet::new()),
            Err(DomainError::Validation(_))
        ));
    }
}
