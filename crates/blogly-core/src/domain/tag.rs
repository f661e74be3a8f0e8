use serde::{Deserialize, Serialize};

use crate::domain::Post;
use crate::error::DomainError;

/// Tag entity - name is globally unique, case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

/// A tag with the posts carrying it resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagWithPosts {
    pub tag: Tag,
    pub posts: Vec<Post>,
}

/// Validated input for creating or renaming a tag.
#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: String,
}

impl NewTag {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::Validation("tag name must not be empty".to_string()));
        }
        Ok(Self { name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_rejected() {
        assert!(matches!(NewTag::new(""), Err(DomainError::Validation(_))));
        assert!(matches!(NewTag::new("  "), Err(DomainError::Validation(_))));
    }

    #[test]
    fn name_is_kept_as_submitted() {
        let input = NewTag::new("Rust").unwrap();
        assert_eq!(input.name, "Rust");
    }
}
