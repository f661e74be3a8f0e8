use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Placeholder avatar applied when a user is created without an image URL.
pub const DEFAULT_IMAGE_URL: &str = "https://www.freeiconspng.com/uploads/icon-user-blue-symbol-people-person-generic--public-domain--21.png";

/// User entity - owns zero or more posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub image_url: String,
}

impl User {
    /// Display name derived from the two name fields.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Validated input for creating or updating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub image_url: String,
}

impl NewUser {
    /// Build validated input. An empty or absent image URL resolves to the
    /// default placeholder.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        image_url: Option<String>,
    ) -> Result<Self, DomainError> {
        let first_name = first_name.into();
        let last_name = last_name.into();

        if first_name.trim().is_empty() {
            return Err(DomainError::Validation(
                "first name must not be empty".to_string(),
            ));
        }
        if last_name.trim().is_empty() {
            return Err(DomainError::Validation(
                "last name must not be empty".to_string(),
            ));
        }

        let image_url = match image_url {
            Some(url) if !url.trim().is_empty() => url,
            _ => DEFAULT_IMAGE_URL.to_string(),
        };

        Ok(Self {
            first_name,
            last_name,
            image_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_joins_first_and_last() {
        let user = User {
            id: 1,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
        };
        assert_eq!(user.full_name(), "John Doe");
    }

    #[test]
    fn missing_image_url_falls_back_to_placeholder() {
        let input = NewUser::new("Jane", "Doe", None).unwrap();
        assert_eq!(input.image_url, DEFAULT_IMAGE_URL);

        let input = NewUser::new("Jane", "Doe", Some("".to_string())).unwrap();
        assert_eq!(input.image_url, DEFAULT_IMAGE_URL);
    }

    #[test]
    fn explicit_image_url_is_kept() {
        let input = NewUser::new("Jane", "Doe", Some("https://example.com/a.png".to_string()))
            .unwrap();
        assert_eq!(input.image_url, "https://example.com/a.png");
    }

    #[test]
    fn empty_names_are_rejected() {
        assert!(matches!(
            NewUser::new("", "Doe", None),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            NewUser::new("John", "  ", None),
            Err(DomainError::Validation(_))
        ));
    }
}
