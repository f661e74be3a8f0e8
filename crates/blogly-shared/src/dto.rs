//! Form payloads submitted by the HTML forms.

use serde::{Deserialize, Serialize};

/// Fields of the user create/edit form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Fields of the tag create/edit form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagForm {
    pub name: String,
}

/// Fields of the post create/edit form.
///
/// The tag multi-select submits one `tags` pair per checked box, which plain
/// struct deserialization cannot express, so this is decoded from the raw
/// urlencoded pair list instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub tags: Vec<i32>,
}

impl PostForm {
    /// Decode an urlencoded pair list. Missing required fields and
    /// non-numeric tag ids are reported as errors; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, String> {
        let mut title = None;
        let mut content = None;
        let mut tags = Vec::new();

        for (key, value) in pairs {
            match key.as_str() {
                "title" => title = Some(value),
                "content" => content = Some(value),
                "tags" => {
                    let id = value
                        .parse::<i32>()
                        .map_err(|_| format!("invalid tag id: {value}"))?;
                    tags.push(id);
                }
                _ => {}
            }
        }

        Ok(Self {
            title: title.ok_or_else(|| "missing field: title".to_string())?,
            content: content.ok_or_else(|| "missing field: content".to_string())?,
            tags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn decodes_repeated_tag_keys() {
        let form = PostForm::from_pairs(pairs(&[
            ("title", "First Post"),
            ("content", "hello"),
            ("tags", "1"),
            ("tags", "3"),
        ]))
        .unwrap();

        assert_eq!(form.title, "First Post");
        assert_eq!(form.tags, [1, 3]);
    }

    #[test]
    fn missing_title_is_an_error() {
        let err = PostForm::from_pairs(pairs(&[("content", "hello")])).unwrap_err();
        assert!(err.contains("title"));
    }

    #[test]
    fn non_numeric_tag_id_is_an_error() {
        let err = PostForm::from_pairs(pairs(&[
            ("title", "t"),
            ("content", "c"),
            ("tags", "abc"),
        ]))
        .unwrap_err();
        assert!(err.contains("invalid tag id"));
    }
}
