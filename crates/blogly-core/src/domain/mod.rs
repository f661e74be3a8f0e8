//! Domain entities - the core business objects.

mod post;

mod tag;

mod user;

pub use post::{DEFAULT_CONTENT, NewPost, Post, PostUpdate, PostWithTags};
pub use tag::{NewTag, Tag, TagWithPosts};
pub use user::{DEFAULT_IMAGE_URL, NewUser, User};
