//! # Blogly Shared
//!
//! Types crossing the HTTP boundary: the payloads submitted by the HTML
//! forms. Kept free of domain logic.

pub mod dto;

pub use dto::{PostForm, TagForm, UserForm};
