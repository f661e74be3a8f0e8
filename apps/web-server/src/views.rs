//! HTML rendering.
//!
//! The presentation layer: receives fully populated domain structures from
//! the handlers and renders them. No domain logic lives here.

use std::collections::BTreeSet;
use std::fmt::Write;

use actix_web::http::StatusCode;

use blogly_core::domain::{Post, PostWithTags, Tag, TagWithPosts, User};

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title} - Blogly</title></head>\n\
         <body>\n<nav><a href=\"/users\">Users</a> | <a href=\"/tags\">Tags</a></nav>\n\
         <h1>{title}</h1>\n{body}\n</body>\n</html>\n",
        title = escape(title),
        body = body,
    )
}

pub fn error_page(status: StatusCode, detail: &str) -> String {
    let title = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    layout(&title, &format!("<p>{}</p>", escape(detail)))
}

pub fn user_list(users: &[User]) -> String {
    let mut body = String::from("<ul>\n");
    for user in users {
        let _ = writeln!(
            body,
            "<li><a href=\"/users/{}\">{}</a></li>",
            user.id,
            escape(&user.full_name())
        );
    }
    body.push_str("</ul>\n<a href=\"/users/new\">Add user</a>");
    layout("Users", &body)
}

pub fn user_form(existing: Option<&User>) -> String {
    let (title, action, first, last, image) = match existing {
        Some(user) => (
            "Edit user",
            format!("/users/{}/edit", user.id),
            user.first_name.as_str(),
            user.last_name.as_str(),
            user.image_url.as_str(),
        ),
        None => ("Add user", "/users/new".to_string(), "", "", ""),
    };

    let body = format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <label>First name <input name=\"first_name\" value=\"{first}\"></label><br>\n\
         <label>Last name <input name=\"last_name\" value=\"{last}\"></label><br>\n\
         <label>Image URL <input name=\"image_url\" value=\"{image}\"></label><br>\n\
         <button type=\"submit\">Save</button>\n</form>",
        action = action,
        first = escape(first),
        last = escape(last),
        image = escape(image),
    );
    layout(title, &body)
}

pub fn user_detail(user: &User, posts: &[Post]) -> String {
    let mut body = format!(
        "<img src=\"{}\" alt=\"avatar\" width=\"100\">\n<h2>Posts</h2>\n<ul>\n",
        escape(&user.image_url)
    );
    for post in posts {
        let _ = writeln!(
            body,
            "<li><a href=\"/posts/{}\">{}</a></li>",
            post.id,
            escape(&post.title)
        );
    }
    let _ = write!(
        body,
        "</ul>\n<a href=\"/users/{id}/posts/new\">Add post</a> | \
         <a href=\"/users/{id}/edit\">Edit</a>\n\
         <form method=\"post\" action=\"/users/{id}/delete\">\
         <button type=\"submit\">Delete</button></form>",
        id = user.id,
    );
    layout(&user.full_name(), &body)
}

fn tag_checkboxes(all_tags: &[Tag], selected: &BTreeSet<i32>) -> String {
    let mut out = String::new();
    for tag in all_tags {
        let checked = if selected.contains(&tag.id) {
            " checked"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "<label><input type=\"checkbox\" name=\"tags\" value=\"{}\"{}> {}</label><br>",
            tag.id,
            checked,
            escape(&tag.name)
        );
    }
    out
}

fn post_form(title: &str, action: &str, post_title: &str, content: &str, checkboxes: &str) -> String {
    let body = format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <label>Title <input name=\"title\" value=\"{post_title}\"></label><br>\n\
         <label>Content <textarea name=\"content\">{content}</textarea></label><br>\n\
         <fieldset><legend>Tags</legend>\n{checkboxes}</fieldset>\n\
         <button type=\"submit\">Save</button>\n</form>",
        action = action,
        post_title = escape(post_title),
        content = escape(content),
        checkboxes = checkboxes,
    );
    layout(title, &body)
}

pub fn new_post_form(user: &User, all_tags: &[Tag]) -> String {
    post_form(
        &format!("Add post for {}", user.full_name()),
        &format!("/users/{}/posts/new", user.id),
        "",
        "",
        &tag_checkboxes(all_tags, &BTreeSet::new()),
    )
}

pub fn edit_post_form(post: &Post, all_tags: &[Tag], selected: &BTreeSet<i32>) -> String {
    post_form(
        "Edit post",
        &format!("/posts/{}/edit", post.id),
        &post.title,
        &post.content,
        &tag_checkboxes(all_tags, selected),
    )
}

pub fn post_detail(found: &PostWithTags) -> String {
    let mut body = format!(
        "<p>{}</p>\n<p><em>Posted {}</em></p>\n<ul>\n",
        escape(&found.post.content),
        found.post.created_at.format("%Y-%m-%d %H:%M"),
    );
    for tag in &found.tags {
        let _ = writeln!(
            body,
            "<li><a href=\"/tags/{}\">{}</a></li>",
            tag.id,
            escape(&tag.name)
        );
    }
    let _ = write!(
        body,
        "</ul>\n<a href=\"/posts/{id}/edit\">Edit</a>\n\
         <form method=\"post\" action=\"/posts/{id}/delete\">\
         <button type=\"submit\">Delete</button></form>",
        id = found.post.id,
    );
    layout(&found.post.title, &body)
}

pub fn tag_list(tags: &[Tag]) -> String {
    let mut body = String::from("<ul>\n");
    for tag in tags {
        let _ = writeln!(
            body,
            "<li><a href=\"/tags/{}\">{}</a></li>",
            tag.id,
            escape(&tag.name)
        );
    }
    body.push_str("</ul>\n<a href=\"/tags/new\">Add tag</a>");
    layout("Tags", &body)
}

pub fn tag_form(existing: Option<&Tag>) -> String {
    let (title, action, name) = match existing {
        Some(tag) => (
            "Edit tag",
            format!("/tags/{}/edit", tag.id),
            tag.name.as_str(),
        ),
        None => ("Add tag", "/tags/new".to_string(), ""),
    };

    let body = format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <label>Name <input name=\"name\" value=\"{name}\"></label><br>\n\
         <button type=\"submit\">Save</button>\n</form>",
        action = action,
        name = escape(name),
    );
    layout(title, &body)
}

pub fn tag_detail(found: &TagWithPosts) -> String {
    let mut body = String::from("<h2>Posts</h2>\n<ul>\n");
    for post in &found.posts {
        let _ = writeln!(
            body,
            "<li><a href=\"/posts/{}\">{}</a></li>",
            post.id,
            escape(&post.title)
        );
    }
    let _ = write!(
        body,
        "</ul>\n<a href=\"/tags/{id}/edit\">Edit</a>\n\
         <form method=\"post\" action=\"/tags/{id}/delete\">\
         <button type=\"submit\">Delete</button></form>",
        id = found.tag.id,
    );
    layout(&found.tag.name, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_user_names() {
        let user = User {
            id: 1,
            first_name: "<script>".to_string(),
            last_name: "Doe".to_string(),
            image_url: "x".to_string(),
        };
        let page = user_list(std::slice::from_ref(&user));
        assert!(page.contains("&lt;script&gt; Doe"));
        assert!(!page.contains("<script> Doe"));
    }

    #[test]
    fn edit_form_marks_selected_tags() {
        let tags = vec![
            Tag { id: 1, name: "a".to_string() },
            Tag { id: 2, name: "b".to_string() },
        ];
        let rendered = tag_checkboxes(&tags, &BTreeSet::from([2]));
        assert!(rendered.contains("value=\"2\" checked"));
        assert!(!rendered.contains("value=\"1\" checked"));
    }
}
