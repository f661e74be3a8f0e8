//! Post routes.

use std::collections::BTreeSet;

use actix_web::{HttpResponse, web};

use blogly_core::domain::{NewPost, PostUpdate};
use blogly_shared::dto::PostForm;

use crate::handlers::{html, see_other};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views;

/// GET /users/{id}/posts/new
pub async fn new_form(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {user_id} not found")))?;
    let all_tags = state.tags.list().await?;
    Ok(html(views::new_post_form(&user, &all_tags)))
}

/// POST /users/{id}/posts/new
///
/// One create call with a possibly-empty tag set; the tag multi-select
/// arrives as repeated `tags` pairs.
pub async fn create(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: web::Form<Vec<(String, String)>>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    let form = PostForm::from_pairs(form.into_inner()).map_err(AppError::BadRequest)?;

    let input = NewPost::new(
        user_id,
        form.title,
        Some(form.content),
        BTreeSet::from_iter(form.tags),
    )?;
    state.posts.create(input).await?;

    Ok(see_other(&format!("/users/{user_id}")))
}

/// GET /posts/{id}
pub async fn detail(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let found = state
        .posts
        .find_with_tags(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id} not found")))?;
    Ok(html(views::post_detail(&found)))
}

/// GET /posts/{id}/edit
pub async fn edit_form(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let found = state
        .posts
        .find_with_tags(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id} not found")))?;
    let all_tags = state.tags.list().await?;
    let selected: BTreeSet<i32> = found.tags.iter().map(|tag| tag.id).collect();
    Ok(html(views::edit_post_form(&found.post, &all_tags, &selected)))
}

/// POST /posts/{id}/edit
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: web::Form<Vec<(String, String)>>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = PostForm::from_pairs(form.into_inner()).map_err(AppError::BadRequest)?;

    let input = PostUpdate::new(form.title, Some(form.content), BTreeSet::from_iter(form.tags))?;
    state.posts.update(id, input).await?;

    Ok(see_other(&format!("/posts/{id}")))
}

/// POST /posts/{id}/delete
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let owner_id = state.posts.delete(path.into_inner()).await?;
    Ok(see_other(&format!("/users/{owner_id}")))
}
