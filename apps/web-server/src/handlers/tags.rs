//! Tag routes.

use actix_web::{HttpResponse, web};

use blogly_core::domain::NewTag;
use blogly_shared::dto::TagForm;

use crate::handlers::{html, see_other};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views;

/// GET /tags
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tags = state.tags.list().await?;
    Ok(html(views::tag_list(&tags)))
}

/// GET /tags/new
pub async fn new_form() -> HttpResponse {
    html(views::tag_form(None))
}

/// POST /tags/new
pub async fn create(
    state: web::Data<AppState>,
    form: web::Form<TagForm>,
) -> AppResult<HttpResponse> {
    let input = NewTag::new(form.into_inner().name)?;
    state.tags.create(input).await?;
    Ok(see_other("/tags"))
}

/// GET /tags/{id}
pub async fn detail(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let found = state
        .tags
        .find_with_posts(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("tag {id} not found")))?;
    Ok(html(views::tag_detail(&found)))
}

/// GET /tags/{id}/edit
pub async fn edit_form(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let tag = state
        .tags
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("tag {id} not found")))?;
    Ok(html(views::tag_form(Some(&tag))))
}

/// POST /tags/{id}/edit
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: web::Form<TagForm>,
) -> AppResult<HttpResponse> {
    let input = NewTag::new(form.into_inner().name)?;
    state.tags.update(path.into_inner(), input).await?;
    Ok(see_other("/tags"))
}

/// POST /tags/{id}/delete
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    state.tags.delete(path.into_inner()).await?;
    Ok(see_other("/tags"))
}
