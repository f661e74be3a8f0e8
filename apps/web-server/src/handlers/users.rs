//! User routes.

use actix_web::{HttpResponse, web};

use blogly_core::domain::NewUser;
use blogly_shared::dto::UserForm;

use crate::handlers::{html, see_other};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views;

/// GET / - the landing page is the user list.
pub async fn home() -> HttpResponse {
    see_other("/users")
}

/// GET /users
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.users.list().await?;
    Ok(html(views::user_list(&users)))
}

/// GET /users/new
pub async fn new_form() -> HttpResponse {
    html(views::user_form(None))
}

/// POST /users/new
pub async fn create(
    state: web::Data<AppState>,
    form: web::Form<UserForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let input = NewUser::new(form.first_name, form.last_name, form.image_url)?;
    state.users.create(input).await?;
    Ok(see_other("/users"))
}

/// GET /users/{id}
pub async fn detail(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {id} not found")))?;
    let posts = state.users.posts_by_user(id).await?;
    Ok(html(views::user_detail(&user, &posts)))
}

/// GET /users/{id}/edit
pub async fn edit_form(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {id} not found")))?;
    Ok(html(views::user_form(Some(&user))))
}

/// POST /users/{id}/edit
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: web::Form<UserForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let input = NewUser::new(form.first_name, form.last_name, form.image_url)?;
    state.users.update(path.into_inner(), input).await?;
    Ok(see_other("/users"))
}

/// POST /users/{id}/delete
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    state.users.delete(path.into_inner()).await?;
    Ok(see_other("/users"))
}
