//! HTTP handlers and route configuration.

mod health;
mod posts;
mod tags;
mod users;

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, web};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(users::home))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/users")
                .route("", web::get().to(users::list))
                .route("/new", web::get().to(users::new_form))
                .route("/new", web::post().to(users::create))
                .route("/{id}", web::get().to(users::detail))
                .route("/{id}/edit", web::get().to(users::edit_form))
                .route("/{id}/edit", web::post().to(users::update))
                .route("/{id}/delete", web::post().to(users::delete))
                .route("/{id}/posts/new", web::get().to(posts::new_form))
                .route("/{id}/posts/new", web::post().to(posts::create)),
        )
        .service(
            web::scope("/posts")
                .route("/{id}", web::get().to(posts::detail))
                .route("/{id}/edit", web::get().to(posts::edit_form))
                .route("/{id}/edit", web::post().to(posts::update))
                .route("/{id}/delete", web::post().to(posts::delete)),
        )
        .service(
            web::scope("/tags")
                .route("", web::get().to(tags::list))
                .route("/new", web::get().to(tags::new_form))
                .route("/new", web::post().to(tags::create))
                .route("/{id}", web::get().to(tags::detail))
                .route("/{id}/edit", web::get().to(tags::edit_form))
                .route("/{id}/edit", web::post().to(tags::update))
                .route("/{id}/delete", web::post().to(tags::delete)),
        );
}

/// 200 with an HTML body.
pub(crate) fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

/// 303 redirect - every state-mutating route ends here.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}
