//! End-to-end CRUD flows over the in-memory store.

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};

use blogly_core::domain::{DEFAULT_CONTENT, DEFAULT_IMAGE_URL, NewTag, NewUser};
use blogly_shared::dto::UserForm;
use web_server::handlers::configure_routes;
use web_server::state::AppState;

macro_rules! service {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

fn user_form(first: &str, last: &str, image_url: Option<&str>) -> UserForm {
    UserForm {
        first_name: first.to_string(),
        last_name: last.to_string(),
        image_url: image_url.map(str::to_string),
    }
}

fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[actix_web::test]
async fn created_user_shows_up_on_the_user_list() {
    let state = AppState::in_memory();
    let app = service!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users/new")
            .set_form(user_form("John", "Doe", None))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/users");

    let body = test::call_and_read_body(&app, test::TestRequest::get().uri("/users").to_request())
        .await;
    let page = std::str::from_utf8(&body).unwrap();
    assert!(page.contains("John Doe"));
}

#[actix_web::test]
async fn blank_image_url_is_stored_as_the_placeholder() {
    let state = AppState::in_memory();
    let app = service!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users/new")
            .set_form(user_form("Jane", "Doe", Some("")))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let users = state.users.list().await.unwrap();
    assert_eq!(users[0].image_url, DEFAULT_IMAGE_URL);
}

#[actix_web::test]
async fn missing_required_field_is_a_400() {
    let state = AppState::in_memory();
    let app = service!(state);

    // No first_name at all - extraction fails, not the server.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users/new")
            .insert_header(header::ContentType::form_url_encoded())
            .set_payload("last_name=Doe")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Present but empty - rejected by domain validation.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users/new")
            .set_form(user_form("", "Doe", None))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unknown_ids_are_404() {
    let state = AppState::in_memory();
    let app = service!(state);

    for uri in ["/users/999", "/posts/999", "/tags/999", "/users/999/edit"] {
        let resp =
            test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "GET {uri}");
    }

    let resp = test::call_service(
        &app,
        test::TestRequest::post().uri("/users/999/delete").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn post_lifecycle_follows_the_owner() {
    let state = AppState::in_memory();
    let app = service!(state);

    let user = state
        .users
        .create(NewUser::new("John", "Doe", None).unwrap())
        .await
        .unwrap();
    let tag = state
        .tags
        .create(NewTag::new("rust").unwrap())
        .await
        .unwrap();

    // Add a post with an empty content field and one tag.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/users/{}/posts/new", user.id))
            .set_form([
                ("title", "First Post".to_string()),
                ("content", String::new()),
                ("tags", tag.id.to_string()),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/users/{}", user.id));

    let posts = state.users.posts_by_user(user.id).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].content, DEFAULT_CONTENT);
    let post_id = posts[0].id;

    let body = test::call_and_read_body(
        &app,
        test::TestRequest::get()
            .uri(&format!("/posts/{post_id}"))
            .to_request(),
    )
    .await;
    let page = std::str::from_utf8(&body).unwrap();
    assert!(page.contains("First Post"));
    assert!(page.contains("rust"));

    // Deleting the post redirects to its owner.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{post_id}/delete"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/users/{}", user.id));
}

#[actix_web::test]
async fn deleting_a_user_takes_its_posts_along() {
    let state = AppState::in_memory();
    let app = service!(state);

    let user = state
        .users
        .create(NewUser::new("John", "Doe", None).unwrap())
        .await
        .unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/users/{}/posts/new", user.id))
            .set_form([
                ("title", "Doomed".to_string()),
                ("content", "soon gone".to_string()),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let post_id = state.users.posts_by_user(user.id).await.unwrap()[0].id;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/users/{}/delete", user.id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/posts/{post_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn duplicate_tag_names_are_a_409() {
    let state = AppState::in_memory();
    let app = service!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/tags/new")
            .set_form([("name", "rust")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/tags/new")
            .set_form([("name", "rust")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    assert_eq!(state.tags.list().await.unwrap().len(), 1);
}

#[actix_web::test]
async fn editing_a_post_replaces_its_tags() {
    let state = AppState::in_memory();
    let app = service!(state);

    let user = state
        .users
        .create(NewUser::new("John", "Doe", None).unwrap())
        .await
        .unwrap();
    let old = state.tags.create(NewTag::new("old").unwrap()).await.unwrap();
    let new = state.tags.create(NewTag::new("new").unwrap()).await.unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/users/{}/posts/new", user.id))
            .set_form([
                ("title", "Post".to_string()),
                ("content", "body".to_string()),
                ("tags", old.id.to_string()),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let post_id = state.users.posts_by_user(user.id).await.unwrap()[0].id;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{post_id}/edit"))
            .set_form([
                ("title", "Post".to_string()),
                ("content", "body".to_string()),
                ("tags", new.id.to_string()),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/posts/{post_id}"));

    let found = state.posts.find_with_tags(post_id).await.unwrap().unwrap();
    assert_eq!(found.tags.len(), 1);
    assert_eq!(found.tags[0].id, new.id);
}

#[actix_web::test]
async fn health_endpoint_responds() {
    let state = AppState::in_memory();
    let app = service!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
