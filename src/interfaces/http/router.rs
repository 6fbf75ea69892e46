//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::FromRef, routing::get, Router};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::{Comment, Message, Post, User, UserRole};
use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
use crate::interfaces::http::common::{ApiResponse, CursorDto, PageResponse};

use super::modules::{comments, health, messages, posts, users};

/// Shared state of the whole router.
/// Axum extracts each module's handler state via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub repos: SeaOrmRepositoryProvider,
    pub started_at: Arc<Instant>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, repos: SeaOrmRepositoryProvider) -> Self {
        Self {
            db,
            repos,
            started_at: Arc::new(Instant::now()),
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<AppState> for posts::PostHandlerState {
    fn from_ref(s: &AppState) -> Self {
        posts::PostHandlerState {
            posts: s.repos.posts(),
        }
    }
}

impl FromRef<AppState> for comments::CommentHandlerState {
    fn from_ref(s: &AppState) -> Self {
        comments::CommentHandlerState {
            comments: s.repos.comments(),
        }
    }
}

impl FromRef<AppState> for users::UserHandlerState {
    fn from_ref(s: &AppState) -> Self {
        users::UserHandlerState {
            users: s.repos.users(),
        }
    }
}

impl FromRef<AppState> for messages::MessageHandlerState {
    fn from_ref(s: &AppState) -> Self {
        messages::MessageHandlerState {
            messages: s.repos.messages(),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Posts
        posts::list_posts,
        posts::get_post,
        posts::create_post,
        posts::update_post,
        posts::delete_post,
        // Comments
        comments::list_comments,
        comments::get_comment,
        comments::create_comment,
        comments::update_comment,
        comments::delete_comment,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        // Messages
        messages::list_messages,
        messages::create_message,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            CursorDto,
            PageResponse<Post>,
            PageResponse<Comment>,
            PageResponse<User>,
            PageResponse<Message>,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
            // Resources
            Post,
            Comment,
            User,
            UserRole,
            Message,
            // Requests
            posts::CreatePostRequest,
            posts::UpdatePostRequest,
            comments::CreateCommentRequest,
            comments::UpdateCommentRequest,
            users::CreateUserRequest,
            messages::CreateMessageRequest,
        )
    ),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Posts", description = "Posts with filterable, cursor or offset paginated listing"),
        (name = "Comments", description = "Comments of a post"),
        (name = "Users", description = "User accounts"),
        (name = "Messages", description = "Chat message history"),
    ),
    info(
        title = "Blog Service API",
        version = "1.0.0",
        description = "Posts, comments, users and chat messages. List endpoints accept \
                       `where__<field>[__<operator>]`, `order__<field>`, `take` and `page`.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let post_routes = Router::new()
        .route("/", get(posts::list_posts).post(posts::create_post))
        .route(
            "/{post_id}",
            get(posts::get_post)
                .patch(posts::update_post)
                .delete(posts::delete_post),
        )
        .route(
            "/{post_id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/{post_id}/comments/{comment_id}",
            get(comments::get_comment)
                .patch(comments::update_comment)
                .delete(comments::delete_comment),
        );

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/{id}", get(users::get_user));

    let chat_routes = Router::new().route(
        "/{chat_id}/messages",
        get(messages::list_messages).post(messages::create_message),
    );

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .nest("/posts", post_routes)
        .nest("/users", user_routes)
        .nest("/chats", chat_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::infrastructure::crypto::PasswordHasher;
    use crate::infrastructure::database::test_support::setup_db;
    use crate::shared::pagination::PaginationConfig;
    use crate::shared::Paginator;

    async fn app() -> Router {
        let db = setup_db().await;
        let paginator = Arc::new(Paginator::new(PaginationConfig::default()).unwrap());
        let repos = SeaOrmRepositoryProvider::new(db.clone(), paginator, PasswordHasher::new(4));
        create_api_router(AppState::new(db, repos))
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };
        let resp = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn seed_author(app: &Router) -> i64 {
        let (status, body) = call(
            app,
            "POST",
            "/users",
            Some(json!({"nickname": "writer", "email": "writer@example.com", "password": "pw123"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["data"]["id"].as_i64().unwrap()
    }

    async fn seed_post(app: &Router, author_id: i64, title: &str) -> i64 {
        let (status, body) = call(
            app,
            "POST",
            "/posts",
            Some(json!({"authorId": author_id, "title": title, "content": "body"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["data"]["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn health_reports_database_ok() {
        let app = app().await;
        let (status, body) = call(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"]["status"], "ok");
    }

    #[tokio::test]
    async fn post_listing_follows_next_links() {
        let app = app().await;
        let author = seed_author(&app).await;
        for title in ["one", "two", "three"] {
            seed_post(&app, author, title).await;
        }

        let (status, page) = call(&app, "GET", "/posts?take=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["count"], 2);
        assert_eq!(page["cursor"]["after"], 2);
        assert!(page.get("total").is_none());
        let next = page["next"].as_str().unwrap();
        assert_eq!(
            next,
            "http://localhost:3000/posts?take=2&order__createdAt=ASC&where__id__more_than=2"
        );

        let path = next.trim_start_matches("http://localhost:3000");
        let (_, page) = call(&app, "GET", path, None).await;
        assert_eq!(page["count"], 1);
        assert_eq!(page["data"][0]["title"], "three");
        assert_eq!(page["next"], Value::Null);
        assert_eq!(page["cursor"]["after"], Value::Null);
    }

    #[tokio::test]
    async fn offset_listing_reports_total() {
        let app = app().await;
        let author = seed_author(&app).await;
        for title in ["a", "b", "c"] {
            seed_post(&app, author, title).await;
        }

        let (status, page) = call(&app, "GET", "/posts?page=2&take=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["total"], 3);
        assert_eq!(page["count"], 1);
        assert_eq!(page["data"][0]["title"], "c");
    }

    #[tokio::test]
    async fn bad_query_parameters_are_client_errors() {
        let app = app().await;
        for uri in [
            "/posts?foo=bar",
            "/posts?where__id__bogus=1",
            "/posts?where__secret=1",
            "/posts?order__createdAt=sideways",
            "/posts?take=0",
            "/posts?take=1000",
        ] {
            let (status, body) = call(&app, "GET", uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}: {}", uri, body);
            assert_eq!(body["success"], false);
        }
    }

    #[tokio::test]
    async fn post_crud_round_trip() {
        let app = app().await;
        let author = seed_author(&app).await;
        let id = seed_post(&app, author, "draft").await;

        let (status, body) = call(
            &app,
            "PATCH",
            &format!("/posts/{}", id),
            Some(json!({"title": "final"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["title"], "final");
        assert_eq!(body["data"]["content"], "body");

        let (status, _) = call(&app, "DELETE", &format!("/posts/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = call(&app, "GET", &format!("/posts/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn invalid_bodies_are_rejected() {
        let app = app().await;
        let author = seed_author(&app).await;

        let (status, _) = call(
            &app,
            "POST",
            "/posts",
            Some(json!({"authorId": author, "title": "", "content": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = call(
            &app,
            "POST",
            "/users",
            Some(json!({"nickname": "n", "email": "not-an-email", "password": "pw123"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn duplicate_user_conflicts_and_hash_is_hidden() {
        let app = app().await;
        let id = seed_author(&app).await;

        let (status, body) = call(&app, "GET", &format!("/users/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].get("passwordHash").is_none());
        assert_eq!(body["data"]["role"], "user");

        let (status, _) = call(
            &app,
            "POST",
            "/users",
            Some(json!({"nickname": "writer", "email": "new@example.com", "password": "pw123"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn comments_are_listed_under_their_post() {
        let app = app().await;
        let author = seed_author(&app).await;
        let post_id = seed_post(&app, author, "discussed").await;

        for text in ["first!", "second"] {
            let (status, _) = call(
                &app,
                "POST",
                &format!("/posts/{}/comments", post_id),
                Some(json!({"authorId": author, "comment": text})),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, post) = call(&app, "GET", &format!("/posts/{}", post_id), None).await;
        assert_eq!(post["data"]["commentCount"], 2);

        let (status, page) = call(
            &app,
            "GET",
            &format!("/posts/{}/comments?take=1&order__createdAt=DESC", post_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["data"][0]["comment"], "second");
        let next = page["next"].as_str().unwrap();
        assert!(
            next.starts_with(&format!("http://localhost:3000/posts/{}/comments?", post_id)),
            "{}",
            next
        );
        assert!(next.ends_with("where__id__less_than=2"), "{}", next);

        let (status, _) = call(&app, "GET", "/posts/999/comments", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn chat_messages_round_trip() {
        let app = app().await;
        let author = seed_author(&app).await;

        let (status, _) = call(
            &app,
            "POST",
            "/chats/5/messages",
            Some(json!({"authorId": author, "message": "hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, page) = call(&app, "GET", "/chats/5/messages", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["count"], 1);
        assert_eq!(page["data"][0]["chatId"], 5);

        let (_, other) = call(&app, "GET", "/chats/6/messages", None).await;
        assert_eq!(other["count"], 0);
    }

    #[test]
    fn openapi_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/posts",
            "/posts/{post_id}",
            "/posts/{post_id}/comments",
            "/posts/{post_id}/comments/{comment_id}",
            "/users",
            "/users/{id}",
            "/chats/{chat_id}/messages",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{}", path);
        }
    }
}
