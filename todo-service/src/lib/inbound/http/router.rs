use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::BearerAuthenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_todo::create_todo;
use super::handlers::get_user::get_user;
use super::handlers::health::health;
use super::handlers::health::ping;
use super::handlers::list_todos::list_todos;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::todo::service::TodoService;
use crate::domain::user::service::UserService;
use crate::todo::ports::TodoRepository;
use crate::user::ports::UserRepository;

/// Shared application state, generic over the repository implementations so
/// integration tests can swap in a fake store.
pub struct AppState<UR, TR>
where
    UR: UserRepository,
    TR: TodoRepository,
{
    pub user_service: Arc<UserService<UR>>,
    pub todo_service: Arc<TodoService<TR>>,
    pub authenticator: Arc<Authenticator>,
    pub bearer: Arc<BearerAuthenticator>,
    pub jwt_expiration_minutes: i64,
}

// Manual Clone: the repositories themselves need not be Clone, only the Arcs.
impl<UR, TR> Clone for AppState<UR, TR>
where
    UR: UserRepository,
    TR: TodoRepository,
{
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            todo_service: Arc::clone(&self.todo_service),
            authenticator: Arc::clone(&self.authenticator),
            bearer: Arc::clone(&self.bearer),
            jwt_expiration_minutes: self.jwt_expiration_minutes,
        }
    }
}

pub fn create_router<UR, TR>(
    user_service: Arc<UserService<UR>>,
    todo_service: Arc<TodoService<TR>>,
    authenticator: Arc<Authenticator>,
    bearer: Arc<BearerAuthenticator>,
    jwt_expiration_minutes: i64,
) -> Router
where
    UR: UserRepository,
    TR: TodoRepository,
{
    let state = AppState {
        user_service,
        todo_service,
        authenticator,
        bearer,
        jwt_expiration_minutes,
    };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/ping", get(ping))
        .route("/api/auth/register", post(register::<UR, TR>))
        .route("/api/auth/login", post(login::<UR, TR>))
        .route("/api/users", get(list_users::<UR, TR>))
        .route("/api/users/:user_id", get(get_user::<UR, TR>));

    let protected_routes = Router::new()
        .route(
            "/api/todos",
            get(list_todos::<UR, TR>).post(create_todo::<UR, TR>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<UR, TR>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
