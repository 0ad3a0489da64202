use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::todo::ports::TodoRepository;
use crate::user::ports::UserRepository;

/// Middleware gating protected routes on a valid bearer token.
///
/// Runs the bearer gate over the raw `Authorization` header. On success the
/// authenticated user is added to request extensions and the pipeline
/// proceeds; on rejection the pipeline short-circuits with a 401 whose body
/// never distinguishes which token check failed.
pub async fn authenticate<UR, TR>(
    State(state): State<AppState<UR, TR>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response>
where
    UR: UserRepository,
    TR: TodoRepository,
{
    let authorization = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match state.bearer.authenticate(authorization) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(rejection) => {
            tracing::warn!(path = %req.uri().path(), %rejection, "Request rejected at bearer gate");
            Err(ApiError::Unauthorized(rejection.to_string()).into_response())
        }
    }
}
