use auth::Claims;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::todo::ports::TodoRepository;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

pub async fn login<UR, TR>(
    State(state): State<AppState<UR, TR>>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError>
where
    UR: UserRepository,
    TR: TodoRepository,
{
    tracing::info!(email = %body.email, "Login attempt");

    // Every failure below answers with the same message so a caller cannot
    // probe which emails are registered.
    let user = state
        .user_service
        .get_user_by_email(&body.email)
        .await
        .map_err(|e| match e {
            UserError::NotFoundByEmail(_) => {
                tracing::warn!(email = %body.email, "Login failed: unknown email");
                invalid_credentials()
            }
            _ => ApiError::from(e),
        })?;

    let stored_record = user.password_hash.as_deref().ok_or_else(|| {
        tracing::warn!(user_id = %user.id, "Login failed: account has no password record");
        invalid_credentials()
    })?;

    let claims = Claims::for_user(user.id, state.jwt_expiration_minutes);

    let result = state
        .authenticator
        .authenticate(&body.password, stored_record, &claims)
        .map_err(|e| match e {
            auth::AuthenticationError::InvalidCredentials => {
                tracing::warn!(user_id = %user.id, "Login failed: bad password");
                invalid_credentials()
            }
            auth::AuthenticationError::JwtError(err) => {
                ApiError::InternalServerError(format!("Token generation failed: {}", err))
            }
        })?;

    tracing::info!(user_id = %user.id, "Login success");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            token: result.access_token,
        },
    ))
}

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("invalid credentials".to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
}
