use auth::AuthenticatedUser;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::list_todos::TodoData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::TodoTitle;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;
use crate::todo::errors::TodoTitleError;
use crate::todo::ports::TodoRepository;
use crate::todo::ports::TodoServicePort;
use crate::user::ports::UserRepository;

pub async fn create_todo<UR, TR>(
    State(state): State<AppState<UR, TR>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<CreateTodoRequest>,
) -> Result<ApiSuccess<TodoData>, ApiError>
where
    UR: UserRepository,
    TR: TodoRepository,
{
    let user_id = UserId(user.user_id);
    let command = body.try_into_command()?;

    state
        .todo_service
        .create_todo(&user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::CREATED, todo.into()))
}

/// HTTP request body for creating a todo (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTodoRequest {
    title: String,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateTodoRequestError {
    #[error("Invalid title: {0}")]
    Title(#[from] TodoTitleError),
}

impl CreateTodoRequest {
    fn try_into_command(self) -> Result<CreateTodoCommand, ParseCreateTodoRequestError> {
        let title = TodoTitle::new(self.title)?;
        Ok(CreateTodoCommand::new(title))
    }
}

impl From<ParseCreateTodoRequestError> for ApiError {
    fn from(err: ParseCreateTodoRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
