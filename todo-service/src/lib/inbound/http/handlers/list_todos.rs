use auth::AuthenticatedUser;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::todo::models::Todo;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;
use crate::todo::ports::TodoRepository;
use crate::todo::ports::TodoServicePort;
use crate::user::ports::UserRepository;

pub async fn list_todos<UR, TR>(
    State(state): State<AppState<UR, TR>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<TodoData>>, ApiError>
where
    UR: UserRepository,
    TR: TodoRepository,
{
    let user_id = UserId(user.user_id);

    state
        .todo_service
        .list_todos(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|todos| {
            ApiSuccess::new(StatusCode::OK, todos.iter().map(TodoData::from).collect())
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoData {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Todo> for TodoData {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            user_id: todo.user_id.to_string(),
            title: todo.title.as_str().to_string(),
            completed: todo.completed,
            created_at: todo.created_at,
        }
    }
}
