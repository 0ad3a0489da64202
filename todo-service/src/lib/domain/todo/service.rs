use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::Todo;
use crate::domain::user::models::UserId;
use crate::todo::errors::TodoError;
use crate::todo::ports::TodoRepository;
use crate::todo::ports::TodoServicePort;

/// Domain service implementation for todo operations.
pub struct TodoService<TR>
where
    TR: TodoRepository,
{
    repository: Arc<TR>,
}

impl<TR> TodoService<TR>
where
    TR: TodoRepository,
{
    /// Create a new todo service with an injected repository.
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TodoServicePort for TodoService<TR>
where
    TR: TodoRepository,
{
    async fn list_todos(&self, user_id: &UserId) -> Result<Vec<Todo>, TodoError> {
        let todos = self.repository.list_by_user(user_id).await?;
        tracing::debug!(user_id = %user_id, count = todos.len(), "Todos listed");
        Ok(todos)
    }

    async fn create_todo(
        &self,
        user_id: &UserId,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let todo = self.repository.create(user_id, &command.title).await?;
        tracing::info!(user_id = %user_id, todo_id = %todo.id, "Todo created");
        Ok(todo)
    }
}
