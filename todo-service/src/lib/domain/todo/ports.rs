use async_trait::async_trait;

use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoTitle;
use crate::domain::user::models::UserId;
use crate::todo::errors::TodoError;

/// Port for todo domain service operations.
#[async_trait]
pub trait TodoServicePort: Send + Sync + 'static {
    /// List a user's todos, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_todos(&self, user_id: &UserId) -> Result<Vec<Todo>, TodoError>;

    /// Create a new todo owned by the given user.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_todo(
        &self,
        user_id: &UserId,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError>;
}

/// Persistence operations for todo items, always scoped by owner.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// Retrieve all todos owned by a user, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Todo>, TodoError>;

    /// Persist a new, uncompleted todo and return it with its assigned id.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user_id: &UserId, title: &TodoTitle) -> Result<Todo, TodoError>;
}
