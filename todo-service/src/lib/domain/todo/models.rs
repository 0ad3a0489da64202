use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::UserId;
use crate::todo::errors::TodoTitleError;

/// Todo item entity.
///
/// Always owned by exactly one user; every read and write is scoped by the
/// owning user id.
#[derive(Debug, Clone)]
pub struct Todo {
    pub id: TodoId,
    pub user_id: UserId,
    pub title: TodoTitle,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Todo unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(pub i64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Todo title value type
///
/// Ensures the title is non-blank and at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    const MAX_LENGTH: usize = 255;

    /// Create a new valid title.
    ///
    /// # Errors
    /// * `Blank` - Title is empty or whitespace only
    /// * `TooLong` - Title longer than 255 characters
    pub fn new(title: String) -> Result<Self, TodoTitleError> {
        if title.trim().is_empty() {
            return Err(TodoTitleError::Blank);
        }
        if title.len() > Self::MAX_LENGTH {
            return Err(TodoTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: title.len(),
            });
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new todo for a user
#[derive(Debug)]
pub struct CreateTodoCommand {
    pub title: TodoTitle,
}

impl CreateTodoCommand {
    pub fn new(title: TodoTitle) -> Self {
        Self { title }
    }
}
