use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::ports::TodoRepository;
use crate::domain::user::models::UserId;
use crate::todo::errors::TodoError;

pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw database row; converted to the domain entity at the decode boundary.
#[derive(Debug, FromRow)]
struct TodoRow {
    id: i64,
    user_id: i64,
    title: String,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl TodoRow {
    fn try_into_todo(self) -> Result<Todo, TodoError> {
        Ok(Todo {
            id: TodoId(self.id),
            user_id: UserId(self.user_id),
            title: TodoTitle::new(self.title)?,
            completed: self.completed,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Todo>, TodoError> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, user_id, title, completed, created_at
            FROM todos
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(TodoRow::try_into_todo).collect()
    }

    async fn create(&self, user_id: &UserId, title: &TodoTitle) -> Result<Todo, TodoError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO todos (user_id, title, completed)
            VALUES ($1, $2, FALSE)
            RETURNING id, user_id, title, completed, created_at
            "#,
        )
        .bind(user_id.0)
        .bind(title.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        row.try_into_todo()
    }
}
