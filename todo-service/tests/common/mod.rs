use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::BearerAuthenticator;
use auth::Claims;
use auth::JwtCodec;
use chrono::Utc;
use serde_json::json;
use todo_service::domain::todo::models::Todo;
use todo_service::domain::todo::models::TodoId;
use todo_service::domain::todo::models::TodoTitle;
use todo_service::domain::todo::ports::TodoRepository;
use todo_service::domain::todo::service::TodoService;
use todo_service::domain::user::models::EmailAddress;
use todo_service::domain::user::models::User;
use todo_service::domain::user::models::UserId;
use todo_service::domain::user::models::UserName;
use todo_service::domain::user::ports::UserRepository;
use todo_service::domain::user::service::UserService;
use todo_service::inbound::http::router::create_router;
use todo_service::todo::errors::TodoError;
use todo_service::user::errors::UserError;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-token-signing-32-bytes";
pub const TEST_EXPIRATION_MINUTES: i64 = 60;

/// In-memory fake user store standing in for the Postgres repository.
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(
        &self,
        name: &UserName,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email.as_str() == email.as_str()) {
            return Err(UserError::EmailAlreadyExists(email.as_str().to_string()));
        }

        let user = User {
            id: UserId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            name: name.clone(),
            email: email.clone(),
            password_hash: Some(password_hash.to_string()),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.clone())
    }
}

/// In-memory fake todo store standing in for the Postgres repository.
pub struct InMemoryTodoRepository {
    todos: Mutex<Vec<Todo>>,
    next_id: AtomicI64,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self {
            todos: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Todo>, TodoError> {
        let todos = self.todos.lock().unwrap();
        Ok(todos
            .iter()
            .filter(|t| t.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, user_id: &UserId, title: &TodoTitle) -> Result<Todo, TodoError> {
        let mut todos = self.todos.lock().unwrap();
        let todo = Todo {
            id: TodoId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            user_id: *user_id,
            title: title.clone(),
            completed: false,
            created_at: Utc::now(),
        };
        todos.push(todo.clone());
        Ok(todo)
    }
}

/// Test application that spawns the real router over fake stores
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    codec: JwtCodec,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let user_repository = Arc::new(InMemoryUserRepository::new());
        let todo_repository = Arc::new(InMemoryTodoRepository::new());

        let user_service = Arc::new(UserService::new(user_repository));
        let todo_service = Arc::new(TodoService::new(todo_repository));

        let authenticator = Arc::new(Authenticator::new(TEST_SECRET));
        let bearer = Arc::new(BearerAuthenticator::new(TEST_SECRET));

        let router = create_router(
            user_service,
            todo_service,
            authenticator,
            bearer,
            TEST_EXPIRATION_MINUTES,
        );

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            codec: JwtCodec::new(TEST_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Mint a token exactly as the login flow does
    pub fn token_for(&self, user_id: i64) -> String {
        self.codec
            .sign(&Claims::for_user(user_id, TEST_EXPIRATION_MINUTES))
            .expect("Failed to sign token")
    }

    /// Mint a token whose expiry already passed
    pub fn expired_token_for(&self, user_id: i64) -> String {
        let claims = Claims::new()
            .with_subject(user_id.to_string())
            .with_expiration(Utc::now().timestamp() - 60);
        self.codec.sign(&claims).expect("Failed to sign token")
    }

    /// Register a user and log in, returning the assigned id and a token
    pub async fn register_and_login(&self, name: &str, email: &str, password: &str) -> (i64, String) {
        let response = self
            .post("/api/auth/register")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute register request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        let user_id: i64 = body["data"]["id"]
            .as_str()
            .expect("id missing from register response")
            .parse()
            .expect("id is not numeric");

        let response = self
            .post("/api/auth/login")
            .json(&json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute login request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        let token = body["data"]["token"]
            .as_str()
            .expect("token missing from login response")
            .to_string();

        (user_id, token)
    }
}
