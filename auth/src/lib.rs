//! Authentication utilities library
//!
//! Provides stateless authentication infrastructure for services:
//! - Password hashing (Argon2id)
//! - Compact signed token generation and validation (HMAC-SHA256)
//! - Bearer-token request gating
//!
//! The signing secret is injected at construction everywhere; nothing in this
//! crate reads ambient state, so every component is safe to call concurrently
//! and trivial to test.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let record = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &record));
//! ```
//!
//! ## Signed Tokens
//! ```
//! use auth::{Claims, JwtCodec};
//!
//! let codec = JwtCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_user(42, 60);
//! let token = codec.sign(&claims).unwrap();
//! let decoded = codec.verify(&token).unwrap();
//! assert_eq!(decoded.sub.as_deref(), Some("42"));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, BearerAuthenticator, Claims};
//!
//! let secret = b"secret_key_at_least_32_bytes_long!";
//! let auth = Authenticator::new(secret);
//!
//! // Register: hash password
//! let record = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and mint a token
//! let claims = Claims::for_user(42, 60);
//! let result = auth.authenticate("password123", &record, &claims).unwrap();
//!
//! // Gate a request carrying the token
//! let gate = BearerAuthenticator::new(secret);
//! let header = format!("Bearer {}", result.access_token);
//! let user = gate.authenticate(Some(&header)).unwrap();
//! assert_eq!(user.user_id, 42);
//! ```

pub mod authenticator;
pub mod bearer;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use bearer::AuthRejection;
pub use bearer::AuthenticatedUser;
pub use bearer::BearerAuthenticator;
pub use jwt::Claims;
pub use jwt::JwtCodec;
pub use jwt::JwtError;
pub use password::PasswordError;
pub use password::PasswordHasher;
