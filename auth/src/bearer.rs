use thiserror::Error;

use crate::jwt::Claims;
use crate::jwt::JwtCodec;

/// Literal scheme prefix. Matching is case-sensitive with a single space;
/// anything else is treated as absent credentials.
const BEARER_PREFIX: &str = "Bearer ";

/// Identity established by a successful bearer-token check.
///
/// Request-scoped: it is attached to one request's extensions and has no
/// lifecycle beyond that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
}

/// Rejection reasons surfaced by the request gate.
///
/// Every token-level failure is collapsed into `InvalidToken`: callers must
/// not be able to tell a bad signature from an expired token. The specific
/// cause is logged for internal observability only.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AuthRejection {
    #[error("Missing bearer token")]
    MissingCredentials,

    #[error("Invalid token")]
    InvalidToken,
}

/// Request gate for `Authorization: Bearer <token>` credentials.
///
/// Pure over its explicit inputs (header value, secret, current time); holds
/// no per-request state, so one instance serves concurrent requests.
pub struct BearerAuthenticator {
    codec: JwtCodec,
}

impl BearerAuthenticator {
    /// Create a gate over the process secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            codec: JwtCodec::new(secret),
        }
    }

    /// Run the gate against a raw `Authorization` header value.
    ///
    /// A missing header or a non-Bearer scheme is rejected before the token
    /// codec is ever consulted. Verified tokens must carry an `exp` claim and
    /// a `sub` claim holding a numeric user id.
    ///
    /// # Errors
    /// * `MissingCredentials` - No header, or not `Bearer `-prefixed
    /// * `InvalidToken` - Codec rejection, or unusable claims
    pub fn authenticate(
        &self,
        authorization: Option<&str>,
    ) -> Result<AuthenticatedUser, AuthRejection> {
        let header = authorization.ok_or(AuthRejection::MissingCredentials)?;
        let token = header
            .strip_prefix(BEARER_PREFIX)
            .ok_or(AuthRejection::MissingCredentials)?;

        let claims = self.codec.verify(token).map_err(|e| {
            tracing::warn!(reason = %e, "Bearer token rejected");
            AuthRejection::InvalidToken
        })?;

        subject_of(&claims).ok_or_else(|| {
            tracing::warn!("Bearer token rejected: unusable claims");
            AuthRejection::InvalidToken
        })
    }
}

/// Extract the authenticated identity from verified claims.
///
/// Requires `exp` to be present: tokens that can never expire do not pass the
/// gate even though the codec accepts them.
fn subject_of(claims: &Claims) -> Option<AuthenticatedUser> {
    claims.exp?;
    let user_id = claims.sub.as_deref()?.parse::<i64>().ok()?;
    Some(AuthenticatedUser { user_id })
}
