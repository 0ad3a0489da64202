use std::collections::HashMap;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried in a token payload.
///
/// `sub` and `exp` are the claims this system relies on. Any further claims a
/// caller adds travel opaquely through the flattened `extra` map and survive a
/// sign/verify round trip unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user identifier, serialized as a string)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp, seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Additional custom fields (flattened into the payload)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for an authenticated user with automatic expiration.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier, stored in `sub` as a string
    /// * `expiration_minutes` - Minutes until the token expires
    pub fn for_user(user_id: impl ToString, expiration_minutes: i64) -> Self {
        let expiration = Utc::now() + Duration::minutes(expiration_minutes);

        Self {
            sub: Some(user_id.to_string()),
            exp: Some(expiration.timestamp()),
            extra: HashMap::new(),
        }
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp, seconds).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Add a custom claim.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Check whether the claims are expired at the given instant.
    ///
    /// A token whose `exp` equals the current instant counts as expired;
    /// claims without `exp` never expire here (the request gate separately
    /// requires `exp` to be present).
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| exp <= current_timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new().with_subject("42");
        assert_eq!(claims.sub, Some("42".to_string()));
        assert!(claims.exp.is_none());
    }

    #[test]
    fn test_for_user() {
        let claims = Claims::for_user(42, 60);

        assert_eq!(claims.sub, Some("42".to_string()));
        assert!(claims.exp.is_some());

        let exp = claims.exp.unwrap();
        let now = Utc::now().timestamp();
        // 60 minutes out, allowing a little slack for test runtime
        assert!(exp - now > 59 * 60 && exp - now <= 60 * 60);
    }

    #[test]
    fn test_builder_pattern() {
        let claims = Claims::new()
            .with_subject("42")
            .with_expiration(1234567890)
            .with_extra("role", "admin");

        assert_eq!(claims.sub, Some("42".to_string()));
        assert_eq!(claims.exp, Some(1234567890));
        assert_eq!(claims.extra.get("role").unwrap().as_str(), Some("admin"));
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::new().with_expiration(1000);

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000)); // expiry instant itself is no longer valid
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_is_expired_no_exp_claim() {
        let claims = Claims::new();
        assert!(!claims.is_expired(9999999999));
    }
}
