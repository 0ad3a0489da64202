use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use hmac::Hmac;
use hmac::Mac;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::claims::Claims;
use super::errors::JwtError;

type HmacSha256 = Hmac<Sha256>;

/// Header segment is a fixed literal: this codec only ever produces HS256
/// tokens, so there is nothing to negotiate.
const HEADER_JSON: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// Codec for compact `header.payload.signature` tokens signed with
/// HMAC-SHA256 over the first two segments.
///
/// The secret is injected at construction and shared between signing and
/// verification for the process lifetime. It is never logged and never
/// appears in error values.
pub struct JwtCodec {
    mac: HmacSha256,
}

impl JwtCodec {
    /// Create a codec over a shared secret.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        let mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
        Self { mac }
    }

    /// Sign claims into a compact token.
    ///
    /// Deterministic: the header is a fixed literal and the signature is a
    /// pure function of {header, payload, secret}. No side effects.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized to JSON
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        let payload_json =
            serde_json::to_vec(claims).map_err(|e| JwtError::EncodingFailed(e.to_string()))?;

        let header64 = URL_SAFE_NO_PAD.encode(HEADER_JSON.as_bytes());
        let payload64 = URL_SAFE_NO_PAD.encode(payload_json);
        let signing_input = format!("{header64}.{payload64}");
        let signature = self.signature_of(&signing_input);

        Ok(format!("{signing_input}.{signature}"))
    }

    /// Verify a compact token and return its claims.
    ///
    /// # Errors
    /// * `Malformed` - Not three non-empty segments, or the payload fails
    ///   base64url/JSON decoding
    /// * `SignatureMismatch` - Recomputed HMAC does not equal the third segment
    /// * `Expired` - `exp` claim is present and not in the future
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify against an explicit clock reading (epoch seconds). `verify`
    /// passes the current instant; tests pin it.
    ///
    /// The signature is checked before the payload is decoded, so a tampered
    /// payload surfaces as `SignatureMismatch` rather than `Malformed`.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, JwtError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
            return Err(JwtError::Malformed(
                "expected three non-empty segments".to_string(),
            ));
        }

        let signing_input = format!("{}.{}", segments[0], segments[1]);
        let expected = self.signature_of(&signing_input);
        if !constant_time_eq(&expected, segments[2]) {
            return Err(JwtError::SignatureMismatch);
        }

        let payload = URL_SAFE_NO_PAD
            .decode(segments[1])
            .map_err(|e| JwtError::Malformed(format!("payload is not base64url: {e}")))?;
        let claims: Claims = serde_json::from_slice(&payload)
            .map_err(|e| JwtError::Malformed(format!("payload is not a claims object: {e}")))?;

        if claims.is_expired(now) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }

    fn signature_of(&self, signing_input: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(signing_input.as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }
}

/// Fixed-time comparison of the presented signature with the expected one.
/// A short-circuiting comparison would leak where the first differing byte
/// sits; mismatched lengths are also decided without inspecting content.
fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
