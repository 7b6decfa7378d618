use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::principal::PrincipalRef;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Signs and verifies session tokens. Key and lifetime are fixed at
/// construction; rotating the key invalidates everything previously issued,
/// which is acceptable because sessions are server-tracked anyway.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn issue(&self, principal: PrincipalRef) -> Result<(String, DateTime<Utc>)> {
        let expires_at = Utc::now() + self.ttl;
        let claims = Claims {
            sub: principal.subject(),
            exp: expires_at.timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| Error::Internal(format!("Token signing failed: {}", e)))?;
        Ok((token, expires_at))
    }

    /// Verifies signature and embedded expiry. Malformed structure, a bad
    /// signature and a past expiry all collapse into the same `None`; callers
    /// learn nothing about which check failed. Zero leeway: an expiry even one
    /// second in the past is rejected.
    pub fn decode(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .ok()
    }
}
