//! Stateless session holding the request counter
//!
//! The session is a signed JWT kept in a cookie, so nothing is stored
//! server side. A missing, tampered or expired token reads as a fresh
//! session with a counter of zero.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    config::SessionConfig,
    error::{AppError, AppResult},
};

/// JWT claims stored in the session cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub counter: i64,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct SessionService {
    config: SessionConfig,
}

impl SessionService {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Lifetime shared by the cookie and the token it carries
    pub fn max_age_seconds(&self) -> i64 {
        self.config.max_age_seconds
    }

    /// Counter carried by `token`, or 0 when there is no usable session
    pub fn read_counter(&self, token: Option<&str>) -> i64 {
        let Some(token) = token else {
            return 0;
        };

        match decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &Validation::default(),
        ) {
            Ok(data) => data.claims.counter.max(0),
            Err(e) => {
                tracing::debug!("Discarding session token: {}", e);
                0
            }
        }
    }

    /// Sign a fresh session token carrying `counter`
    pub fn issue(&self, counter: i64) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            counter,
            iat: now,
            exp: now + self.config.max_age_seconds,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))
    }

    /// Read the counter from `token`, increment it and sign the new session
    pub fn increment(&self, token: Option<&str>) -> AppResult<(i64, String)> {
        let counter = self.read_counter(token).saturating_add(1);
        let token = self.issue(counter)?;
        Ok((counter, token))
    }
}
