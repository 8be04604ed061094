use chrono::{Duration, Utc};
use jsonwebtoken::{decode as jwt_decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::config::TokenConfig;
use crate::types::{error::AppError, token::Claims};

pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

/// Signs a stateless HS256 token whose subject is the user id.
pub fn mint(user_id: &Uuid, config: &TokenConfig) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(config.ttl_seconds)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("token signing failed: {e}")))
}

/// Checks signature and expiry and returns the claims.
pub fn decode(token: &str, config: &TokenConfig) -> Result<Claims, AppError> {
    jwt_decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::InvalidToken(e.to_string()))
}
