use serde::{Deserialize, Serialize};

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// user id
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}
