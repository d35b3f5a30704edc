use serde::{Deserialize, Serialize};

/// Role allowed to run maintenance endpoints
pub const ADMIN_ROLE: &str = "ADMIN";

/// JWT claims issued by the academy admin portal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // user_id
    pub username: String,
    pub role: String,
    pub exp: usize, // expiration timestamp
    pub iat: usize, // issued at
}

impl TokenClaims {
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case(ADMIN_ROLE)
    }
}
