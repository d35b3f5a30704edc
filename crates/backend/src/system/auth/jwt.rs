use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, DecodingKey, Validation};
use once_cell::sync::OnceCell;

static JWT_SECRET: OnceCell<String> = OnceCell::new();

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("No JWT secret configured")]
    NotConfigured,
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

/// Remember the secret from config. An empty secret disables token checks.
pub fn initialize(secret: &str) {
    if secret.is_empty() {
        tracing::warn!("auth.jwt_secret is empty; every request is anonymous");
        return;
    }
    if JWT_SECRET.set(secret.to_string()).is_err() {
        tracing::warn!("JWT secret already initialized");
    }
}

pub fn get_jwt_secret() -> Option<&'static str> {
    JWT_SECRET.get().map(String::as_str)
}

/// Validate an HS256 token and extract claims
pub fn validate_token(token: &str, secret: &str) -> Result<TokenClaims, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::NotConfigured);
    }
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
pub(crate) fn issue_token(sub: &str, role: &str, secret: &str, lifetime_secs: i64) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = chrono::Utc::now().timestamp();
    let claims = TokenClaims {
        sub: sub.to_string(),
        username: format!("user-{}", sub),
        role: role.to_string(),
        exp: (now + lifetime_secs) as usize,
        iat: now as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_token_yields_claims() {
        let token = issue_token("42", "ADMIN", "s3cret", 3600);
        let claims = validate_token(&token, "s3cret").unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.role, "ADMIN");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token("42", "ADMIN", "s3cret", 3600);
        assert!(matches!(
            validate_token(&token, "other"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = issue_token("42", "ADMIN", "s3cret", -3600);
        assert!(validate_token(&token, "s3cret").is_err());
    }

    #[test]
    fn test_empty_secret() {
        assert!(matches!(
            validate_token("anything", ""),
            Err(AuthError::NotConfigured)
        ));
    }
}
