use axum::{
    body::Body, extract::Request, http::header, http::StatusCode, middleware::Next,
    response::Response,
};
use contracts::system::auth::TokenClaims;

/// Attach `TokenClaims` to the request when a valid bearer token is present.
/// Missing or invalid tokens continue anonymously.
pub async fn optional_auth(mut req: Request<Body>, next: Next) -> Response {
    if let Some(secret) = super::jwt::get_jwt_secret() {
        if let Some(claims) = claims_from_request(&req, secret) {
            req.extensions_mut().insert(claims);
        }
    }
    next.run(req).await
}

/// Admin-only routes. Runs inside `optional_auth`:
/// no identity -> 401, any other role -> 403.
pub async fn require_admin(req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let claims = req
        .extensions()
        .get::<TokenClaims>()
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !claims.is_admin() {
        tracing::warn!("User {} ({}) denied admin route", claims.sub, claims.role);
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(req).await)
}

fn claims_from_request(req: &Request<Body>, secret: &str) -> Option<TokenClaims> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?
        .strip_prefix("Bearer ")?;

    match super::jwt::validate_token(token, secret) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::debug!("Ignoring bearer token: {}", e);
            None
        }
    }
}
