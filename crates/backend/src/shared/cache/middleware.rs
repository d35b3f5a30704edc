use axum::body::{to_bytes, Body};
use axum::extract::{OriginalUri, Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use contracts::system::auth::TokenClaims;

use super::key::{build_cache_key, CacheUser};
use super::store::{CachedBody, ResponseCache};

pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// Memoize GET responses.
///
/// Identity comes from the `TokenClaims` placed in the request extensions by
/// `optional_auth`, so it must run inside that layer.
pub async fn cache_layer(
    State(cache): State<ResponseCache>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if req.method() != Method::GET {
        return next.run(req).await;
    }

    let user = req.extensions().get::<TokenClaims>().map(CacheUser::from);
    // Nested routers see a stripped path; key by the one the client sent
    let uri = req
        .extensions()
        .get::<OriginalUri>()
        .map(|original| original.0.clone())
        .unwrap_or_else(|| req.uri().clone());
    let key = build_cache_key(req.method(), uri.path(), user.as_ref(), uri.query());

    if let Some(hit) = cache.get(&key).await {
        tracing::debug!("Cache hit: {}", key);
        return cached_response(hit);
    }

    let response = next.run(req).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!("Failed to read response body for {}: {}", key, e);
            let mut response = Response::new(Body::empty());
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            return response;
        }
    };

    cache
        .insert(
            key,
            CachedBody {
                body: bytes.clone(),
                content_type: parts.headers.get(header::CONTENT_TYPE).cloned(),
            },
        )
        .await;

    parts
        .headers
        .insert(CACHE_STATUS_HEADER, HeaderValue::from_static("MISS"));
    Response::from_parts(parts, Body::from(bytes))
}

fn cached_response(hit: CachedBody) -> Response {
    let mut response = Response::new(Body::from(hit.body));
    let headers = response.headers_mut();
    if let Some(content_type) = hit.content_type {
        headers.insert(header::CONTENT_TYPE, content_type);
    }
    headers.insert(CACHE_STATUS_HEADER, HeaderValue::from_static("HIT"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::Request as HttpRequest;
    use axum::routing::get;
    use axum::{middleware, Json, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn counting_app(cache: ResponseCache, calls: Arc<AtomicUsize>) -> Router {
        let ok_calls = calls.clone();
        let ok = move || {
            let calls = ok_calls.clone();
            async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                Json(serde_json::json!({ "calls": n }))
            }
        };
        let fail = move || {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Router::new()
            .route("/count", get(ok.clone()).post(ok))
            .route("/fail", get(fail))
            .layer(middleware::from_fn_with_state(cache, cache_layer))
    }

    fn request(method: Method, uri: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn cache_status(response: &Response) -> Option<&str> {
        response
            .headers()
            .get(CACHE_STATUS_HEADER)
            .and_then(|v| v.to_str().ok())
    }

    #[tokio::test]
    async fn test_second_get_is_served_from_cache() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = ResponseCache::new(Duration::from_secs(60));
        let app = counting_app(cache.clone(), calls.clone());

        let first = app.clone().oneshot(request(Method::GET, "/count?b=2&a=1")).await.unwrap();
        assert_eq!(cache_status(&first), Some("MISS"));

        let second = app.clone().oneshot(request(Method::GET, "/count?a=1&b=2")).await.unwrap();
        assert_eq!(cache_status(&second), Some("HIT"));
        assert_eq!(
            second.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body = to_bytes(second.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"calls":1}"#);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_non_get_bypasses_cache() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = ResponseCache::new(Duration::from_secs(60));
        let app = counting_app(cache.clone(), calls.clone());

        for _ in 0..2 {
            let response = app.clone().oneshot(request(Method::POST, "/count")).await.unwrap();
            assert_eq!(cache_status(&response), None);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_error_responses_are_not_stored() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = ResponseCache::new(Duration::from_secs(60));
        let app = counting_app(cache.clone(), calls.clone());

        for _ in 0..2 {
            let response = app.clone().oneshot(request(Method::GET, "/fail")).await.unwrap();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_users_do_not_share_entries() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = ResponseCache::new(Duration::from_secs(60));
        let app = counting_app(cache.clone(), calls.clone());

        let mut as_user = request(Method::GET, "/count");
        as_user.extensions_mut().insert(TokenClaims {
            sub: "7".to_string(),
            username: "coach".to_string(),
            role: "COACH".to_string(),
            exp: 0,
            iat: 0,
        });

        app.clone().oneshot(request(Method::GET, "/count")).await.unwrap();
        let response = app.clone().oneshot(as_user).await.unwrap();
        assert_eq!(cache_status(&response), Some("MISS"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn test_unreadable_body_becomes_server_error() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let broken = || async {
            let chunks: Vec<Result<Bytes, std::io::Error>> =
                vec![Err(std::io::Error::new(std::io::ErrorKind::Other, "connection reset"))];
            Body::from_stream(futures::stream::iter(chunks))
        };
        let app = Router::new()
            .route("/broken", get(broken))
            .layer(middleware::from_fn_with_state(cache.clone(), cache_layer));

        let response = app.oneshot(request(Method::GET, "/broken")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(cache_status(&response), None);
        assert_eq!(cache.len().await, 0);
    }
}
