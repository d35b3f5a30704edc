use axum::http::Method;
use contracts::system::auth::TokenClaims;

/// Identity part of a cache key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheUser {
    pub id: String,
    pub role: String,
}

impl From<&TokenClaims> for CacheUser {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            id: claims.sub.clone(),
            role: claims.role.clone(),
        }
    }
}

/// `"{METHOD}:{path}:{userId}:{userRole}:{query}"`.
///
/// Without a user the `userId:userRole` part is a single empty field, so
/// anonymous callers share entries: `"GET:/api/x::a=1"`.
pub fn build_cache_key(
    method: &Method,
    path: &str,
    user: Option<&CacheUser>,
    query: Option<&str>,
) -> String {
    let user_segment = match user {
        Some(u) => format!("{}:{}", u.id, u.role),
        None => String::new(),
    };
    format!(
        "{}:{}:{}:{}",
        method.as_str(),
        normalize_path(path),
        user_segment,
        canonical_query(query.unwrap_or(""))
    )
}

/// Strip one trailing slash; "/" stays "/"
pub fn normalize_path(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

/// Decode the pairs, sort by key then value, re-encode and join with `&`
pub fn canonical_query(query: &str) -> String {
    let mut pairs: Vec<(String, String)> = query
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (k, v) = part.split_once('=').unwrap_or((part, ""));
            (decode_component(k), decode_component(v))
        })
        .collect();
    pairs.sort();

    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> CacheUser {
        CacheUser {
            id: "42".to_string(),
            role: "ADMIN".to_string(),
        }
    }

    #[test]
    fn test_query_order_does_not_change_key() {
        let a = build_cache_key(&Method::GET, "/api/analytics/centre", None, Some("a=1&b=2"));
        let b = build_cache_key(&Method::GET, "/api/analytics/centre", None, Some("b=2&a=1"));
        assert_eq!(a, b);
        assert_eq!(a, "GET:/api/analytics/centre::a=1&b=2");
    }

    #[test]
    fn test_anonymous_key_has_empty_user_field() {
        assert_eq!(build_cache_key(&Method::GET, "/p", None, Some("a=1")), "GET:/p::a=1");
        assert_eq!(build_cache_key(&Method::GET, "/p", None, None), "GET:/p::");
    }

    #[test]
    fn test_user_segment() {
        assert_eq!(
            build_cache_key(&Method::GET, "/p/", Some(&user()), Some("x=1")),
            "GET:/p:42:ADMIN:x=1"
        );
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        assert_eq!(normalize_path("/api/analytics/"), "/api/analytics");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "");
    }

    #[test]
    fn test_values_are_reencoded() {
        assert_eq!(canonical_query("q=a%20b&p=U%2012"), "p=U%2012&q=a%20b");
        assert_eq!(canonical_query("q=a+b"), "q=a%20b");
        assert_eq!(canonical_query("b=2&a=2&a=1"), "a=1&a=2&b=2");
        assert_eq!(canonical_query("flag"), "flag=");
    }
}
