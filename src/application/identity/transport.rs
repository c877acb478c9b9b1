//! How session tokens and client metadata travel in request headers.

use axum::http::header::{AUTHORIZATION, COOKIE, USER_AGENT};
use axum::http::{HeaderMap, HeaderValue};

/// Reads the session token from `Authorization: Bearer <token>`, falling
/// back to the session cookie.
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// First hop of `x-forwarded-for`, else `x-real-ip`.
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|ip| !ip.is_empty())
        })
        .map(str::to_string)
}

pub fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Header set carrying only the given token, for looking a freshly issued
/// session back up.
pub fn headers_with_token(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
        headers.insert(AUTHORIZATION, value);
    }
    headers
}

/// `Set-Cookie` value installing the session cookie.
pub fn session_cookie(cookie_name: &str, token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        cookie_name, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value removing the session cookie.
pub fn clear_session_cookie(cookie_name: &str) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", cookie_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOKIE_NAME: &str = "msl.session_token";

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn bearer_token_wins_over_cookie() {
        let h = headers(&[
            ("authorization", "Bearer abc"),
            ("cookie", "msl.session_token=from-cookie"),
        ]);
        assert_eq!(extract_token(&h, COOKIE_NAME).as_deref(), Some("abc"));
    }

    #[test]
    fn token_is_read_from_cookie() {
        let h = headers(&[("cookie", "theme=dark; msl.session_token=xyz; lang=th")]);
        assert_eq!(extract_token(&h, COOKIE_NAME).as_deref(), Some("xyz"));
    }

    #[test]
    fn no_token_without_credentials() {
        assert_eq!(extract_token(&HeaderMap::new(), COOKIE_NAME), None);

        let h = headers(&[("authorization", "Basic dXNlcjpwYXNz"), ("cookie", "other=1")]);
        assert_eq!(extract_token(&h, COOKIE_NAME), None);

        let h = headers(&[("cookie", "msl.session_token=")]);
        assert_eq!(extract_token(&h, COOKIE_NAME), None);
    }

    #[test]
    fn client_ip_uses_first_forwarded_hop() {
        let h = headers(&[("x-forwarded-for", "203.0.113.7, 10.0.0.1")]);
        assert_eq!(client_ip(&h).as_deref(), Some("203.0.113.7"));

        let h = headers(&[("x-real-ip", "198.51.100.2")]);
        assert_eq!(client_ip(&h).as_deref(), Some("198.51.100.2"));

        assert_eq!(client_ip(&HeaderMap::new()), None);
    }

    #[test]
    fn token_headers_round_trip() {
        let h = headers_with_token("tok");
        assert_eq!(extract_token(&h, COOKIE_NAME).as_deref(), Some("tok"));
    }

    #[test]
    fn cookies_have_expected_attributes() {
        let set = session_cookie(COOKIE_NAME, "tok", 3600, false);
        assert_eq!(
            set,
            "msl.session_token=tok; Path=/; HttpOnly; SameSite=Lax; Max-Age=3600"
        );
        assert!(session_cookie(COOKIE_NAME, "tok", 1, true).ends_with("; Secure"));
        assert!(clear_session_cookie(COOKIE_NAME).contains("Max-Age=0"));
    }
}
