//! Admin session scheme.
//!
//! The token is derived deterministically from the shared admin password, so
//! the cookie is static for a given secret: theft grants access until the
//! secret is rotated, and sessions cannot be revoked individually. Rotating
//! `ADMIN_PASSWORD` invalidates every outstanding cookie at once.

use axum::http::{header, HeaderMap};
use cookie::time::{Duration, OffsetDateTime};
use cookie::{Cookie, SameSite};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const ADMIN_COOKIE_NAME: &str = "admin_session";
/// Domain-separation suffix for the token derivation.
const TOKEN_CONTEXT: &str = "autocontent-admin";
const COOKIE_MAX_AGE_DAYS: i64 = 7;

/// Derives the admin session token: hex(HMAC-SHA256(key = secret,
/// msg = secret ":" context)). Deterministic for a given secret.
pub fn derive_admin_token(secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(format!("{secret}:{TOKEN_CONTEXT}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// True when the request carries an `admin_session` cookie matching the
/// derived token for the configured secret.
pub fn is_admin_session(headers: &HeaderMap, secret: &str) -> bool {
    match admin_cookie_value(headers) {
        Some(value) => constant_time_eq(value, &derive_admin_token(secret)),
        None => false,
    }
}

fn admin_cookie_value(headers: &HeaderMap) -> Option<&str> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    let prefix = format!("{ADMIN_COOKIE_NAME}=");
    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix(prefix.as_str()))
        .filter(|value| !value.is_empty())
}

/// Builds the `Set-Cookie` value for a successful admin login.
pub fn build_admin_cookie(token: &str) -> String {
    Cookie::build((ADMIN_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::days(COOKIE_MAX_AGE_DAYS))
        .build()
        .to_string()
}

/// Builds the `Set-Cookie` value that clears the admin session.
pub fn build_clear_cookie() -> String {
    Cookie::build((ADMIN_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
        .to_string()
}

/// Constant-time equality to keep token comparison timing-independent.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes()
        .iter()
        .zip(b.as_bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_derive_admin_token_is_stable() {
        let a = derive_admin_token("hunter2");
        let b = derive_admin_token("hunter2");
        assert_eq!(a, b);
    }

    #[test]
    fn test_derive_admin_token_changes_with_secret() {
        assert_ne!(derive_admin_token("hunter2"), derive_admin_token("hunter3"));
    }

    #[test]
    fn test_derived_token_is_hex_sha256() {
        let token = derive_admin_token("hunter2");
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_correct_cookie_grants_admin_session() {
        let token = derive_admin_token("hunter2");
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; admin_session={token}")).unwrap(),
        );
        assert!(is_admin_session(&headers, "hunter2"));
    }

    #[test]
    fn test_wrong_cookie_value_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("admin_session=0000"),
        );
        assert!(!is_admin_session(&headers, "hunter2"));
    }

    #[test]
    fn test_missing_cookie_is_rejected() {
        assert!(!is_admin_session(&HeaderMap::new(), "hunter2"));
    }

    #[test]
    fn test_token_for_other_secret_is_rejected() {
        let token = derive_admin_token("hunter3");
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("admin_session={token}")).unwrap(),
        );
        assert!(!is_admin_session(&headers, "hunter2"));
    }

    #[test]
    fn test_admin_cookie_attributes() {
        let cookie = build_admin_cookie("abc123");
        assert!(cookie.starts_with("admin_session=abc123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=604800"));
    }

    #[test]
    fn test_clear_cookie_expires_in_the_past() {
        let cookie = build_clear_cookie();
        assert!(cookie.starts_with("admin_session="));
        assert!(cookie.contains("Expires="));
        assert!(cookie.contains("1970"));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("abc", "abc"));
        assert!(!constant_time_eq("abc", "abd"));
        assert!(!constant_time_eq("abc", "abcd"));
        assert!(constant_time_eq("", ""));
    }
}
