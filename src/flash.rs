// 💬 Flash Messages - One-shot notices across a single redirect
//
// The message rides in a signed `flash` cookie. The page that shows it also
// sends a Max-Age=0 cookie, so a reload does not show it again.

use axum::http::{header, HeaderMap, HeaderValue};
use cookie::{Cookie, CookieJar, Key, SameSite};
use sha2::{Digest, Sha512};
use tracing::warn;

pub const FLASH_COOKIE: &str = "flash";

/// Signing key for flash cookies, derived from the configured secret
#[derive(Clone)]
pub struct FlashKey(Key);

impl FlashKey {
    /// SHA-512 stretches any secret to the 64 bytes `Key` requires
    pub fn from_secret(secret: &str) -> Self {
        let digest = Sha512::digest(secret.as_bytes());
        FlashKey(Key::from(digest.as_slice()))
    }
}

/// What the request carried in its flash cookie
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomingFlash {
    /// Verified message, if the signature checked out
    pub message: Option<String>,

    /// A flash cookie was present (valid or not) and must be cleared
    pub present: bool,
}

/// `Set-Cookie` value carrying a signed message
pub fn flash_cookie(key: &FlashKey, message: &str) -> Option<HeaderValue> {
    let mut jar = CookieJar::new();
    jar.signed_mut(&key.0).add(
        Cookie::build((FLASH_COOKIE, message.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    );

    let signed = jar.get(FLASH_COOKIE)?;
    match HeaderValue::from_str(&signed.encoded().to_string()) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, "could not encode flash cookie");
            None
        }
    }
}

/// `Set-Cookie` value that expires the flash cookie
pub fn clear_flash_cookie() -> HeaderValue {
    let cookie = Cookie::build((FLASH_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(cookie::time::Duration::ZERO)
        .build();

    HeaderValue::from_str(&cookie.to_string()).unwrap_or_else(|_| HeaderValue::from_static("flash=; Path=/; Max-Age=0"))
}

/// Read and verify the flash cookie from request headers
pub fn read_flash(key: &FlashKey, headers: &HeaderMap) -> IncomingFlash {
    let mut jar = CookieJar::new();

    for header_value in headers.get_all(header::COOKIE) {
        let Ok(cookie_str) = header_value.to_str() else {
            continue;
        };
        for cookie in Cookie::split_parse_encoded(cookie_str).flatten() {
            if cookie.name() == FLASH_COOKIE {
                jar.add_original(cookie.into_owned());
            }
        }
    }

    if jar.get(FLASH_COOKIE).is_none() {
        return IncomingFlash::default();
    }

    let message = jar
        .signed(&key.0)
        .get(FLASH_COOKIE)
        .map(|cookie| cookie.value().to_string());
    if message.is_none() {
        warn!("ignoring flash cookie with a bad signature");
    }

    IncomingFlash {
        message,
        present: true,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Turn a Set-Cookie value into the Cookie header a browser would send back
    fn echo(set_cookie: &HeaderValue) -> HeaderMap {
        let pair = set_cookie.to_str().unwrap().split(';').next().unwrap().to_string();
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(&pair).unwrap());
        headers
    }

    #[test]
    fn test_flash_roundtrip() {
        let key = FlashKey::from_secret("secret");
        let set_cookie = flash_cookie(&key, "Please enter valid details.").unwrap();

        let incoming = read_flash(&key, &echo(&set_cookie));

        assert_eq!(incoming.message.as_deref(), Some("Please enter valid details."));
        assert!(incoming.present);
    }

    #[test]
    fn test_flash_with_wrong_key_is_ignored() {
        let set_cookie = flash_cookie(&FlashKey::from_secret("one"), "hello").unwrap();

        let incoming = read_flash(&FlashKey::from_secret("two"), &echo(&set_cookie));

        assert_eq!(incoming.message, None);
        assert!(incoming.present);
    }

    #[test]
    fn test_unsigned_flash_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("other=1; flash=forged"));

        let incoming = read_flash(&FlashKey::from_secret("secret"), &headers);

        assert_eq!(incoming.message, None);
        assert!(incoming.present);
    }

    #[test]
    fn test_no_flash_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session=abc"));

        assert_eq!(read_flash(&FlashKey::from_secret("secret"), &headers), IncomingFlash::default());
    }

    #[test]
    fn test_clear_cookie_expires() {
        let value = clear_flash_cookie();
        let text = value.to_str().unwrap();

        assert!(text.starts_with("flash=;"));
        assert!(text.contains("Max-Age=0"));
    }
}
