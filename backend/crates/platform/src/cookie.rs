//! Cookie Management Infrastructure
//!
//! Building and reading the `Set-Cookie` / `Cookie` headers by hand.

use axum::http::{HeaderMap, HeaderValue, header};
use chrono::{DateTime, Utc};

/// IMF-fixdate, the only `Expires` format browsers are required to accept
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    #[default]
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Strict,
            path: "/".to_string(),
        }
    }
}

impl CookieConfig {
    /// Build Set-Cookie header value
    pub fn build_set_cookie(&self, value: &str, expires: Option<DateTime<Utc>>) -> String {
        let mut cookie = format!("{}={}", self.name, value);
        self.push_attributes(&mut cookie);

        if let Some(expires) = expires {
            cookie.push_str(&format!("; Expires={}", http_date(expires)));
        }

        cookie
    }

    /// Build Set-Cookie header for deletion (expired)
    pub fn build_delete_cookie(&self) -> String {
        let mut cookie = format!("{}=", self.name);
        self.push_attributes(&mut cookie);
        cookie.push_str("; Max-Age=0");
        cookie.push_str(&format!("; Expires={}", http_date(DateTime::<Utc>::default())));
        cookie
    }

    fn push_attributes(&self, cookie: &mut String) {
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));
    }
}

fn http_date(at: DateTime<Utc>) -> String {
    at.format(HTTP_DATE_FORMAT).to_string()
}

/// Extract a cookie value from headers
///
/// Browsers may split cookies over several `Cookie` headers; all of them are searched.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;

            if key == name && !value.is_empty() {
                Some(value.to_string())
            } else {
                None
            }
        })
}

/// Create a Set-Cookie header value
pub fn set_cookie_header(
    config: &CookieConfig,
    value: &str,
    expires: Option<DateTime<Utc>>,
) -> HeaderValue {
    HeaderValue::from_str(&config.build_set_cookie(value, expires))
        .unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// Create a Set-Cookie header value that clears the cookie
pub fn delete_cookie_header(config: &CookieConfig) -> HeaderValue {
    HeaderValue::from_str(&config.build_delete_cookie())
        .unwrap_or_else(|_| HeaderValue::from_static(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn session_config() -> CookieConfig {
        CookieConfig {
            name: "ST".to_string(),
            ..CookieConfig::default()
        }
    }

    #[test]
    fn test_cookie_config_build() {
        let expires = Utc.with_ymd_and_hms(2015, 10, 21, 7, 28, 0).unwrap();
        let cookie = session_config().build_set_cookie("value123", Some(expires));

        assert_eq!(
            cookie,
            "ST=value123; HttpOnly; Secure; SameSite=Strict; Path=/; \
             Expires=Wed, 21 Oct 2015 07:28:00 GMT"
        );
    }

    #[test]
    fn test_insecure_cookie_for_plain_http() {
        let config = CookieConfig {
            secure: false,
            ..session_config()
        };
        let cookie = config.build_set_cookie("abc", None);
        assert!(!cookie.contains("Secure"));
        assert!(!cookie.contains("Expires"));
        assert!(cookie.contains("HttpOnly"));
    }

    #[test]
    fn test_delete_cookie() {
        let cookie = session_config().build_delete_cookie();
        assert!(cookie.starts_with("ST=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; ST=abc123; other=xyz"),
        );

        assert_eq!(extract_cookie(&headers, "ST"), Some("abc123".to_string()));
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("foo=bar"));
        headers.append(header::COOKIE, HeaderValue::from_static("ST=xyz"));
        assert_eq!(extract_cookie(&headers, "ST"), Some("xyz".to_string()));
    }

    #[test]
    fn test_extract_empty_cookie_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("ST="));
        assert_eq!(extract_cookie(&headers, "ST"), None);
    }
}
