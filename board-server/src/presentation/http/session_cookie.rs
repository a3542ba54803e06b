use axum::http::{HeaderMap, header};

pub(crate) const SESSION_COOKIE_NAME: &str = "sessionId";

/// Builds `Set-Cookie` values for the session token.
#[derive(Debug, Clone)]
pub(crate) struct SessionCookie {
    max_age_seconds: i64,
    secure: bool,
}

impl SessionCookie {
    pub(crate) fn new(max_age_seconds: i64, secure: bool) -> Self {
        Self {
            max_age_seconds,
            secure,
        }
    }

    pub(crate) fn issue(&self, token: &str) -> String {
        self.render(token, self.max_age_seconds)
    }

    pub(crate) fn clear(&self) -> String {
        self.render("", 0)
    }

    fn render(&self, value: &str, max_age: i64) -> String {
        let mut cookie = format!(
            "{SESSION_COOKIE_NAME}={value}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age}"
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// Reads the session token from any `Cookie` header on the request.
pub(crate) fn read_session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name.trim() == SESSION_COOKIE_NAME).then(|| value.trim())
        })
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};

    use super::{SessionCookie, read_session_token};

    #[test]
    fn issued_cookie_is_http_only_with_max_age() {
        let cookie = SessionCookie::new(3600, false).issue("abc");
        assert_eq!(
            cookie,
            "sessionId=abc; HttpOnly; SameSite=Lax; Path=/; Max-Age=3600"
        );
    }

    #[test]
    fn secure_flag_is_appended_when_enabled() {
        let cookie = SessionCookie::new(60, true).clear();
        assert_eq!(
            cookie,
            "sessionId=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0; Secure"
        );
    }

    #[test]
    fn token_is_found_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(
            header::COOKIE,
            HeaderValue::from_static("lang=en; sessionId=tok123 ; x=1"),
        );
        assert_eq!(read_session_token(&headers), Some("tok123"));
    }

    #[test]
    fn missing_or_empty_token_is_none() {
        let mut headers = HeaderMap::new();
        assert_eq!(read_session_token(&headers), None);

        headers.insert(header::COOKIE, HeaderValue::from_static("sessionId="));
        assert_eq!(read_session_token(&headers), None);
    }
}
