//! Explicit session handle.
//!
//! The session (API base URL plus the cookie set at login) is passed into
//! the transport instead of being looked up from ambient state, so
//! controllers and the query service can run against fake sessions.

/// API base URL and optional session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    base_url: String,
    cookie: Option<String>,
}

impl Session {
    /// A session with no cookie. A trailing `/` on `base_url` is dropped.
    pub fn anonymous(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            cookie: None,
        }
    }

    /// Attach a `name=value` cookie. An empty string clears it.
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        let cookie = cookie.into();
        self.cookie = if cookie.trim().is_empty() {
            None
        } else {
            Some(cookie.trim().to_owned())
        };
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    /// Whether a session cookie is held. The backend still decides whether
    /// it is valid.
    pub fn has_cookie(&self) -> bool {
        self.cookie.is_some()
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
