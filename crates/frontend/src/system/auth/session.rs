use super::storage;
use crate::shared::api_utils::api_root;
use crate::shared::config::Config;

/// Where requests go and whose token they carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// API root without trailing slash, e.g. "http://localhost:8080/api"
    pub api_root: String,
    pub access_token: Option<String>,
}

impl Session {
    pub fn new(api_root: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            api_root: api_root.into(),
            access_token,
        }
    }

    /// Session of the current page: configured API root, token from localStorage
    pub fn from_browser(config: &Config) -> Self {
        Self::new(api_root(config), storage::get_access_token())
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }

    /// `Authorization` header value, if signed in
    pub fn auth_header(&self) -> Option<String> {
        self.access_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .map(|token| format!("Bearer {}", token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_and_header() {
        let session = Session::new("http://localhost:8080/api", Some("t0k".into()));
        assert_eq!(session.url("vendors"), "http://localhost:8080/api/vendors");
        assert_eq!(session.url("/vendors/3"), "http://localhost:8080/api/vendors/3");
        assert_eq!(session.auth_header().as_deref(), Some("Bearer t0k"));
    }

    #[test]
    fn test_no_header_without_token() {
        assert_eq!(Session::new("/api", None).auth_header(), None);
        assert_eq!(Session::new("/api", Some(String::new())).auth_header(), None);
    }
}
