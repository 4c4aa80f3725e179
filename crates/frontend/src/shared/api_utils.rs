//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs from the configuration.

use crate::shared::config::Config;

/// Get the root URL of the REST API
///
/// Uses `api.base_url` when configured, otherwise the current window location
/// with the configured backend port. The prefix is appended in both cases.
///
/// # Returns
/// - API root like "http://localhost:8080/api"
/// - Just the prefix if window is not available
pub fn api_root(config: &Config) -> String {
    let base = match &config.api.base_url {
        Some(url) => url.clone(),
        None => match web_sys::window() {
            Some(window) => {
                let location = window.location();
                let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
                let hostname = location
                    .hostname()
                    .unwrap_or_else(|_| "127.0.0.1".to_string());
                origin(&protocol, &hostname, config.api.port)
            }
            None => String::new(),
        },
    };
    join_root(&base, &config.api.prefix)
}

fn origin(protocol: &str, hostname: &str, port: u16) -> String {
    format!("{}//{}:{}", protocol, hostname, port)
}

/// `base` and `prefix` joined with exactly one slash, no trailing slash
fn join_root(base: &str, prefix: &str) -> String {
    let base = base.trim_end_matches('/');
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, prefix)
    }
}
