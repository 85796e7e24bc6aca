use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_USER_ID: &str = "USER123";
pub const USER_PLACEHOLDER: &str = "{user_id}";

/// Backend location and candidate endpoint paths, in fallback order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EndpointConfig {
    pub base_url: String,
    pub read_paths: Vec<String>,
    pub write_paths: Vec<String>,
    pub user_id: String,
    /// Per-request transport timeout in milliseconds; none by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            read_paths: vec![
                "/api/get-latest-grievance".into(),
                format!("/get_grievance/{USER_PLACEHOLDER}"),
                "/get-latest-grievance".into(),
            ],
            write_paths: vec![
                "/api/update-grievance-status".into(),
                "/update-grievance-status".into(),
            ],
            user_id: DEFAULT_USER_ID.to_string(),
            timeout_ms: None,
        }
    }
}

impl EndpointConfig {
    pub fn read_urls(&self) -> Vec<String> {
        self.read_paths.iter().map(|path| self.url_for(path)).collect()
    }

    pub fn write_urls(&self) -> Vec<String> {
        self.write_paths
            .iter()
            .map(|path| self.url_for(path))
            .collect()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    fn url_for(&self, path: &str) -> String {
        let path = path.replace(USER_PLACEHOLDER, &self.user_id);
        if path.starts_with("http://") || path.starts_with("https://") {
            return path;
        }
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_urls_follow_backend_layout() {
        let config = EndpointConfig::default();
        assert_eq!(
            config.read_urls(),
            vec![
                "http://localhost:5000/api/get-latest-grievance",
                "http://localhost:5000/get_grievance/USER123",
                "http://localhost:5000/get-latest-grievance",
            ]
        );
        assert_eq!(
            config.write_urls()[0],
            "http://localhost:5000/api/update-grievance-status"
        );
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn trailing_slash_and_absolute_paths() {
        let config = EndpointConfig {
            base_url: "https://backend.example/".into(),
            read_paths: vec![
                "latest".into(),
                "https://mirror.example/latest".into(),
            ],
            user_id: "U9".into(),
            ..EndpointConfig::default()
        };
        assert_eq!(
            config.read_urls(),
            vec![
                "https://backend.example/latest",
                "https://mirror.example/latest"
            ]
        );
    }
}
