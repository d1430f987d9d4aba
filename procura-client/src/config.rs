//! Client configuration

/// Client configuration for connecting to the marketplace API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "https://api.procura.example")
    pub base_url: String,

    /// Request timeout in seconds, enforced by the transport layer.
    /// A stuck request surfaces as a transport error, never a silent hang.
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new configuration with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, 30);
        assert_eq!(config.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("https://api.example").with_timeout(5);
        assert_eq!(config.timeout, 5);
    }
}
