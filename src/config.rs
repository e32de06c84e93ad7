use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// OpenAI API key; the language-model delegate is enabled only when set
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// Chat model used by the delegate
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// OpenAI-compatible API base URL
    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,

    /// Base URL of the upstream user service
    #[serde(default = "default_user_service_url")]
    pub user_service_url: String,

    /// Timeout applied to every outbound HTTP call
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,

    /// Serve locally synthesized recommendations when the delegate fails
    /// instead of an empty list
    #[serde(default)]
    pub delegate_failure_fallback: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_openai_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_user_service_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_upstream_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// The API key, if present and non-empty
    pub fn openai_api_key(&self) -> Option<&str> {
        self.openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(Vec::new()).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.openai_api_url, "https://api.openai.com/v1");
        assert_eq!(config.user_service_url, "http://localhost:8080");
        assert_eq!(config.upstream_timeout_secs, 30);
        assert!(!config.delegate_failure_fallback);
        assert_eq!(config.openai_api_key(), None);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(vars(&[
            ("PORT", "8081"),
            ("OPENAI_API_KEY", "sk-test"),
            ("USER_SERVICE_URL", "http://users:9000"),
            ("DELEGATE_FAILURE_FALLBACK", "true"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8081);
        assert_eq!(config.openai_api_key(), Some("sk-test"));
        assert_eq!(config.user_service_url, "http://users:9000");
        assert!(config.delegate_failure_fallback);
    }

    #[test]
    fn test_blank_api_key_counts_as_absent() {
        let config = Config::from_vars(vars(&[("OPENAI_API_KEY", "  ")])).unwrap();
        assert_eq!(config.openai_api_key(), None);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        assert!(Config::from_vars(vars(&[("PORT", "not-a-port")])).is_err());
    }
}
