use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.architecture-demo.com/orders";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub endpoint: EndpointConfig,
    pub notifier: NotifierConfig,
    pub gateway: GatewayConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EndpointConfig {
    pub url: String,
    /// Unset keeps the HTTP client's own default.
    pub timeout_ms: Option<u64>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: None,
        }
    }
}

impl EndpointConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// How status auto-clear timers interact when messages overlap.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClearPolicy {
    /// Every message schedules its own clear; an older timer can erase a
    /// newer message.
    #[default]
    EachMessage,
    /// Only the most recent message's timer clears the status area.
    LatestOnly,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NotifierConfig {
    pub clear_after_ms: u64,
    pub clear_policy: ClearPolicy,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            clear_after_ms: 5000,
            clear_policy: ClearPolicy::EachMessage,
        }
    }
}

impl NotifierConfig {
    pub fn clear_after(&self) -> Duration {
        Duration::from_millis(self.clear_after_ms)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GatewayMode {
    #[default]
    Http,
    /// Accept every order locally without touching the network.
    Mock,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct GatewayConfig {
    pub mode: GatewayMode,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Layered load: `default`, then `RUN_MODE`, then `local` files under
    /// `dir`, then `STOREFRONT__*` environment variables. Every file is
    /// optional; keys nobody sets keep their built-in defaults.
    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let file = |name: &str| {
            config::File::with_name(&dir.join(name).to_string_lossy()).required(false)
        };

        let s = config::Config::builder()
            .add_source(file("default"))
            .add_source(file(&run_mode))
            // Not checked in
            .add_source(file("local"))
            // Eg.. `STOREFRONT__ENDPOINT__URL=http://localhost:8080/orders`
            .add_source(config::Environment::with_prefix("STOREFRONT").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_when_no_files_exist() {
        let config = Config::load_from(Path::new("does/not/exist")).unwrap();

        assert_eq!(config.endpoint.url, DEFAULT_ENDPOINT);
        assert_eq!(config.endpoint.timeout(), None);
        assert_eq!(config.notifier.clear_after(), Duration::from_secs(5));
        assert_eq!(config.notifier.clear_policy, ClearPolicy::EachMessage);
        assert_eq!(config.gateway.mode, GatewayMode::Http);
    }

    #[test]
    fn test_file_overrides_are_partial() {
        let dir = env::temp_dir().join(format!("storefront-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("default.toml"),
            "[notifier]\nclear_policy = \"latest_only\"\n\n[gateway]\nmode = \"mock\"\n",
        )
        .unwrap();

        let config = Config::load_from(&dir).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(config.notifier.clear_policy, ClearPolicy::LatestOnly);
        assert_eq!(config.notifier.clear_after_ms, 5000);
        assert_eq!(config.gateway.mode, GatewayMode::Mock);
        assert_eq!(config.endpoint.url, DEFAULT_ENDPOINT);
    }
}
