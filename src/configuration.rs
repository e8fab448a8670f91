use std::path::PathBuf;
use std::time::Duration;

use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    #[serde(default)]
    pub scraper: ScraperSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

/// Browser and extraction knobs. Defaults mirror the values the scraper was
/// originally tuned with, so `ScraperSettings::default()` works against a
/// chromedriver already listening on localhost:9515.
#[derive(serde::Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ScraperSettings {
    pub webdriver_url: String,
    /// When set, talon spawns this chromedriver binary itself on
    /// `driver_port` instead of connecting to `webdriver_url`.
    pub driver_binary_path: Option<PathBuf>,
    pub driver_port: u16,
    pub headless: bool,
    pub disable_gpu: bool,
    pub window_size: String,
    pub user_agent: String,
    /// Class name carried by review text nodes on the target site. The one
    /// configuration point coupling us to Newegg's current markup.
    pub review_selector: String,
    pub settle_timeout_secs: u64,
    pub settle_poll_millis: u64,
    pub launch_timeout_secs: u64,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            driver_binary_path: None,
            driver_port: 9515,
            headless: true,
            disable_gpu: true,
            window_size: "1920,1080".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            review_selector: "comments-content".to_string(),
            settle_timeout_secs: 3,
            settle_poll_millis: 250,
            launch_timeout_secs: 5,
        }
    }
}

impl ScraperSettings {
    /// Endpoint the WebDriver client should connect to. A spawned driver
    /// always listens locally on `driver_port`.
    pub fn session_url(&self) -> String {
        match self.driver_binary_path {
            Some(_) => format!("http://localhost:{}", self.driver_port),
            None => self.webdriver_url.clone(),
        }
    }

    pub fn settle_timeout(&self) -> Duration {
        Duration::from_secs(self.settle_timeout_secs)
    }

    pub fn settle_poll(&self) -> Duration {
        Duration::from_millis(self.settle_poll_millis)
    }

    pub fn launch_timeout(&self) -> Duration {
        Duration::from_secs(self.launch_timeout_secs)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");

    let settings = config::Config::builder()
        .add_source(config::File::from(base_path.join("configuration.yaml")))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[cfg(test)]
mod tests {
    use super::ScraperSettings;

    #[test]
    fn default_settings_match_original_tuning() {
        let settings = ScraperSettings::default();

        assert!(settings.headless);
        assert!(settings.disable_gpu);
        assert_eq!(settings.window_size, "1920,1080");
        assert_eq!(settings.user_agent, "Mozilla/5.0");
        assert_eq!(settings.review_selector, "comments-content");
        assert_eq!(settings.settle_timeout_secs, 3);
    }

    #[test]
    fn session_url_prefers_spawned_driver_port() {
        let mut settings = ScraperSettings::default();
        assert_eq!(settings.session_url(), "http://localhost:9515");

        settings.driver_binary_path = Some("/opt/chromedriver".into());
        settings.driver_port = 4444;
        assert_eq!(settings.session_url(), "http://localhost:4444");
    }
}
