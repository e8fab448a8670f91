use std::path::Path;
use std::time::{Duration, Instant};

use thirtyfour::{ChromeCapabilities, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver};
use tokio::process::{Child, Command};

use crate::configuration::ScraperSettings;
use crate::error::ScrapeError;

const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(200);

/// One browser session, optionally with the chromedriver process that backs
/// it. Must be released with [`Droid::quit`]; the spawned driver carries
/// `kill_on_drop` so a cancelled call cannot leak the OS process.
pub struct Droid {
    pub driver: WebDriver,
    driver_process: Option<Child>,
}

impl Droid {
    pub async fn launch(settings: &ScraperSettings) -> Result<Self, ScrapeError> {
        let driver_process = match &settings.driver_binary_path {
            Some(path) => Some(spawn_driver(path, settings.driver_port)?),
            None => None,
        };

        let caps = build_capabilities(settings)
            .map_err(|e| ScrapeError::SessionLaunch(e.to_string()))?;

        let driver = connect(&settings.session_url(), caps, settings.launch_timeout()).await?;

        Ok(Droid {
            driver,
            driver_process,
        })
    }

    /// Tears the session down. Failures are logged rather than surfaced so
    /// release never masks the outcome of the scrape itself.
    pub async fn quit(mut self) {
        if let Err(e) = self.driver.quit().await {
            log::warn!("Failed to quit webdriver session cleanly: {:?}", e);
        }
        if let Some(mut child) = self.driver_process.take() {
            if let Err(e) = child.kill().await {
                log::warn!("Failed to kill chromedriver process: {:?}", e);
            }
        }
    }
}

fn build_capabilities(
    settings: &ScraperSettings,
) -> thirtyfour::error::WebDriverResult<ChromeCapabilities> {
    let mut caps = DesiredCapabilities::chrome();
    if settings.headless {
        caps.set_headless()?;
    }
    if settings.disable_gpu {
        caps.set_disable_gpu()?;
    }
    caps.add_arg(&format!("--window-size={}", settings.window_size))?;
    caps.add_arg(&format!("user-agent={}", settings.user_agent))?;
    Ok(caps)
}

fn spawn_driver(path: &Path, port: u16) -> Result<Child, ScrapeError> {
    if !path.exists() {
        return Err(ScrapeError::DriverUnavailable(path.display().to_string()));
    }

    log::info!("Spawning chromedriver from {} on port {}", path.display(), port);
    Command::new(path)
        .arg(format!("--port={}", port))
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| ScrapeError::DriverUnavailable(format!("{}: {}", path.display(), e)))
}

/// A freshly spawned chromedriver needs a moment before it accepts
/// connections, so retry until the launch deadline.
async fn connect(
    url: &str,
    caps: ChromeCapabilities,
    timeout: Duration,
) -> Result<WebDriver, ScrapeError> {
    let deadline = Instant::now() + timeout;

    loop {
        match WebDriver::new(url, caps.clone()).await {
            Ok(driver) => return Ok(driver),
            Err(e) if Instant::now() >= deadline => {
                return Err(ScrapeError::SessionLaunch(e.to_string()));
            }
            Err(_) => tokio::time::sleep(CONNECT_RETRY_DELAY).await,
        }
    }
}
