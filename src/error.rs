use thiserror::Error;

/// Everything that can go wrong between receiving a product URL and reading
/// review text out of the page. All variants are caught at the scraper
/// boundary and rendered into a textual outcome; none escape to the caller.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("product url is missing the /p/<id> segment: {0}")]
    MalformedReference(String),

    #[error("webdriver binary not available: {0}")]
    DriverUnavailable(String),

    #[error("failed to start browser session: {0}")]
    SessionLaunch(String),

    #[error("navigation failed: {0}")]
    NavigationFailed(String),

    #[error("webdriver error: {0}")]
    Unknown(String),
}

impl From<thirtyfour::error::WebDriverError> for ScrapeError {
    fn from(err: thirtyfour::error::WebDriverError) -> Self {
        ScrapeError::Unknown(err.to_string())
    }
}
