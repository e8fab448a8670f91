use std::time::Instant;

use thirtyfour::By;

use crate::configuration::ScraperSettings;
use crate::domain::{collect_reviews, resolve_reviews_target, ReviewBatch, ScrapeOutcome};
use crate::error::ScrapeError;
use crate::services::Droid;

/// The slice of a browser session the extractor needs. Lets the release and
/// settle logic run against a fake page in tests.
pub trait ReviewPage {
    async fn open(&self, url: &str) -> Result<(), ScrapeError>;
    async fn review_texts(&self, selector: &str) -> Result<Vec<String>, ScrapeError>;
    async fn close(self);
}

impl ReviewPage for Droid {
    async fn open(&self, url: &str) -> Result<(), ScrapeError> {
        self.driver
            .goto(url)
            .await
            .map_err(|e| ScrapeError::NavigationFailed(e.to_string()))
    }

    async fn review_texts(&self, selector: &str) -> Result<Vec<String>, ScrapeError> {
        let elements = self.driver.find_all(By::ClassName(selector)).await?;

        let mut texts = Vec::with_capacity(elements.len());
        for element in elements {
            texts.push(element.text().await?);
        }
        Ok(texts)
    }

    async fn close(self) {
        self.quit().await;
    }
}

/// Scrapes Newegg reviews for a product URL. The single entry point of the
/// crate: resolves the reviews page, drives one browser session through it
/// and shapes whatever happens into a [`ScrapeOutcome`].
pub async fn scrape_product_reviews(
    settings: &ScraperSettings,
    product_url: &str,
) -> ScrapeOutcome {
    let target = match resolve_reviews_target(product_url) {
        Ok(target) => target,
        Err(e) => return ScrapeOutcome::Failed(e),
    };
    log::info!("Scraping reviews from {}", target);

    let droid = match Droid::launch(settings).await {
        Ok(droid) => droid,
        Err(e) => {
            log::error!("Could not acquire a browser session: {}", e);
            return ScrapeOutcome::Failed(e);
        }
    };

    match extract_reviews(droid, &target, settings).await {
        Ok(reviews) if reviews.is_empty() => ScrapeOutcome::Empty,
        Ok(reviews) => {
            log::info!("Extracted {} reviews", reviews.len());
            ScrapeOutcome::Reviews(ReviewBatch(reviews))
        }
        Err(e) => {
            log::error!("Scrape failed: {}", e);
            ScrapeOutcome::Failed(e)
        }
    }
}

/// String-in, string-out form of the tool, using the default browser
/// configuration. This is the callable handed to an agent framework.
pub async fn scrape_newegg_reviews(product_url: &str) -> String {
    scrape_product_reviews(&ScraperSettings::default(), product_url)
        .await
        .render()
}

/// Takes ownership of the page and releases it on every path, extraction
/// error included.
async fn extract_reviews<P: ReviewPage>(
    page: P,
    target: &str,
    settings: &ScraperSettings,
) -> Result<Vec<String>, ScrapeError> {
    let result = navigate_and_collect(&page, target, settings).await;
    page.close().await;
    result
}

async fn navigate_and_collect<P: ReviewPage>(
    page: &P,
    target: &str,
    settings: &ScraperSettings,
) -> Result<Vec<String>, ScrapeError> {
    page.open(target).await?;
    wait_for_reviews(page, settings).await
}

/// Explicit settle wait: poll for review elements until at least one carries
/// non-empty text or the timeout elapses. Review content is injected
/// client-side well after the navigation itself completes, so the first poll
/// usually comes back empty. Timing out with nothing found is the normal
/// empty result, not an error.
async fn wait_for_reviews<P: ReviewPage>(
    page: &P,
    settings: &ScraperSettings,
) -> Result<Vec<String>, ScrapeError> {
    let deadline = Instant::now() + settings.settle_timeout();

    loop {
        let texts = page.review_texts(&settings.review_selector).await?;
        let reviews = collect_reviews(texts);
        if !reviews.is_empty() {
            return Ok(reviews);
        }
        if Instant::now() >= deadline {
            return Ok(Vec::new());
        }
        tokio::time::sleep(settings.settle_poll()).await;
    }
}
