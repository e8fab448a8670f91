use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

use crate::configuration::ScraperSettings;
use crate::services::scrape_product_reviews;

#[derive(Deserialize)]
struct ScrapeReviewsQuery {
    product_url: String,
}

/// Tool endpoint for the agent framework: one product URL in, one text blob
/// out. Failures come back as 200 with a descriptive body, the same contract
/// the library function has.
#[get("/scrape-reviews")]
async fn scrape_reviews(
    settings: web::Data<ScraperSettings>,
    body: web::Query<ScrapeReviewsQuery>,
) -> HttpResponse {
    let outcome = scrape_product_reviews(settings.as_ref(), &body.product_url).await;
    HttpResponse::Ok().body(outcome.render())
}
