pub mod droid;
pub mod review_scraper;

pub use droid::*;
pub use review_scraper::*;
