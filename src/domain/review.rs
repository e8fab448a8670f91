use crate::error::ScrapeError;

pub const MAX_REVIEWS: usize = 10;

pub const NO_REVIEWS_MESSAGE: &str = "No reviews found or reviews failed to load.";

/// At most [`MAX_REVIEWS`] non-empty review texts in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewBatch(pub Vec<String>);

#[derive(Debug)]
pub enum ScrapeOutcome {
    Reviews(ReviewBatch),
    Empty,
    Failed(ScrapeError),
}

impl ScrapeOutcome {
    /// Textual form of the outcome, the contract the tool surface exposes.
    pub fn render(&self) -> String {
        match self {
            ScrapeOutcome::Reviews(batch) => batch.0.join("\n\n"),
            ScrapeOutcome::Empty => NO_REVIEWS_MESSAGE.to_string(),
            ScrapeOutcome::Failed(e) => format!("Error while scraping: {}", e),
        }
    }
}

/// Trims raw element texts, drops the ones that end up empty and keeps the
/// first [`MAX_REVIEWS`] survivors, preserving document order.
pub fn collect_reviews(raw_texts: Vec<String>) -> Vec<String> {
    raw_texts
        .into_iter()
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .take(MAX_REVIEWS)
        .collect()
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::{collect_reviews, ReviewBatch, ScrapeOutcome, NO_REVIEWS_MESSAGE};
    use crate::error::ScrapeError;

    #[test]
    fn trims_surrounding_whitespace() {
        let reviews = collect_reviews(vec![
            "  Great card.  ".to_string(),
            "\n\tArrived fast.\n".to_string(),
        ]);
        assert_eq!(reviews, vec!["Great card.", "Arrived fast."]);
    }

    #[test]
    fn caps_reviews_at_ten_in_document_order() {
        let texts: Vec<String> = (1..=12).map(|i| format!("review {}", i)).collect();

        let reviews = collect_reviews(texts);

        assert_eq!(reviews.len(), 10);
        assert_eq!(reviews[0], "review 1");
        assert_eq!(reviews[9], "review 10");
    }

    #[test]
    fn excludes_blank_entries_before_applying_the_cap() {
        let mut texts: Vec<String> = (1..=12).map(|i| format!("review {}", i)).collect();
        texts[2] = "   ".to_string();
        texts[6] = "\n\t".to_string();

        let reviews = collect_reviews(texts);

        assert_eq!(reviews.len(), 10);
        assert_eq!(reviews[2], "review 4");
        assert_eq!(reviews[9], "review 12");
    }

    #[test]
    fn collects_reviews_from_a_rendered_document() {
        let html = r#"
            <html><body>
                <div class="comments-content"> Great card, runs cool. </div>
                <div class="comments-content">   </div>
                <div class="comments-content">Arrived two days early.</div>
                <div class="other">Not a review.</div>
            </body></html>
        "#;
        let document = Html::parse_document(html);
        let selector = Selector::parse(".comments-content").unwrap();
        let texts: Vec<String> = document
            .select(&selector)
            .map(|element| element.text().collect())
            .collect();

        let reviews = collect_reviews(texts);

        assert_eq!(
            reviews,
            vec!["Great card, runs cool.", "Arrived two days early."]
        );
    }

    #[test]
    fn renders_reviews_separated_by_a_blank_line() {
        let outcome = ScrapeOutcome::Reviews(ReviewBatch(vec![
            "first".to_string(),
            "second".to_string(),
        ]));
        assert_eq!(outcome.render(), "first\n\nsecond");
    }

    #[test]
    fn renders_empty_outcome_as_the_sentinel_message() {
        assert_eq!(ScrapeOutcome::Empty.render(), NO_REVIEWS_MESSAGE);
    }

    #[test]
    fn renders_failure_with_the_error_description() {
        let outcome = ScrapeOutcome::Failed(ScrapeError::NavigationFailed(
            "connection refused".to_string(),
        ));
        let rendered = outcome.render();
        assert!(rendered.starts_with("Error while scraping: "));
        assert!(rendered.contains("connection refused"));
    }
}
