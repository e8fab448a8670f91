use crate::error::ScrapeError;

const PRODUCT_PATH_MARKER: &str = "/p/";
const REVIEWS_URL_BASE: &str = "https://www.newegg.com/p";

/// Derives the canonical reviews-page URL from a product-page URL.
///
/// Newegg product pages carry a `/p/<productId>` path segment, optionally
/// followed by a query string. The reviews page lives at
/// `https://www.newegg.com/p/<productId>/reviews`. Inputs without the marker
/// are rejected instead of being passed through as a degenerate identifier.
pub fn resolve_reviews_target(product_url: &str) -> Result<String, ScrapeError> {
    let trailing = product_url
        .rsplit_once(PRODUCT_PATH_MARKER)
        .map(|(_, rest)| rest)
        .ok_or_else(|| ScrapeError::MalformedReference(product_url.to_string()))?;

    let product_id = match trailing.split_once('?') {
        Some((id, _)) => id,
        None => trailing,
    };

    Ok(format!("{}/{}/reviews", REVIEWS_URL_BASE, product_id))
}

#[cfg(test)]
mod tests {
    use super::resolve_reviews_target;
    use crate::error::ScrapeError;

    #[test]
    fn resolves_reviews_target_from_product_url() {
        let target =
            resolve_reviews_target("https://www.newegg.com/p/N82E16814137724").unwrap();
        assert_eq!(target, "https://www.newegg.com/p/N82E16814137724/reviews");
    }

    #[test]
    fn strips_query_string_from_product_id() {
        let target =
            resolve_reviews_target("https://www.newegg.com/p/ABC123?foo=1&Item=xyz").unwrap();
        assert_eq!(target, "https://www.newegg.com/p/ABC123/reviews");
    }

    #[test]
    fn uses_last_product_segment_when_repeated() {
        let target = resolve_reviews_target("https://www.newegg.com/p/old/p/NEW?q=1").unwrap();
        assert_eq!(target, "https://www.newegg.com/p/NEW/reviews");
    }

    #[test]
    fn rejects_url_without_product_segment() {
        let err = resolve_reviews_target("https://www.newegg.com/help").unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedReference(_)));
    }

    #[test]
    fn resolution_is_deterministic() {
        let url = "https://www.newegg.com/p/ABC123?foo=1";
        assert_eq!(
            resolve_reviews_target(url).unwrap(),
            resolve_reviews_target(url).unwrap()
        );
    }
}
