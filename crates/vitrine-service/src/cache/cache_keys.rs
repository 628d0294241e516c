//! Cache key generators for consistent key naming.

/// Key under which the full product listing is cached.
///
/// The unprefixed literal is part of the cache contract and must not change.
const PRODUCT_LISTING_KEY: &str = "product_objects";

/// Returns the cache key for the full product listing.
#[must_use]
pub const fn product_listing() -> &'static str {
    PRODUCT_LISTING_KEY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_listing_key() {
        assert_eq!(product_listing(), "product_objects");
    }
}
