pub mod document;
pub mod error;
pub mod ids;
pub mod offer;
pub mod options;
pub mod row;

pub use document::{Category, Currency, FeedDocument, ShopInfo};
pub use error::{FeedError, GroupFailure};
pub use ids::GroupId;
pub use offer::{Offer, OfferKind, OfferParam};
pub use options::{FeedLabels, FeedOptions};
pub use row::{ProductGroup, RawRow, columns};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_failure_reports_product_code() {
        let failure = GroupFailure::Validation {
            product_code: "A1".to_string(),
            missing: columns::NAME,
        };
        assert_eq!(failure.product_code(), "A1");
        assert_eq!(failure.to_string(), "group A1 is missing required field Name");
    }

    #[test]
    fn default_options_carry_shop_constants() {
        let options = FeedOptions::default();
        assert_eq!(options.shop.currency.id, "UAH");
        assert_eq!(options.shop.currency.rate, "1");
        assert_eq!(options.shop.category.id, "40601");
        assert_eq!(options.labels.variant_prefix, "Вариант");
    }
}
