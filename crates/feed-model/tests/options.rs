use feed_model::{FeedLabels, FeedOptions, ShopInfo};

#[test]
fn partial_toml_keeps_remaining_defaults() {
    let options: FeedOptions = toml::from_str(
        r#"
[shop]
name = "Other Shop"

[labels]
variant_prefix = "Variant"
"#,
    )
    .expect("parse options");

    assert_eq!(options.shop.name, "Other Shop");
    assert_eq!(options.shop.company, ShopInfo::default().company);
    assert_eq!(options.labels.variant_fallback(2), "Variant 2");
    assert_eq!(
        options.labels.primary_group,
        FeedLabels::default().primary_group
    );
}

#[test]
fn options_round_trip_through_toml() {
    let options = FeedOptions::default();
    let text = toml::to_string_pretty(&options).expect("serialize options");
    let parsed: FeedOptions = toml::from_str(&text).expect("parse options");
    assert_eq!(parsed, options);
}

#[test]
fn default_fallback_label_is_localized() {
    assert_eq!(FeedLabels::default().variant_fallback(1), "Вариант 1");
}
