//! Main and variant offers of one product group.

use feed_model::{FeedLabels, FeedOptions, GroupId, Offer, OfferKind, OfferParam};

use crate::ids::{main_offer_id, variant_offer_id};
use crate::normalize::NormalizedGroup;

/// Build the main offer followed by one offer per variant, in row order.
pub fn build_offers(group: &NormalizedGroup, group_id: GroupId, options: &FeedOptions) -> Vec<Offer> {
    let labels = &options.labels;
    let currency_id = &options.shop.currency.id;
    let category_id = &options.shop.category.id;

    let mut params = Vec::with_capacity(3);
    if !group.fabric_type.is_empty() {
        params.push(OfferParam::new(&labels.fabric_param, &group.fabric_type));
    }
    if !group.density.is_empty() {
        params.push(OfferParam::new(&labels.density_param, &group.density));
    }
    params.push(OfferParam::new(&labels.kind_param, &group.subcategory));

    let mut offers = Vec::with_capacity(group.variants.len() + 1);
    offers.push(Offer {
        id: main_offer_id(&group.product_code),
        group_id,
        available: true,
        kind: OfferKind::Main {
            description: description_markup(&labels.description_heading, &group.description),
            name_secondary: group.name_secondary.clone(),
            description_secondary: description_markup(
                &labels.description_heading_secondary,
                &group.description_secondary,
            ),
            country_of_origin: group.country_of_origin.clone(),
        },
        name: group.name.clone(),
        price: group.price.clone(),
        currency_id: currency_id.clone(),
        category_id: category_id.clone(),
        vendor: group.producer.clone(),
        vendor_code: group.product_code.clone(),
        pictures: group.photos.clone(),
        params,
    });

    for variant in &group.variants {
        offers.push(Offer {
            id: variant_offer_id(&group.product_code, &variant.label),
            group_id,
            available: true,
            kind: OfferKind::Variant,
            name: format!("{} {}", group.name, variant.label).trim().to_string(),
            price: variant.price.clone(),
            currency_id: currency_id.clone(),
            category_id: category_id.clone(),
            vendor: group.producer.clone(),
            vendor_code: group.product_code.clone(),
            pictures: variant.photos.clone(),
            params: vec![variant_param(labels, &variant.label)],
        });
    }
    offers
}

fn variant_param(labels: &FeedLabels, label: &str) -> OfferParam {
    OfferParam::new(&labels.kind_param, label)
}

/// HTML block embedded in description fields.
fn description_markup(heading: &str, text: &str) -> String {
    format!("<h2>{heading}</h2><p>{text}</p>")
}
