//! YML feed generation.

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use feed_model::{FeedDocument, Offer, OfferKind, ShopInfo};

use crate::common::{
    ENCODING, FEED_DATE_FORMAT, write_cdata_element, write_param, write_text_element,
};

/// Render a feed document as UTF-8 text.
///
/// Offers are written in document order. Description markup is wrapped in
/// CDATA so consumers read it back without double escaping.
pub fn render_feed(document: &FeedDocument) -> Result<String> {
    let mut xml = Writer::new_with_indent(Vec::new(), b'\t', 1);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some(ENCODING), None)))?;

    let date = document.generated_at.format(FEED_DATE_FORMAT).to_string();
    let mut root = BytesStart::new("yml_catalog");
    root.push_attribute(("date", date.as_str()));
    xml.write_event(Event::Start(root))?;

    xml.write_event(Event::Start(BytesStart::new("shop")))?;
    write_shop_header(&mut xml, &document.shop)?;

    xml.write_event(Event::Start(BytesStart::new("offers")))?;
    for offer in &document.offers {
        write_offer(&mut xml, offer)?;
    }
    xml.write_event(Event::End(BytesEnd::new("offers")))?;

    xml.write_event(Event::End(BytesEnd::new("shop")))?;
    xml.write_event(Event::End(BytesEnd::new("yml_catalog")))?;

    let mut bytes = xml.into_inner();
    bytes.push(b'\n');
    Ok(String::from_utf8(bytes)?)
}

fn write_shop_header(xml: &mut Writer<Vec<u8>>, shop: &ShopInfo) -> Result<()> {
    write_text_element(xml, "name", &shop.name)?;
    write_text_element(xml, "company", &shop.company)?;
    write_text_element(xml, "url", &shop.url)?;

    xml.write_event(Event::Start(BytesStart::new("currencies")))?;
    let mut currency = BytesStart::new("currency");
    currency.push_attribute(("id", shop.currency.id.as_str()));
    currency.push_attribute(("rate", shop.currency.rate.as_str()));
    xml.write_event(Event::Empty(currency))?;
    xml.write_event(Event::End(BytesEnd::new("currencies")))?;

    xml.write_event(Event::Start(BytesStart::new("categories")))?;
    let mut category = BytesStart::new("category");
    category.push_attribute(("id", shop.category.id.as_str()));
    xml.write_event(Event::Start(category))?;
    xml.write_event(Event::Text(BytesText::new(&shop.category.label)))?;
    xml.write_event(Event::End(BytesEnd::new("category")))?;
    xml.write_event(Event::End(BytesEnd::new("categories")))?;
    Ok(())
}

fn write_offer(xml: &mut Writer<Vec<u8>>, offer: &Offer) -> Result<()> {
    let group_id = offer.group_id.to_string();
    let mut node = BytesStart::new("offer");
    node.push_attribute(("id", offer.id.as_str()));
    node.push_attribute(("available", if offer.available { "true" } else { "false" }));
    node.push_attribute(("group_id", group_id.as_str()));
    xml.write_event(Event::Start(node))?;

    write_text_element(xml, "name", &offer.name)?;
    if let OfferKind::Main {
        description,
        name_secondary,
        description_secondary,
        ..
    } = &offer.kind
    {
        write_cdata_element(xml, "description", description)?;
        write_text_element(xml, "name_ua", name_secondary)?;
        write_cdata_element(xml, "description_ua", description_secondary)?;
    }
    write_text_element(xml, "price", &offer.price)?;
    write_text_element(xml, "currencyId", &offer.currency_id)?;
    write_text_element(xml, "categoryId", &offer.category_id)?;
    write_text_element(xml, "vendor", &offer.vendor)?;
    if let OfferKind::Main {
        country_of_origin, ..
    } = &offer.kind
    {
        write_text_element(xml, "country_of_origin", country_of_origin)?;
    }
    write_text_element(xml, "vendorCode", &offer.vendor_code)?;
    for picture in &offer.pictures {
        write_text_element(xml, "picture", picture)?;
    }
    for param in &offer.params {
        write_param(xml, &param.name, &param.value)?;
    }

    xml.write_event(Event::End(BytesEnd::new("offer")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use feed_model::{GroupId, OfferParam};

    use super::*;

    fn document(offers: Vec<Offer>) -> FeedDocument {
        FeedDocument {
            generated_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(8, 30, 0)
                .unwrap(),
            shop: ShopInfo::default(),
            offers,
        }
    }

    fn variant() -> Offer {
        Offer {
            id: "X_3c59dc04".to_string(),
            group_id: GroupId::new(1).unwrap(),
            available: true,
            kind: OfferKind::Variant,
            name: "N Вариант 1".to_string(),
            price: "50".to_string(),
            currency_id: "UAH".to_string(),
            category_id: "40601".to_string(),
            vendor: "P".to_string(),
            vendor_code: "X".to_string(),
            pictures: vec![],
            params: vec![OfferParam::new("Тип комплекта", "Вариант 1")],
        }
    }

    #[test]
    fn declares_utf8_and_dates_the_root() {
        let text = render_feed(&document(vec![])).unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(text.contains("<yml_catalog date=\"2024-05-01 08:30\">"));
        assert!(text.contains("<currency id=\"UAH\" rate=\"1\"/>"));
        assert!(text.contains("<offers>"));
    }

    #[test]
    fn variant_offer_omits_descriptive_fields() {
        let text = render_feed(&document(vec![variant()])).unwrap();
        assert!(text.contains("<offer id=\"X_3c59dc04\" available=\"true\" group_id=\"1\">"));
        assert!(!text.contains("<description>"));
        assert!(!text.contains("<country_of_origin>"));
        assert!(text.contains("<param name=\"Тип комплекта\">Вариант 1</param>"));
    }
}
