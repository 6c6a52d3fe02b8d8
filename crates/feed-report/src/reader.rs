//! Parse a rendered feed back into offers.
//!
//! Description CDATA is returned verbatim; escaped text and attribute
//! values are unescaped.

use anyhow::{Context, Result, anyhow};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedShop {
    pub name: String,
    pub company: String,
    pub url: String,
    pub currency_id: String,
    pub currency_rate: String,
    pub category_id: String,
    pub category_label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedOffer {
    pub id: String,
    pub group_id: u32,
    pub available: bool,
    /// Simple child elements in document order, excluding pictures and params.
    pub fields: Vec<(String, String)>,
    pub pictures: Vec<String>,
    pub params: Vec<(String, String)>,
}

impl ParsedOffer {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedFeed {
    pub date: String,
    pub shop: ParsedShop,
    pub offers: Vec<ParsedOffer>,
}

/// Parse feed text produced by [`crate::render_feed`] or a compatible writer.
pub fn read_feed(xml: &str) -> Result<ParsedFeed> {
    let mut reader = Reader::from_str(xml);
    let mut feed = ParsedFeed::default();
    let mut path: Vec<String> = Vec::new();
    let mut text = String::new();
    let mut offer: Option<ParsedOffer> = None;
    let mut param_name: Option<String> = None;

    loop {
        let event = reader
            .read_event()
            .with_context(|| format!("parse feed at byte {}", reader.buffer_position()))?;
        match event {
            Event::Start(e) => {
                let name = element_name(&e);
                text.clear();
                on_open(&e, &name, &mut feed, &mut offer, &mut param_name)?;
                path.push(name);
            }
            Event::Empty(e) => {
                let name = element_name(&e);
                text.clear();
                on_open(&e, &name, &mut feed, &mut offer, &mut param_name)?;
                on_close(&name, &path, "", &mut feed, &mut offer, &mut param_name)?;
            }
            Event::Text(e) => {
                text.push_str(&unescape(&String::from_utf8_lossy(&e)));
            }
            Event::GeneralRef(e) => {
                let reference = format!("&{};", String::from_utf8_lossy(&e));
                text.push_str(&unescape(&reference));
            }
            Event::CData(e) => {
                text.push_str(&String::from_utf8_lossy(&e));
            }
            Event::End(_) => {
                let name = path
                    .pop()
                    .ok_or_else(|| anyhow!("unbalanced closing tag in feed"))?;
                on_close(&name, &path, &text, &mut feed, &mut offer, &mut param_name)?;
                text.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if !path.is_empty() {
        return Err(anyhow!("feed ended inside <{}>", path.join("/")));
    }
    Ok(feed)
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn attribute(e: &BytesStart<'_>, key: &str) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key.as_bytes() {
            return Ok(Some(unescape(&String::from_utf8_lossy(&attr.value))));
        }
    }
    Ok(None)
}

fn on_open(
    e: &BytesStart<'_>,
    name: &str,
    feed: &mut ParsedFeed,
    offer: &mut Option<ParsedOffer>,
    param_name: &mut Option<String>,
) -> Result<()> {
    match name {
        "yml_catalog" => {
            feed.date = attribute(e, "date")?.unwrap_or_default();
        }
        "currency" => {
            feed.shop.currency_id = attribute(e, "id")?.unwrap_or_default();
            feed.shop.currency_rate = attribute(e, "rate")?.unwrap_or_default();
        }
        "category" => {
            feed.shop.category_id = attribute(e, "id")?.unwrap_or_default();
        }
        "offer" => {
            let id = attribute(e, "id")?.ok_or_else(|| anyhow!("offer without id"))?;
            let group_id = attribute(e, "group_id")?
                .ok_or_else(|| anyhow!("offer {id} without group_id"))?;
            let group_id = group_id
                .parse::<u32>()
                .with_context(|| format!("offer {id} has invalid group_id {group_id}"))?;
            let available = attribute(e, "available")?.is_some_and(|value| value == "true");
            *offer = Some(ParsedOffer {
                id,
                group_id,
                available,
                ..ParsedOffer::default()
            });
        }
        "param" if offer.is_some() => {
            *param_name = attribute(e, "name")?;
        }
        _ => {}
    }
    Ok(())
}

fn on_close(
    name: &str,
    parents: &[String],
    text: &str,
    feed: &mut ParsedFeed,
    offer: &mut Option<ParsedOffer>,
    param_name: &mut Option<String>,
) -> Result<()> {
    let parent = parents.last().map(String::as_str);
    if name == "offer" {
        let finished = offer
            .take()
            .ok_or_else(|| anyhow!("closing offer without an open offer"))?;
        feed.offers.push(finished);
        return Ok(());
    }
    if let Some(current) = offer.as_mut() {
        if parent != Some("offer") {
            return Ok(());
        }
        match name {
            "picture" => current.pictures.push(text.to_string()),
            "param" => {
                let key = param_name.take().unwrap_or_default();
                current.params.push((key, text.to_string()));
            }
            _ => current.fields.push((name.to_string(), text.to_string())),
        }
        return Ok(());
    }
    match (parent, name) {
        (Some("shop"), "name") => feed.shop.name = text.to_string(),
        (Some("shop"), "company") => feed.shop.company = text.to_string(),
        (Some("shop"), "url") => feed.shop.url = text.to_string(),
        (Some("categories"), "category") => feed.shop.category_label = text.to_string(),
        _ => {}
    }
    Ok(())
}

/// Resolve predefined entities and character references.
fn unescape(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let Some(end) = tail.find(';') else {
            out.push_str(tail);
            return out;
        };
        let entity = &tail[1..end];
        match resolve_entity(entity) {
            Some(ch) => out.push(ch),
            None => out.push_str(&tail[..=end]),
        }
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    out
}

fn resolve_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = entity.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescapes_entities_and_char_refs() {
        assert_eq!(unescape("a &amp; b"), "a & b");
        assert_eq!(unescape("&lt;p&gt;&#1040;&#x42;"), "<p>АB");
        assert_eq!(unescape("&unknown; &"), "&unknown; &");
    }

    #[test]
    fn reads_offer_fields_and_params() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<yml_catalog date="2024-05-01 08:30">
	<shop>
		<name>Shop &amp; Co</name>
		<company>CO</company>
		<url>https://shop/</url>
		<currencies>
			<currency id="UAH" rate="1"/>
		</currencies>
		<categories>
			<category id="40601">Bedding</category>
		</categories>
		<offers>
			<offer id="A1_main" available="true" group_id="1">
				<name>Set</name>
				<description><![CDATA[<h2>H</h2><p>a & b</p>]]></description>
				<picture>https://img/1.jpg?a=1&amp;b=2</picture>
				<param name="Kind">Euro</param>
			</offer>
		</offers>
	</shop>
</yml_catalog>
"#;
        let feed = read_feed(xml).unwrap();
        assert_eq!(feed.date, "2024-05-01 08:30");
        assert_eq!(feed.shop.name, "Shop & Co");
        assert_eq!(feed.shop.currency_rate, "1");
        assert_eq!(feed.shop.category_label, "Bedding");
        assert_eq!(feed.offers.len(), 1);

        let offer = &feed.offers[0];
        assert_eq!(offer.id, "A1_main");
        assert_eq!(offer.group_id, 1);
        assert!(offer.available);
        assert_eq!(offer.field("name"), Some("Set"));
        assert_eq!(offer.field("description"), Some("<h2>H</h2><p>a & b</p>"));
        assert_eq!(offer.pictures, vec!["https://img/1.jpg?a=1&b=2"]);
        assert_eq!(offer.param("Kind"), Some("Euro"));
    }

    #[test]
    fn rejects_offer_without_group_id() {
        let xml = r#"<yml_catalog><shop><offers><offer id="x"></offer></offers></shop></yml_catalog>"#;
        assert!(read_feed(xml).is_err());
    }
}
