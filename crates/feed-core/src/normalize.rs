//! Per-group field cleanup and bilingual merge.

use std::collections::HashSet;

use feed_model::{FeedLabels, GroupFailure, ProductGroup, RawRow, columns};

/// Fields of one variant row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedVariant {
    /// Display label; never empty, never equal to the main subcategory and
    /// unique within its group.
    pub label: String,
    pub price: String,
    pub photos: Vec<String>,
}

/// Cleaned fields of one product group, ready for offer building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedGroup {
    pub product_code: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub country_of_origin: String,
    pub producer: String,
    pub fabric_type: String,
    pub density: String,
    pub subcategory: String,
    pub name_secondary: String,
    pub description_secondary: String,
    pub photos: Vec<String>,
    pub variants: Vec<NormalizedVariant>,
}

/// Normalize a product group.
///
/// The first primary row supplies the shared fields. Returns a validation
/// failure when the code, name or price is empty, and a build failure when
/// a cell carries text that cannot be written to the feed.
pub fn normalize_group(
    group: &ProductGroup,
    labels: &FeedLabels,
) -> Result<NormalizedGroup, GroupFailure> {
    let code = group.product_code.as_str();
    let missing = |column: &'static str| GroupFailure::Validation {
        product_code: code.to_string(),
        missing: column,
    };
    if code.is_empty() {
        return Err(missing(columns::PRODUCT_CODE));
    }
    let main = group
        .main_row()
        .ok_or_else(|| missing(columns::PRODUCT_CODE))?;
    let cells = Cells { product_code: code };

    let name = cells.text(main, columns::NAME)?;
    let description = cells.text(main, columns::DESCRIPTION)?;
    let price = clean_price(&cells.text(main, columns::PRICE)?);
    let country_of_origin = cells.text(main, columns::COUNTRY)?;
    let producer = cells.text(main, columns::PRODUCER)?;
    let fabric_type = cells.text(main, columns::FABRIC_TYPE)?;
    let density = density_digits(&cells.text(main, columns::DENSITY)?);
    let mut subcategory = cells.text(main, columns::SUBCATEGORY)?;

    let (name_secondary, description_secondary) = match &group.secondary {
        Some(row) => (
            cells.text(row, columns::NAME)?,
            cells.text(row, columns::DESCRIPTION)?,
        ),
        None => (String::new(), String::new()),
    };

    if name.is_empty() {
        return Err(missing(columns::NAME));
    }
    if price.is_empty() {
        return Err(missing(columns::PRICE));
    }
    if subcategory.is_empty() {
        subcategory = labels.primary_group.clone();
    }

    let photos = cells.photos(main)?;
    let mut variants = Vec::with_capacity(group.variant_rows().len());
    let mut taken: HashSet<String> = HashSet::from([subcategory.clone()]);
    for (idx, row) in group.variant_rows().iter().enumerate() {
        let mut label = cells.text(row, columns::SUBCATEGORY)?;
        if label.is_empty() || taken.contains(&label) {
            label = unused_fallback(labels, idx + 1, &taken);
        }
        taken.insert(label.clone());
        let variant_price = clean_price(&cells.text(row, columns::PRICE)?);
        variants.push(NormalizedVariant {
            label,
            price: if variant_price.is_empty() {
                price.clone()
            } else {
                variant_price
            },
            photos: cells.photos(row)?,
        });
    }

    Ok(NormalizedGroup {
        product_code: code.to_string(),
        name,
        description,
        price,
        country_of_origin,
        producer,
        fabric_type,
        density,
        subcategory,
        name_secondary,
        description_secondary,
        photos,
        variants,
    })
}

/// Positional fallback label, bumped past positions already taken in the group.
fn unused_fallback(labels: &FeedLabels, position: usize, taken: &HashSet<String>) -> String {
    (position..)
        .map(|n| labels.variant_fallback(n))
        .find(|label| !taken.contains(label))
        .unwrap_or_default()
}

/// Strip every literal `.0` from a trimmed price string.
///
/// Not a numeric parse: `"100.0"` becomes `"100"`, `"100.05"` becomes `"1005"`.
pub fn clean_price(raw: &str) -> String {
    raw.trim().replace(".0", "").trim().to_string()
}

/// First three digits of a density cell, in order.
pub fn density_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(3).collect()
}

/// Reads trimmed cells of one group and rejects text the feed cannot carry.
struct Cells<'a> {
    product_code: &'a str,
}

impl Cells<'_> {
    fn text(&self, row: &RawRow, column: &str) -> Result<String, GroupFailure> {
        let value = row.get(column).trim();
        if let Some(ch) = value.chars().find(|ch| !is_xml_char(*ch)) {
            return Err(GroupFailure::Build {
                product_code: self.product_code.to_string(),
                message: format!(
                    "column `{column}` contains U+{:04X}, which XML cannot carry",
                    u32::from(ch)
                ),
            });
        }
        Ok(value.to_string())
    }

    /// Non-blank photo URLs from slots 1 through 10, in slot order.
    fn photos(&self, row: &RawRow) -> Result<Vec<String>, GroupFailure> {
        let mut photos = Vec::new();
        for index in 1..=columns::PHOTO_SLOTS {
            let url = self.text(row, &columns::photo(index))?;
            if !url.is_empty() {
                photos.push(url);
            }
        }
        Ok(photos)
    }
}

fn is_xml_char(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}
