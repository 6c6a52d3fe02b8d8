//! Raw catalog rows and product groups.

use std::collections::BTreeMap;

/// Column names read from the catalog sheets.
pub mod columns {
    pub const PRODUCT_CODE: &str = "Product Code";
    pub const NAME: &str = "Name";
    pub const DESCRIPTION: &str = "Description";
    pub const PRICE: &str = "Price";
    pub const COUNTRY: &str = "Country of manufacture";
    pub const PRODUCER: &str = "Producer";
    pub const FABRIC_TYPE: &str = "Fabric type";
    pub const DENSITY: &str = "Density";
    pub const SUBCATEGORY: &str = "Subcategory";

    /// Number of photo slots scanned per row.
    pub const PHOTO_SLOTS: usize = 10;

    /// Name of the photo column for a 1-based slot index.
    pub fn photo(index: usize) -> String {
        format!("Main photo {index}")
    }
}

/// One catalog entry in one language: column name to cell value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: BTreeMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell value for `column`, or `""` when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// Trimmed product code of this row.
    pub fn product_code(&self) -> &str {
        self.get(columns::PRODUCT_CODE).trim()
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|value| value.trim().is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// All primary rows sharing a product code plus the matched secondary row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductGroup {
    pub product_code: String,
    /// Source order; the first row is the main row.
    pub primary: Vec<RawRow>,
    pub secondary: Option<RawRow>,
}

impl ProductGroup {
    pub fn main_row(&self) -> Option<&RawRow> {
        self.primary.first()
    }

    pub fn variant_rows(&self) -> &[RawRow] {
        self.primary.get(1..).unwrap_or(&[])
    }
}
