//! Localized labels and shop metadata used while building offers.

use serde::{Deserialize, Serialize};

use crate::document::ShopInfo;

/// Fixed localized strings the builder writes into offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedLabels {
    /// Type label of a main offer whose subcategory is empty.
    pub primary_group: String,
    /// Prefix of the positional fallback label, rendered as `"{prefix} {n}"`.
    pub variant_prefix: String,
    pub description_heading: String,
    pub description_heading_secondary: String,
    pub fabric_param: String,
    pub density_param: String,
    pub kind_param: String,
}

impl Default for FeedLabels {
    fn default() -> Self {
        Self {
            primary_group: "Основной комплект".to_string(),
            variant_prefix: "Вариант".to_string(),
            description_heading: "Описание комплекта".to_string(),
            description_heading_secondary: "Опис комплекту".to_string(),
            fabric_param: "Тип тканини".to_string(),
            density_param: "Плотність(г/м2)".to_string(),
            kind_param: "Тип комплекта".to_string(),
        }
    }
}

impl FeedLabels {
    pub fn variant_fallback(&self, position: usize) -> String {
        format!("{} {position}", self.variant_prefix)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedOptions {
    pub shop: ShopInfo,
    pub labels: FeedLabels,
}
