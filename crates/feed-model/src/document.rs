use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::offer::Offer;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub id: String,
    pub rate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub label: String,
}

/// Fixed shop metadata emitted at the top of every feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopInfo {
    pub name: String,
    pub company: String,
    pub url: String,
    pub currency: Currency,
    pub category: Category,
}

impl Default for ShopInfo {
    fn default() -> Self {
        Self {
            name: "Ego Textile".to_string(),
            company: "EGO TEXTILE".to_string(),
            url: "https://ego-textile.com.ua/".to_string(),
            currency: Currency {
                id: "UAH".to_string(),
                rate: "1".to_string(),
            },
            category: Category {
                id: "40601".to_string(),
                label: "Комплекти постільної білизни".to_string(),
            },
        }
    }
}

/// A fully built feed, ready for serialization. Never mutated after build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    pub generated_at: NaiveDateTime,
    pub shop: ShopInfo,
    /// Group order, main offer first within each group.
    pub offers: Vec<Offer>,
}
