use crate::ids::GroupId;

/// Named characteristic attached to an offer (`<param name="...">`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferParam {
    pub name: String,
    pub value: String,
}

impl OfferParam {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Fields that only the main offer of a group carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferKind {
    Main {
        /// Embedded HTML, emitted as raw character data.
        description: String,
        name_secondary: String,
        description_secondary: String,
        country_of_origin: String,
    },
    Variant,
}

/// One marketplace listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    pub id: String,
    pub group_id: GroupId,
    pub available: bool,
    pub kind: OfferKind,
    pub name: String,
    pub price: String,
    pub currency_id: String,
    pub category_id: String,
    pub vendor: String,
    pub vendor_code: String,
    pub pictures: Vec<String>,
    pub params: Vec<OfferParam>,
}

impl Offer {
    pub fn is_main(&self) -> bool {
        matches!(self.kind, OfferKind::Main { .. })
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|param| param.name == name)
            .map(|param| param.value.as_str())
    }
}
