use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// A way money moves in or out: cash, card, wire, and so on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
}

impl PaymentMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
        }
    }
}

impl Identifiable for PaymentMethod {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for PaymentMethod {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Searchable for PaymentMethod {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}
