//! Companies (tenants) and their storage profiles.

use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// A tenant of the application. Every other collection is scoped to one company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default = "Company::default_currency")]
    pub currency: String,
}

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            currency: Self::default_currency(),
        }
    }

    pub fn with_contact(
        mut self,
        email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        self.email = email.into();
        self.phone = phone.into();
        self.address = address.into();
        self
    }

    fn default_currency() -> String {
        "USD".into()
    }
}

impl Identifiable for Company {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Company {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Searchable for Company {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.phone.as_str(), self.address.as_str()]
    }
}

/// Per-company account profile ("storage") that transactions are booked into.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StorageProfile {
    pub id: String,
    pub company_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub opening_balance: f64,
}

impl StorageProfile {
    pub fn new(company_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            company_id: company_id.into(),
            name: name.into(),
            description: String::new(),
            opening_balance: 0.0,
        }
    }
}

impl Identifiable for StorageProfile {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for StorageProfile {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Searchable for StorageProfile {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }
}
