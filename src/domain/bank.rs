use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// Bank account registered for a company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub iban: Option<String>,
}

impl BankAccount {
    pub fn new(name: impl Into<String>, bank_name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            bank_name: bank_name.into(),
            account_number: String::new(),
            iban: None,
        }
    }

    /// Account number with everything but the last four characters masked.
    pub fn masked_number(&self) -> String {
        let chars: Vec<char> = self.account_number.chars().collect();
        let visible = chars.len().min(4);
        let hidden = chars.len() - visible;
        let mut masked = "•".repeat(hidden);
        masked.extend(&chars[hidden..]);
        masked
    }
}

impl Identifiable for BankAccount {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for BankAccount {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for BankAccount {
    fn display_label(&self) -> String {
        if self.bank_name.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.bank_name)
        }
    }
}

impl Searchable for BankAccount {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.bank_name.as_str(), self.account_number.as_str()]
    }
}
