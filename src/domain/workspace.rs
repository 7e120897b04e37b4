//! Snapshot of everything a single company owns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    bank::BankAccount,
    category::CategoryRecord,
    common::{find_by_id, find_by_id_mut},
    company::{Company, StorageProfile},
    customer::Customer,
    invoice::Invoice,
    method::PaymentMethod,
    user::User,
};

const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Local stand-in for the remote API's view of one company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(default = "Workspace::schema_version_default")]
    pub schema_version: u32,
    pub company: Company,
    #[serde(default)]
    pub storages: Vec<StorageProfile>,
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
    #[serde(default)]
    pub methods: Vec<PaymentMethod>,
    #[serde(default)]
    pub banks: Vec<BankAccount>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    pub updated_at: DateTime<Utc>,
}

impl Workspace {
    pub fn new(company: Company) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            company,
            storages: Vec::new(),
            categories: Vec::new(),
            methods: Vec::new(),
            banks: Vec::new(),
            customers: Vec::new(),
            users: Vec::new(),
            invoices: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    fn schema_version_default() -> u32 {
        CURRENT_SCHEMA_VERSION
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn category(&self, id: &str) -> Option<&CategoryRecord> {
        find_by_id(&self.categories, id)
    }

    pub fn category_mut(&mut self, id: &str) -> Option<&mut CategoryRecord> {
        find_by_id_mut(&mut self.categories, id)
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        find_by_id(&self.customers, id)
    }

    pub fn invoice(&self, id: &str) -> Option<&Invoice> {
        find_by_id(&self.invoices, id)
    }

    pub fn invoice_mut(&mut self, id: &str) -> Option<&mut Invoice> {
        find_by_id_mut(&mut self.invoices, id)
    }

    pub fn storage(&self, id: &str) -> Option<&StorageProfile> {
        find_by_id(&self.storages, id)
    }
}
