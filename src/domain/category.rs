//! Domain types representing transaction categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::common::*;

/// Token the API uses in place of a missing parent reference.
pub const NO_PARENT: &str = "none";

/// Flat category record as delivered by the API.
///
/// `parent_id` is normalised on the way in: `null`, an empty string, and the
/// literal `"none"` all deserialize to `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryType,
    #[serde(default, deserialize_with = "deserialize_parent_ref")]
    pub parent_id: Option<String>,
}

impl CategoryRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: CategoryType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            parent_id: None,
        }
    }

    /// Sets the parent reference, applying the same normalisation as deserialization.
    pub fn with_parent(mut self, parent_id: impl AsRef<str>) -> Self {
        self.parent_id = normalize_parent_ref(Some(parent_id.as_ref()));
        self
    }

    /// Returns the parent id when it refers to another record.
    pub fn parent_ref(&self) -> Option<&str> {
        self.parent_id
            .as_deref()
            .filter(|value| !is_no_parent_token(value))
    }
}

impl Identifiable for CategoryRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for CategoryRecord {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for CategoryRecord {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }
}

impl Searchable for CategoryRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

/// Direction of money a category tracks. Each type has its own tree.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Inflow,
    Outflow,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Inflow => "inflow",
            CategoryType::Outflow => "outflow",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inflow" | "in" | "income" => Ok(CategoryType::Inflow),
            "outflow" | "out" | "expense" => Ok(CategoryType::Outflow),
            other => Err(format!("unknown category type `{other}`")),
        }
    }
}

fn is_no_parent_token(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NO_PARENT)
}

pub(crate) fn normalize_parent_ref(raw: Option<&str>) -> Option<String> {
    raw.filter(|value| !is_no_parent_token(value))
        .map(|value| value.trim().to_string())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

/// Parent ids arrive as strings, numbers, `null`, or the `"none"` token.
fn deserialize_parent_ref<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawId::Text(text)) => normalize_parent_ref(Some(&text)),
        Some(RawId::Number(number)) => Some(number.to_string()),
        None => None,
    })
}
