use std::fmt;

use serde::{Deserialize, Serialize};

/// Which bucket a reported item falls into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Found,
    MaybeFound,
    NotFound,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Found, Category::MaybeFound, Category::NotFound];

    /// Canonical key, as used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Found => "found",
            Category::MaybeFound => "maybe_found",
            Category::NotFound => "not_found",
        }
    }

    /// Look up a category by its canonical key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bullet line of model output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportedItem {
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ReportedItem {
    pub fn new(item: impl Into<String>) -> Self {
        Self { item: item.into(), details: None }
    }

    pub fn with_details(item: impl Into<String>, details: impl Into<String>) -> Self {
        Self { item: item.into(), details: Some(details.into()) }
    }
}

/// Items recovered from a model reply, grouped by category in order of appearance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseResult {
    pub found: Vec<ReportedItem>,
    pub maybe_found: Vec<ReportedItem>,
    pub not_found: Vec<ReportedItem>,
}

impl ParseResult {
    pub fn push(&mut self, category: Category, item: ReportedItem) {
        self.bucket_mut(category).push(item);
    }

    pub fn items(&self, category: Category) -> &[ReportedItem] {
        match category {
            Category::Found => &self.found,
            Category::MaybeFound => &self.maybe_found,
            Category::NotFound => &self.not_found,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<ReportedItem> {
        match category {
            Category::Found => &mut self.found,
            Category::MaybeFound => &mut self.maybe_found,
            Category::NotFound => &mut self.not_found,
        }
    }

    /// Every categorized item name, across all three categories.
    pub fn item_names(&self) -> impl Iterator<Item = &str> {
        self.found
            .iter()
            .chain(&self.maybe_found)
            .chain(&self.not_found)
            .map(|i| i.item.as_str())
    }

    pub fn len(&self) -> usize {
        self.found.len() + self.maybe_found.len() + self.not_found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Echo of a caller-requested target item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueriedItem {
    pub item: String,
}

/// Body returned by the analyze endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisResponse {
    pub queried_items_echoed: Vec<QueriedItem>,
    pub found: Vec<ReportedItem>,
    pub maybe_found: Vec<ReportedItem>,
    pub not_found: Vec<ReportedItem>,
    pub raw_output: String,
}

impl AnalysisResponse {
    /// Combine the caller's targets, the parsed categories, and the untouched model text.
    ///
    /// `queried_items_echoed` always mirrors `targets`, whatever the model said.
    pub fn assemble(targets: &[String], parsed: ParseResult, raw_output: impl Into<String>) -> Self {
        Self {
            queried_items_echoed: targets
                .iter()
                .map(|t| QueriedItem { item: t.clone() })
                .collect(),
            found: parsed.found,
            maybe_found: parsed.maybe_found,
            not_found: parsed.not_found,
            raw_output: raw_output.into(),
        }
    }
}
