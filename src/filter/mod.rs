//! Filters - named, versioned sets of items with a description.
//!
//! A [`Filter`] is an immutable value. Changes are expressed as an
//! [`UpdateFilterRequest`], turned into the next value by [`plan`], and
//! persisted by the service with the version that was read.

mod error;
mod planner;
mod request;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::Model;

pub use error::{UpdateError, ValidationError};
pub use planner::{check_limits, plan, Plan};
pub use request::UpdateFilterRequest;

/// A named set of unique items plus an optional description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "FilterDocument", from = "FilterDocument")]
pub struct Filter {
    id: String,
    description: Option<String>,
    items: BTreeSet<String>,
}

impl Filter {
    /// Build a filter from its parts. The id must be a valid filter id;
    /// duplicate items collapse.
    pub fn new<I, T>(
        id: impl Into<String>,
        description: Option<String>,
        items: I,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let id = id.into();
        validate_filter_id(&id)?;
        Ok(Self {
            id,
            description,
            items: items.into_iter().map(Into::into).collect(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Items in ascending order.
    pub fn items(&self) -> &BTreeSet<String> {
        &self.items
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.contains(item)
    }

    /// Same id, new contents. Only the planner produces successors.
    pub(crate) fn successor(&self, description: Option<String>, items: BTreeSet<String>) -> Self {
        Self {
            id: self.id.clone(),
            description,
            items,
        }
    }
}

impl Model for Filter {
    const COLLECTION: &'static str = "filters";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Check the shape of a filter id: lowercase ascii alphanumerics, `-`, `_`
/// and `.`, starting and ending with an alphanumeric.
pub fn validate_filter_id(id: &str) -> Result<(), ValidationError> {
    let invalid = |reason: &'static str| ValidationError::InvalidFilterId {
        filter_id: id.to_string(),
        reason,
    };

    let first = id.chars().next().ok_or_else(|| invalid("must not be empty"))?;
    let last = id.chars().last().unwrap_or(first);
    let alnum = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();

    if !alnum(first) || !alnum(last) {
        return Err(invalid("must start and end with a lowercase alphanumeric character"));
    }
    if !id.chars().all(|c| alnum(c) || matches!(c, '-' | '_' | '.')) {
        return Err(invalid(
            "may only contain lowercase alphanumeric characters, hyphens, underscores and dots",
        ));
    }
    Ok(())
}

/// Marker for the `"type"` discriminator in stored documents.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
enum DocumentType {
    #[default]
    #[serde(rename = "filter")]
    Filter,
}

/// Stored JSON shape of a filter.
#[derive(Serialize, Deserialize)]
struct FilterDocument {
    #[serde(rename = "type", default)]
    kind: DocumentType,
    filter_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    items: BTreeSet<String>,
}

impl From<Filter> for FilterDocument {
    fn from(filter: Filter) -> Self {
        Self {
            kind: DocumentType::Filter,
            filter_id: filter.id,
            description: filter.description,
            items: filter.items,
        }
    }
}

impl From<FilterDocument> for Filter {
    fn from(doc: FilterDocument) -> Self {
        Self {
            id: doc.filter_id,
            description: doc.description,
            items: doc.items,
        }
    }
}
