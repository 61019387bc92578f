use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{validate_filter_id, ValidationError};

/// A requested change to an existing filter.
///
/// `description: None` leaves the description alone. Items listed in
/// `remove_items` must be present in the filter when the update is planned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFilterRequest {
    pub filter_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub add_items: BTreeSet<String>,
    #[serde(default)]
    pub remove_items: BTreeSet<String>,
}

impl UpdateFilterRequest {
    pub fn new(filter_id: impl Into<String>) -> Self {
        Self {
            filter_id: filter_id.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn add<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.add_items.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn remove<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.remove_items.extend(items.into_iter().map(Into::into));
        self
    }

    /// True when the request changes nothing.
    pub fn is_noop(&self) -> bool {
        self.description.is_none() && self.add_items.is_empty() && self.remove_items.is_empty()
    }

    /// Caller-facing checks that need no stored state: a well-formed id and
    /// disjoint add/remove sets.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_filter_id(&self.filter_id)?;
        if let Some(item) = self.add_items.intersection(&self.remove_items).next() {
            return Err(ValidationError::OverlappingItems {
                item: item.clone(),
                filter_id: self.filter_id.clone(),
            });
        }
        Ok(())
    }
}
