//! Pure planning of filter updates.

use crate::config::FilterConfig;
use crate::model::Versioned;

use super::{Filter, UpdateFilterRequest, ValidationError};

/// Outcome of planning an update against the current filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// The request changes nothing; the current filter stands.
    Unchanged(Filter),
    /// Write `filter` if the stored version is still `expected_version`.
    Write {
        filter: Filter,
        expected_version: u64,
    },
}

/// Compute the next state of `current` under `request`.
///
/// Added items are unioned in first, then each removal is checked in
/// ascending order. The first removal of an absent item fails the whole plan.
pub fn plan(
    current: Versioned<Filter>,
    request: &UpdateFilterRequest,
    config: &FilterConfig,
) -> Result<Plan, ValidationError> {
    if request.is_noop() {
        return Ok(Plan::Unchanged(current.data));
    }

    let filter = current.data;
    let description = match &request.description {
        Some(description) => Some(description.clone()),
        None => filter.description.clone(),
    };

    let mut items = filter.items.clone();
    items.extend(request.add_items.iter().cloned());

    for item in &request.remove_items {
        if !items.remove(item) {
            return Err(ValidationError::ItemNotPresent {
                item: item.clone(),
                filter_id: filter.id.clone(),
            });
        }
    }

    let next = filter.successor(description, items);
    check_limits(&next, config)?;

    Ok(Plan::Write {
        filter: next,
        expected_version: current.version,
    })
}

/// Enforce configured size limits on a filter.
pub fn check_limits(filter: &Filter, config: &FilterConfig) -> Result<(), ValidationError> {
    if filter.id().len() > config.max_id_length {
        return Err(ValidationError::InvalidFilterId {
            filter_id: filter.id().to_string(),
            reason: "exceeds the maximum id length",
        });
    }
    if filter.items().len() > config.max_items {
        return Err(ValidationError::TooManyItems {
            filter_id: filter.id().to_string(),
            count: filter.items().len(),
            max: config.max_items,
        });
    }
    Ok(())
}
