//! Change-set data model.
//!
//! The raw shapes mirror the JSON the planning tool emits; they are turned
//! into [`ResourceChange`] values once and are read-only afterwards.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use super::value::PlanValue;

/// Action token that marks a resource as being created.
pub const ACTION_CREATE: &str = "create";
/// Action token that marks a resource as being deleted.
pub const ACTION_DELETE: &str = "delete";
/// Action token that marks a resource as being updated in place.
pub const ACTION_UPDATE: &str = "update";

/// Raw top-level plan document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlan {
    /// Resource changes, in plan order. Absent when nothing changes.
    #[serde(default)]
    pub resource_changes: Vec<RawResourceChange>,
}

/// Raw entry of `resource_changes`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResourceChange {
    /// Full resource address.
    pub address: String,
    /// Resource type.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Resource name.
    pub name: String,
    /// Change details.
    pub change: RawChange,
}

/// Raw `change` object of a resource.
#[derive(Debug, Clone, Deserialize)]
pub struct RawChange {
    /// Ordered action tokens.
    pub actions: Vec<String>,
    /// Attribute values before the change.
    #[serde(default)]
    pub before: Option<BTreeMap<String, PlanValue>>,
    /// Attribute values after the change.
    #[serde(default)]
    pub after: Option<BTreeMap<String, PlanValue>>,
    /// Attributes whose value is only known after apply.
    #[serde(default)]
    pub after_unknown: Option<BTreeMap<String, PlanValue>>,
}

/// Before/after state of a single attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChange {
    /// Value before the change, absent for new attributes.
    pub before: Option<PlanValue>,
    /// Value after the change, absent for removed or unknown attributes.
    pub after: Option<PlanValue>,
    /// Whether the final value is only known after apply.
    /// Only ever set when `after` is absent.
    pub known_after_apply: bool,
}

impl AttributeChange {
    /// Creates an attribute change.
    ///
    /// JSON `null` on either side counts as absent, and the unknown flag is
    /// dropped when an `after` value is present.
    #[must_use]
    pub fn new(before: Option<PlanValue>, after: Option<PlanValue>, known_after_apply: bool) -> Self {
        let before = before.filter(|v| !v.is_null());
        let after = after.filter(|v| !v.is_null());
        let known_after_apply = known_after_apply && after.is_none();
        Self {
            before,
            after,
            known_after_apply,
        }
    }
}

/// A resource change ready for classification and rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceChange {
    /// Full resource address (e.g. `module.vpc.aws_subnet.main`).
    pub address: String,
    /// Resource type (e.g. `aws_subnet`).
    pub resource_type: String,
    /// Resource name (e.g. `main`).
    pub name: String,
    /// Ordered action tokens.
    pub actions: Vec<String>,
    /// Attribute changes keyed by attribute name.
    pub attributes: BTreeMap<String, AttributeChange>,
}

impl ResourceChange {
    /// Creates a resource change with no attributes.
    #[must_use]
    pub fn new(address: &str, resource_type: &str, name: &str, actions: &[&str]) -> Self {
        Self {
            address: address.to_string(),
            resource_type: resource_type.to_string(),
            name: name.to_string(),
            actions: actions.iter().map(|a| (*a).to_string()).collect(),
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an attribute change.
    #[must_use]
    pub fn with_attribute(mut self, name: &str, change: AttributeChange) -> Self {
        self.attributes.insert(name.to_string(), change);
        self
    }

    /// Builds a resource change from its raw JSON shape.
    ///
    /// Attributes are the union of keys found in `before`, `after` and
    /// `after_unknown`; missing maps count as empty.
    #[must_use]
    pub fn from_raw(raw: RawResourceChange) -> Self {
        let RawChange {
            actions,
            before,
            after,
            after_unknown,
        } = raw.change;

        let mut before = before.unwrap_or_default();
        let mut after = after.unwrap_or_default();
        let unknown = after_unknown.unwrap_or_default();

        let names: BTreeSet<String> = before
            .keys()
            .chain(after.keys())
            .chain(unknown.keys())
            .cloned()
            .collect();

        let attributes = names
            .into_iter()
            .map(|name| {
                let known_after_apply = unknown.get(&name).is_some_and(PlanValue::is_true);
                let change =
                    AttributeChange::new(before.remove(&name), after.remove(&name), known_after_apply);
                (name, change)
            })
            .collect();

        Self {
            address: raw.address,
            resource_type: raw.resource_type,
            name: raw.name,
            actions,
            attributes,
        }
    }

    /// Returns the first action token, or an empty string when there is none.
    #[must_use]
    pub fn primary_action(&self) -> &str {
        self.actions.first().map_or("", String::as_str)
    }

    /// Returns true if the actions start with `delete` followed by `create`.
    #[must_use]
    pub fn is_replace(&self) -> bool {
        matches!(
            self.actions.as_slice(),
            [first, second, ..] if first == ACTION_DELETE && second == ACTION_CREATE
        )
    }
}

/// A parsed change-set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanDocument {
    /// Resource changes in plan order.
    pub resource_changes: Vec<ResourceChange>,
}

impl From<RawPlan> for PlanDocument {
    fn from(raw: RawPlan) -> Self {
        Self {
            resource_changes: raw
                .resource_changes
                .into_iter()
                .map(ResourceChange::from_raw)
                .collect(),
        }
    }
}
