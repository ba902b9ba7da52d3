//! Plan classification into the five display categories.
//!
//! Both presentation surfaces (terminal and document) use these categories,
//! so ordinals, symbols, labels and colors are defined once here.

use std::fmt;

use tracing::debug;

use super::change::{ACTION_CREATE, ACTION_DELETE, ACTION_UPDATE, ResourceChange};

/// Display category of a resource change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Resource will be created.
    #[default]
    Create,
    /// Resource will be destroyed.
    Destroy,
    /// Resource will be destroyed and recreated.
    Replace,
    /// Resource will be updated in place.
    Update,
    /// Imports, reads, no-ops and unrecognized actions.
    Other,
}

impl Category {
    /// All categories in ordinal order.
    pub const ALL: [Self; 5] = [
        Self::Create,
        Self::Destroy,
        Self::Replace,
        Self::Update,
        Self::Other,
    ];

    /// Number of categories.
    pub const COUNT: usize = Self::ALL.len();

    /// Returns the fixed ordinal (0..=4).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Create => 0,
            Self::Destroy => 1,
            Self::Replace => 2,
            Self::Update => 3,
            Self::Other => 4,
        }
    }

    /// Returns the category for an ordinal, wrapping out-of-range values.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    /// Returns the next category, wrapping after the last one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Returns the previous category, wrapping before the first one.
    #[must_use]
    pub const fn previous(self) -> Self {
        Self::from_index(self.index() + Self::COUNT - 1)
    }

    /// Returns the diff symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Create => "+",
            Self::Destroy => "-",
            Self::Replace => "-/+",
            Self::Update => "~",
            Self::Other => "",
        }
    }

    /// Returns the tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Destroy => "DESTROY",
            Self::Replace => "REPLACE",
            Self::Update => "UPDATE",
            Self::Other => "IMPORT",
        }
    }

    /// Returns the lowercase key used in CSS classes and CLI arguments.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Destroy => "destroy",
            Self::Replace => "replace",
            Self::Update => "update",
            Self::Other => "import",
        }
    }

    /// Returns the accent color used for tabs.
    #[must_use]
    pub const fn color(self) -> (u8, u8, u8) {
        match self {
            Self::Create => (0x00, 0xAF, 0x00),
            Self::Destroy => (0xD7, 0x00, 0x00),
            Self::Replace => (0xFF, 0xAF, 0x00),
            Self::Update => (0xAE, 0x00, 0xFF),
            Self::Other => (0x00, 0xAF, 0xFF),
        }
    }

    /// Returns the color for diff lines, `None` when lines stay untinted.
    #[must_use]
    pub const fn diff_color(self) -> Option<(u8, u8, u8)> {
        match self {
            Self::Other => None,
            _ => Some(self.color()),
        }
    }

    /// Returns the tab text, e.g. `CREATE (+ 3)` or `IMPORT (0)`.
    #[must_use]
    pub fn tab_title(self, count: usize) -> String {
        if self.symbol().is_empty() {
            format!("{} ({count})", self.label())
        } else {
            format!("{} ({} {count})", self.label(), self.symbol())
        }
    }

    /// Determines the category of a resource change.
    ///
    /// Checked in order: `delete, create` prefix, then the first token.
    #[must_use]
    pub fn of(change: &ResourceChange) -> Self {
        if change.is_replace() {
            return Self::Replace;
        }
        match change.primary_action() {
            ACTION_CREATE => Self::Create,
            ACTION_DELETE => Self::Destroy,
            ACTION_UPDATE => Self::Update,
            _ => Self::Other,
        }
    }

    /// Parses a category from its key or label, case-insensitively.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| {
            c.key().eq_ignore_ascii_case(name) || c.label().eq_ignore_ascii_case(name)
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Resource changes partitioned by category, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    lists: [Vec<ResourceChange>; Category::COUNT],
}

impl Buckets {
    /// Returns the changes of a category.
    #[must_use]
    pub fn get(&self, category: Category) -> &[ResourceChange] {
        &self.lists[category.index()]
    }

    /// Returns the number of changes in a category.
    #[must_use]
    pub fn len(&self, category: Category) -> usize {
        self.lists[category.index()].len()
    }

    /// Returns the total number of classified changes.
    #[must_use]
    pub fn total(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    /// Returns true if no change was classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Iterates over categories and their changes, in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[ResourceChange])> + '_ {
        Category::ALL
            .into_iter()
            .map(|category| (category, self.get(category)))
    }
}

/// Partitions resource changes into buckets.
///
/// Entries with no action tokens are skipped; every other entry lands in
/// exactly one bucket and input order is kept within each bucket.
#[must_use]
pub fn classify(changes: &[ResourceChange]) -> Buckets {
    let mut buckets = Buckets::default();

    for change in changes {
        if change.actions.is_empty() {
            debug!("Skipping {} with no actions", change.address);
            continue;
        }
        let category = Category::of(change);
        buckets.lists[category.index()].push(change.clone());
    }

    debug!(
        "Classified {} changes: {}",
        buckets.total(),
        Category::ALL
            .iter()
            .map(|c| format!("{c}={}", buckets.len(*c)))
            .collect::<Vec<_>>()
            .join(", ")
    );

    buckets
}
