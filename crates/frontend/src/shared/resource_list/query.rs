//! Derived view: status filter, free-text search and sort over a snapshot
//!
//! Everything here is a pure function of its inputs. The controller keeps the
//! snapshot and the [`ListQuery`]; the view is recomputed from both on demand.

use contracts::domain::common::Resource;
use contracts::shared::metadata::FieldValue;
use std::cmp::Ordering;

/// Which records to show with respect to the soft-delete flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    All,
    /// Records whose flag is not `false` (collections without a flag show everything)
    #[default]
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    fn admits(&self, is_active: Option<bool>) -> bool {
        match self {
            Self::All => true,
            Self::Active => is_active != Some(false),
            Self::Inactive => is_active == Some(false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn is_ascending(&self) -> bool {
        matches!(self, Self::Ascending)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }
}

/// Local criteria applied to the snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub filter: StatusFilter,
    pub sort: SortSpec,
}

impl ListQuery {
    /// Empty search, active records, collection's default sort ascending
    pub fn for_resource<E: Resource>() -> Self {
        Self {
            search: String::new(),
            filter: StatusFilter::default(),
            sort: SortSpec::ascending(E::default_sort_field()),
        }
    }
}

/// Apply filter, then search, then sort.
pub fn derive_view<E: Resource>(snapshot: &[E], query: &ListQuery) -> Vec<E> {
    let mut items: Vec<E> = filter_by_search(
        snapshot
            .iter()
            .filter(|item| query.filter.admits(item.is_active())),
        &query.search,
    )
    .cloned()
    .collect();
    sort_items(&mut items, &query.sort);
    items
}

/// Records matching `search` case-insensitively; blank search keeps everything
pub fn filter_by_search<'a, E: Resource>(
    items: impl Iterator<Item = &'a E> + 'a,
    search: &str,
) -> impl Iterator<Item = &'a E> + 'a {
    let needle = search.trim().to_lowercase();
    items.filter(move |item| item.matches_search(&needle))
}

/// Stable sort by one field
pub fn sort_items<E: Resource>(items: &mut [E], sort: &SortSpec) {
    items.sort_by(|a, b| {
        let cmp = compare_values(&a.field_value(&sort.field), &b.field_value(&sort.field));
        if sort.direction.is_ascending() {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Ordering of two field values.
///
/// Text compares case-insensitively, numbers numerically, `false < true`.
/// A missing value ranks above any present value, so it lands last when
/// ascending and first when descending.
pub fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Text(x), FieldValue::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(y),
        (FieldValue::Bool(x), FieldValue::Bool(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn rank(value: &FieldValue) -> u8 {
    match value {
        FieldValue::Bool(_) => 0,
        FieldValue::Number(_) => 1,
        FieldValue::Text(_) => 2,
        FieldValue::Missing => 3,
    }
}

/// (active, inactive) totals for the summary cards; records without a flag count as active
pub fn active_counts<E: Resource>(snapshot: &[E]) -> (usize, usize) {
    let inactive = snapshot
        .iter()
        .filter(|item| item.is_active() == Some(false))
        .count();
    (snapshot.len() - inactive, inactive)
}
