//! # Inventory View
//!
//! Search, status filtering and summary statistics over the fetched catalog.
//! Everything here is recomputed from the full catalog on each call; nothing
//! is cached between calls.
//!
//! ## View Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  GET /inventory/medicines ──► catalog: Vec<MedicineRecord>             │
//! │                                   │                                     │
//! │             ┌─────────────────────┼─────────────────────┐               │
//! │             ▼                     ▼                     ▼               │
//! │      compute_stats()     filter(search, statuses)   sellable_candidates │
//! │      ───────────────     ───────────────────────    ─────────────────── │
//! │      total / active /    name OR generic match      name OR generic     │
//! │      low / value         AND status in set          AND qty > 0         │
//! │                          (empty set = all)          AND not Expired     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{MedicineRecord, MedicineStatus};

// =============================================================================
// Statistics
// =============================================================================

/// The four summary cards above the inventory table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStats {
    /// Number of catalog records.
    pub total_items: usize,
    /// Records with status Active.
    pub active_stock: usize,
    /// Records with status Low Stock.
    pub low_stock: usize,
    /// Σ `quantity × cost_price` over every record, whatever its status.
    pub total_value: Money,
}

/// Computes the summary statistics for a catalog.
///
/// Uses the backend-assigned `status` as-is.
pub fn compute_stats(catalog: &[MedicineRecord]) -> InventoryStats {
    catalog.iter().fold(
        InventoryStats {
            total_items: catalog.len(),
            ..InventoryStats::default()
        },
        |mut stats, medicine| {
            match medicine.status {
                MedicineStatus::Active => stats.active_stock += 1,
                MedicineStatus::LowStock => stats.low_stock += 1,
                MedicineStatus::Expired | MedicineStatus::OutOfStock => {}
            }
            stats.total_value += medicine.stock_value();
            stats
        },
    )
}

/// Per-status record counts, shown next to each option of the filter menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub active: usize,
    pub low_stock: usize,
    pub expired: usize,
    pub out_of_stock: usize,
}

impl StatusCounts {
    pub fn get(&self, status: MedicineStatus) -> usize {
        match status {
            MedicineStatus::Active => self.active,
            MedicineStatus::LowStock => self.low_stock,
            MedicineStatus::Expired => self.expired,
            MedicineStatus::OutOfStock => self.out_of_stock,
        }
    }
}

pub fn status_counts(catalog: &[MedicineRecord]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for medicine in catalog {
        match medicine.status {
            MedicineStatus::Active => counts.active += 1,
            MedicineStatus::LowStock => counts.low_stock += 1,
            MedicineStatus::Expired => counts.expired += 1,
            MedicineStatus::OutOfStock => counts.out_of_stock += 1,
        }
    }
    counts
}

// =============================================================================
// Status Filter
// =============================================================================

/// The set of statuses selected in the filter menu.
///
/// An empty set means "no filter": every record passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFilter {
    selected: BTreeSet<MedicineStatus>,
}

impl StatusFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `status` if unselected, unselects it otherwise.
    ///
    /// Returns whether the status is selected afterwards.
    pub fn toggle(&mut self, status: MedicineStatus) -> bool {
        if self.selected.remove(&status) {
            false
        } else {
            self.selected.insert(status);
            true
        }
    }

    pub fn insert(&mut self, status: MedicineStatus) {
        self.selected.insert(status);
    }

    pub fn remove(&mut self, status: MedicineStatus) {
        self.selected.remove(&status);
    }

    pub fn contains(&self, status: MedicineStatus) -> bool {
        self.selected.contains(&status)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selected statuses in menu order.
    pub fn iter(&self) -> impl Iterator<Item = MedicineStatus> + '_ {
        self.selected.iter().copied()
    }

    /// Whether a record with `status` passes the filter.
    pub fn matches(&self, status: MedicineStatus) -> bool {
        self.selected.is_empty() || self.selected.contains(&status)
    }
}

impl FromIterator<MedicineStatus> for StatusFilter {
    fn from_iter<I: IntoIterator<Item = MedicineStatus>>(iter: I) -> Self {
        StatusFilter {
            selected: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Search
// =============================================================================

/// A lowercased search term, prepared once per filter pass.
struct SearchTerm(String);

impl SearchTerm {
    fn new(term: &str) -> Self {
        SearchTerm(term.to_lowercase())
    }

    /// Substring match against `medicine_name` or `generic_name`, each field
    /// on its own. Whitespace is part of the term; only an empty term
    /// matches everything.
    fn matches(&self, medicine: &MedicineRecord) -> bool {
        self.0.is_empty()
            || medicine.medicine_name.to_lowercase().contains(&self.0)
            || medicine.generic_name.to_lowercase().contains(&self.0)
    }
}

/// Records matching both the search term and the status filter, in catalog
/// order.
///
/// ## Example
/// ```rust
/// use pharma_core::inventory::{filter, StatusFilter};
///
/// // An empty search and an empty filter keep the whole catalog.
/// assert!(filter(&[], "", &StatusFilter::new()).is_empty());
/// ```
pub fn filter<'a>(
    catalog: &'a [MedicineRecord],
    search: &str,
    statuses: &StatusFilter,
) -> Vec<&'a MedicineRecord> {
    let term = SearchTerm::new(search);
    catalog
        .iter()
        .filter(|m| term.matches(m) && statuses.matches(m.status))
        .collect()
}

/// Records the sale form may offer for `search`.
///
/// Zero-stock and expired records are always excluded, even on an exact
/// name match.
pub fn sellable_candidates<'a>(
    catalog: &'a [MedicineRecord],
    search: &str,
) -> Vec<&'a MedicineRecord> {
    let term = SearchTerm::new(search);
    catalog
        .iter()
        .filter(|m| m.is_sellable() && term.matches(m))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
