//! # Inventory Session
//!
//! State of the inventory page: the fetched catalog, the search box, the
//! status filter menu and the add/edit medicine form.

use pharma_core::inventory::{compute_stats, filter, status_counts};
use pharma_core::validation::{validate_medicine_form, validate_search_query};
use pharma_core::{
    InventoryStats, MedicineForm, MedicineId, MedicineInput, MedicineRecord, MedicineStatus,
    StatusCounts, StatusFilter,
};
use tracing::debug;

use crate::error::{AppError, AppResult};

/// The add/edit medicine form while it is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineFormState {
    /// `None` when adding a new medicine.
    pub editing: Option<MedicineId>,
    pub fields: MedicineForm,
}

/// A validated form, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSave {
    pub editing: Option<MedicineId>,
    pub input: MedicineInput,
}

#[derive(Debug, Default)]
pub struct InventorySession {
    catalog: Vec<MedicineRecord>,
    search: String,
    statuses: StatusFilter,
    form: Option<MedicineFormState>,
    busy: bool,
}

impl InventorySession {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Catalog and View
    // =========================================================================

    pub fn set_catalog(&mut self, catalog: Vec<MedicineRecord>) {
        debug!(count = catalog.len(), "Inventory catalog replaced");
        self.catalog = catalog;
    }

    pub fn catalog(&self) -> &[MedicineRecord] {
        &self.catalog
    }

    pub fn find(&self, id: MedicineId) -> Option<&MedicineRecord> {
        self.catalog.iter().find(|m| m.id == id)
    }

    pub fn set_search(&mut self, search: &str) -> AppResult<()> {
        self.search = validate_search_query(search)?;
        Ok(())
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Flips one status in the filter menu. Returns whether it is now selected.
    pub fn toggle_status(&mut self, status: MedicineStatus) -> bool {
        self.statuses.toggle(status)
    }

    pub fn set_statuses(&mut self, statuses: impl IntoIterator<Item = MedicineStatus>) {
        self.statuses = statuses.into_iter().collect();
    }

    pub fn statuses(&self) -> &StatusFilter {
        &self.statuses
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.statuses.clear();
    }

    /// Rows shown in the table: catalog order, search AND status filter.
    pub fn view(&self) -> Vec<&MedicineRecord> {
        filter(&self.catalog, &self.search, &self.statuses)
    }

    /// Summary cards, always over the whole catalog.
    pub fn stats(&self) -> InventoryStats {
        compute_stats(&self.catalog)
    }

    pub fn status_counts(&self) -> StatusCounts {
        status_counts(&self.catalog)
    }

    // =========================================================================
    // Medicine Form
    // =========================================================================

    pub fn open_new(&mut self) {
        self.form = Some(MedicineFormState {
            editing: None,
            fields: MedicineForm::default(),
        });
    }

    /// Opens the form prefilled from `record`.
    pub fn open_edit(&mut self, record: &MedicineRecord) {
        self.form = Some(MedicineFormState {
            editing: Some(record.id),
            fields: MedicineForm::from(record),
        });
    }

    pub fn close(&mut self) {
        self.form = None;
    }

    pub fn form(&self) -> Option<&MedicineFormState> {
        self.form.as_ref()
    }

    /// Editable fields of the open form.
    pub fn form_fields_mut(&mut self) -> AppResult<&mut MedicineForm> {
        if self.busy {
            return Err(AppError::busy("Saving"));
        }
        self.form
            .as_mut()
            .map(|f| &mut f.fields)
            .ok_or_else(|| AppError::validation("No medicine form is open"))
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Validates the open form and marks the session busy.
    pub fn begin_save(&mut self) -> AppResult<PendingSave> {
        if self.busy {
            return Err(AppError::busy("Saving"));
        }
        let form = self
            .form
            .as_ref()
            .ok_or_else(|| AppError::validation("No medicine form is open"))?;

        let input = validate_medicine_form(&form.fields)?;
        let pending = PendingSave {
            editing: form.editing,
            input,
        };
        self.busy = true;
        Ok(pending)
    }

    /// Marks the session busy for a delete.
    pub fn begin_delete(&mut self, id: MedicineId) -> AppResult<()> {
        if self.busy {
            return Err(AppError::busy("Saving"));
        }
        debug!(id, "Delete started");
        self.busy = true;
        Ok(())
    }

    /// Ends a save or delete. The form closes only on success.
    pub fn finish_write(&mut self, succeeded: bool) {
        self.busy = false;
        if succeeded {
            self.form = None;
        }
    }
}
