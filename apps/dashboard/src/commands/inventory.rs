//! # Inventory Commands
//!
//! Catalog table with search and status filter, plus the add/edit/delete
//! medicine form. Every successful write re-fetches the catalog.

use pharma_api::{CatalogQuery, PharmacyBackend};
use pharma_core::{
    InventoryStats, MedicineForm, MedicineId, MedicineRecord, MedicineStatus, StatusCounts,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::state::{InventorySession, InventoryState};

/// Everything the inventory page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryView {
    /// Rows after search and status filter, in catalog order.
    pub medicines: Vec<MedicineRecord>,
    /// Computed over the whole catalog, not the filtered rows.
    pub stats: InventoryStats,
    pub counts: StatusCounts,
    pub search: String,
    pub statuses: Vec<MedicineStatus>,
}

impl From<&InventorySession> for InventoryView {
    fn from(session: &InventorySession) -> Self {
        InventoryView {
            medicines: session.view().into_iter().cloned().collect(),
            stats: session.stats(),
            counts: session.status_counts(),
            search: session.search().to_string(),
            statuses: session.statuses().iter().collect(),
        }
    }
}

// =============================================================================
// Catalog View
// =============================================================================

/// Fetches the catalog and returns the filtered view.
pub async fn refresh_inventory(
    backend: &dyn PharmacyBackend,
    inventory: &InventoryState,
    page_size: u32,
) -> AppResult<InventoryView> {
    debug!(page_size, "refresh_inventory command");

    let catalog = backend
        .list_medicines(&CatalogQuery::first_page(page_size))
        .await?;

    Ok(inventory.with_mut(|s| {
        s.set_catalog(catalog);
        InventoryView::from(&*s)
    }))
}

/// Replaces the search term and status selection. An empty selection shows
/// every status.
pub fn apply_filters(
    inventory: &InventoryState,
    search: &str,
    statuses: &[MedicineStatus],
) -> AppResult<InventoryView> {
    debug!(search, ?statuses, "apply_filters command");

    inventory.with_mut(|s| {
        s.set_search(search)?;
        s.set_statuses(statuses.iter().copied());
        Ok(InventoryView::from(&*s))
    })
}

/// Flips one entry of the status filter menu.
pub fn toggle_status_filter(inventory: &InventoryState, status: MedicineStatus) -> InventoryView {
    debug!(%status, "toggle_status_filter command");

    inventory.with_mut(|s| {
        s.toggle_status(status);
        InventoryView::from(&*s)
    })
}

pub fn clear_filters(inventory: &InventoryState) -> InventoryView {
    inventory.with_mut(|s| {
        s.clear_filters();
        InventoryView::from(&*s)
    })
}

// =============================================================================
// Medicine Form
// =============================================================================

/// Opens an empty "Add Medicine" form.
pub fn open_new_medicine(inventory: &InventoryState) -> AppResult<()> {
    debug!("open_new_medicine command");

    inventory.with_mut(|s| {
        if s.is_busy() {
            return Err(AppError::busy("Saving"));
        }
        s.open_new();
        Ok(())
    })
}

/// Opens the edit form prefilled with the backend's current record.
pub async fn open_edit_medicine(
    backend: &dyn PharmacyBackend,
    inventory: &InventoryState,
    medicine_id: MedicineId,
) -> AppResult<MedicineForm> {
    debug!(medicine_id, "open_edit_medicine command");

    let record = backend.get_medicine(medicine_id).await?;

    inventory.with_mut(|s| {
        if s.is_busy() {
            return Err(AppError::busy("Saving"));
        }
        s.open_edit(&record);
        Ok(MedicineForm::from(&record))
    })
}

/// Edits the raw text of the open form.
pub fn update_medicine_form<F>(inventory: &InventoryState, edit: F) -> AppResult<()>
where
    F: FnOnce(&mut MedicineForm),
{
    inventory.with_mut(|s| {
        edit(s.form_fields_mut()?);
        Ok(())
    })
}

pub fn close_medicine_form(inventory: &InventoryState) {
    inventory.with_mut(|s| s.close());
}

// =============================================================================
// Writes
// =============================================================================

/// Validates and sends the open form: create when adding, update when
/// editing. The form stays open on any error.
pub async fn save_medicine(
    backend: &dyn PharmacyBackend,
    inventory: &InventoryState,
    page_size: u32,
) -> AppResult<MedicineRecord> {
    let pending = inventory.with_mut(|s| s.begin_save()).inspect_err(|err| {
        warn!(error = %err, "Medicine form rejected");
    })?;

    debug!(
        editing = ?pending.editing,
        medicine_name = %pending.input.medicine_name,
        "save_medicine command"
    );

    let result = match pending.editing {
        Some(id) => backend.update_medicine(id, &pending.input).await,
        None => backend.create_medicine(&pending.input).await,
    };
    inventory.with_mut(|s| s.finish_write(result.is_ok()));
    let saved = result?;

    info!(
        id = saved.id,
        medicine_name = %saved.medicine_name,
        created = pending.editing.is_none(),
        "Medicine saved"
    );

    reload_after_write(backend, inventory, page_size).await;
    Ok(saved)
}

/// Deletes a medicine, then re-fetches the catalog.
pub async fn delete_medicine(
    backend: &dyn PharmacyBackend,
    inventory: &InventoryState,
    medicine_id: MedicineId,
    page_size: u32,
) -> AppResult<()> {
    inventory.with_mut(|s| s.begin_delete(medicine_id))?;
    debug!(medicine_id, "delete_medicine command");

    let result = backend.delete_medicine(medicine_id).await;
    inventory.with_mut(|s| s.finish_write(result.is_ok()));
    result?;

    info!(medicine_id, "Medicine deleted");

    reload_after_write(backend, inventory, page_size).await;
    Ok(())
}

/// The write already succeeded, so a failed reload only leaves the table
/// stale until the next refresh.
async fn reload_after_write(
    backend: &dyn PharmacyBackend,
    inventory: &InventoryState,
    page_size: u32,
) {
    match backend
        .list_medicines(&CatalogQuery::first_page(page_size))
        .await
    {
        Ok(catalog) => inventory.with_mut(|s| s.set_catalog(catalog)),
        Err(err) => warn!(error = %err, "Could not refresh catalog after write"),
    }
}
