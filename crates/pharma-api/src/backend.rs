//! # Backend Trait
//!
//! The operations the dashboard needs from the pharmacy backend, as one
//! async trait. [`crate::HttpBackend`] is the real implementation;
//! [`MockPharmacyBackend`] is generated for tests.

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};

use pharma_core::{
    DashboardStats, HealthStatus, MedicineId, MedicineInput, MedicineRecord, NewSale, SaleSummary,
};

use crate::error::ClientResult;

/// Query parameters of `GET /inventory/medicines`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub skip: u32,
    pub limit: u32,
    /// Server-side name search. `None` fetches everything.
    pub search: Option<String>,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        CatalogQuery {
            skip: 0,
            limit: 100,
            search: None,
        }
    }
}

impl CatalogQuery {
    /// First page of `limit` records, unfiltered.
    pub fn first_page(limit: u32) -> Self {
        CatalogQuery {
            limit,
            ..Self::default()
        }
    }
}

#[automock]
#[async_trait]
pub trait PharmacyBackend: Send + Sync {
    /// Today's figures for the dashboard cards.
    async fn dashboard_stats(&self) -> ClientResult<DashboardStats>;

    /// The `limit` most recent sales, newest first.
    async fn recent_sales(&self, limit: u32) -> ClientResult<Vec<SaleSummary>>;

    /// One page of the medicine catalog.
    async fn list_medicines(&self, query: &CatalogQuery) -> ClientResult<Vec<MedicineRecord>>;

    /// A single medicine, or `ClientError::NotFound`.
    async fn get_medicine(&self, id: MedicineId) -> ClientResult<MedicineRecord>;

    async fn create_medicine(&self, medicine: &MedicineInput) -> ClientResult<MedicineRecord>;

    async fn update_medicine(
        &self,
        id: MedicineId,
        medicine: &MedicineInput,
    ) -> ClientResult<MedicineRecord>;

    async fn delete_medicine(&self, id: MedicineId) -> ClientResult<()>;

    /// Records a sale. The backend re-checks stock and decrements it.
    async fn create_sale(&self, sale: &NewSale) -> ClientResult<SaleSummary>;

    async fn health(&self) -> ClientResult<HealthStatus>;
}
