//! # Dashboard Session
//!
//! Today's figures and the recent sales list, as last fetched.

use pharma_core::{DashboardStats, SaleSummary};

use crate::error::AppError;

#[derive(Debug, Default)]
pub struct DashboardSession {
    stats: DashboardStats,
    recent_sales: Vec<SaleSummary>,
    last_error: Option<AppError>,
    loaded: bool,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a successful refresh and clears the last error.
    pub fn apply_refresh(&mut self, stats: DashboardStats, recent_sales: Vec<SaleSummary>) {
        self.stats = stats;
        self.recent_sales = recent_sales;
        self.last_error = None;
        self.loaded = true;
    }

    /// Remembers a failed refresh. Previously loaded figures are kept.
    pub fn record_error(&mut self, error: AppError) {
        self.last_error = Some(error);
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    pub fn recent_sales(&self) -> &[SaleSummary] {
        &self.recent_sales
    }

    pub fn last_error(&self) -> Option<&AppError> {
        self.last_error.as_ref()
    }

    /// Whether at least one refresh has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
