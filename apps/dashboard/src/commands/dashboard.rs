//! # Dashboard Commands

use pharma_api::PharmacyBackend;
use pharma_core::{DashboardStats, HealthStatus, SaleSummary};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::state::{DashboardSession, DashboardState};

/// Stats cards plus the recent sales table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub recent_sales: Vec<SaleSummary>,
}

impl From<&DashboardSession> for DashboardView {
    fn from(session: &DashboardSession) -> Self {
        DashboardView {
            stats: session.stats().clone(),
            recent_sales: session.recent_sales().to_vec(),
        }
    }
}

/// Fetches today's stats and the recent sales together.
///
/// Both requests run concurrently; if either fails the previous figures
/// stay in the session and the error is remembered.
pub async fn refresh_dashboard(
    backend: &dyn PharmacyBackend,
    dashboard: &DashboardState,
    recent_limit: u32,
) -> AppResult<DashboardView> {
    debug!(recent_limit, "refresh_dashboard command");

    let result = tokio::try_join!(
        backend.dashboard_stats(),
        backend.recent_sales(recent_limit)
    );

    match result {
        Ok((stats, recent_sales)) => Ok(dashboard.with_mut(|d| {
            d.apply_refresh(stats, recent_sales);
            DashboardView::from(&*d)
        })),
        Err(err) => {
            let err = AppError::from(err);
            warn!(error = %err, "Dashboard refresh failed");
            dashboard.with_mut(|d| d.record_error(err.clone()));
            Err(err)
        }
    }
}

/// Asks the backend whether it is up.
pub async fn check_health(backend: &dyn PharmacyBackend) -> AppResult<HealthStatus> {
    debug!("check_health command");
    Ok(backend.health().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::sale_summary;
    use crate::error::ErrorCode;
    use pharma_api::{ClientError, MockPharmacyBackend};
    use pharma_core::Money;

    fn stats() -> DashboardStats {
        DashboardStats {
            todays_sales: Money::from_cents(124_550),
            items_sold_today: 37,
            low_stock_items: 4,
            purchase_orders: Money::from_cents(980_000),
        }
    }

    #[tokio::test]
    async fn test_refresh_stores_stats_and_sales() {
        let mut backend = MockPharmacyBackend::new();
        backend
            .expect_dashboard_stats()
            .once()
            .returning(|| Ok(stats()));
        backend
            .expect_recent_sales()
            .once()
            .withf(|limit| *limit == 5)
            .returning(|_| Ok(vec![sale_summary("INV-2", 5000, 2), sale_summary("INV-1", 900, 1)]));

        let state = DashboardState::default();
        let view = refresh_dashboard(&backend, &state, 5).await.unwrap();

        assert_eq!(view.stats.items_sold_today, 37);
        assert_eq!(view.recent_sales.len(), 2);
        state.with(|d| {
            assert!(d.is_loaded());
            assert!(d.last_error().is_none());
            assert_eq!(d.recent_sales()[0].invoice_no, "INV-2");
        });
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_figures() {
        let state = DashboardState::default();
        state.with_mut(|d| d.apply_refresh(stats(), vec![sale_summary("INV-1", 900, 1)]));

        let mut backend = MockPharmacyBackend::new();
        backend.expect_dashboard_stats().returning(|| {
            Err(ClientError::Rejected {
                status: 500,
                detail: Some("Database unavailable".into()),
            })
        });
        backend.expect_recent_sales().returning(|_| Ok(vec![]));

        let err = refresh_dashboard(&backend, &state, 5).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::TransportError);
        assert_eq!(err.message, "Database unavailable");
        state.with(|d| {
            assert_eq!(d.stats().items_sold_today, 37);
            assert_eq!(d.recent_sales().len(), 1);
            assert_eq!(d.last_error(), Some(&err));
        });
    }

    #[tokio::test]
    async fn test_check_health() {
        let mut backend = MockPharmacyBackend::new();
        backend.expect_health().returning(|| {
            Ok(HealthStatus {
                status: "ok".into(),
            })
        });

        assert!(check_health(&backend).await.unwrap().is_ok());
    }
}
