//! # Sale Commands
//!
//! The "New Sale" form: pick medicines, adjust quantities, submit.

use pharma_api::{CatalogQuery, PharmacyBackend};
use pharma_core::validation::validate_search_query;
use pharma_core::{
    Cart, CartLine, CartTotals, MedicineId, MedicineRecord, PaymentMethod, SaleSummary,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::AppResult;
use crate::state::{SaleState, SubmitOutcome};

/// Cart contents with totals, as shown under the sale form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView {
            items: cart.lines().to_vec(),
            totals: CartTotals::from(cart),
        }
    }
}

// =============================================================================
// Form Lifecycle
// =============================================================================

/// Loads the catalog and opens an empty sale form.
pub async fn open_sale(
    backend: &dyn PharmacyBackend,
    sale: &SaleState,
    page_size: u32,
) -> AppResult<CartView> {
    debug!(page_size, "open_sale command");

    let catalog = backend
        .list_medicines(&CatalogQuery::first_page(page_size))
        .await?;

    Ok(sale.with_mut(|s| {
        s.set_catalog(catalog);
        s.open();
        CartView::from(s.cart())
    }))
}

/// Re-reads the catalog snapshot the cart is checked against.
pub async fn refresh_sale_catalog(
    backend: &dyn PharmacyBackend,
    sale: &SaleState,
    page_size: u32,
) -> AppResult<usize> {
    debug!(page_size, "refresh_sale_catalog command");

    let catalog = backend
        .list_medicines(&CatalogQuery::first_page(page_size))
        .await?;
    let count = catalog.len();
    sale.with_mut(|s| s.set_catalog(catalog));
    Ok(count)
}

/// Discards the draft. A submission still in flight will be ignored.
pub fn cancel_sale(sale: &SaleState) {
    debug!("cancel_sale command");
    sale.with_mut(|s| s.cancel());
}

// =============================================================================
// Draft Editing
// =============================================================================

/// Medicines offered in the picker for `search`.
pub fn search_candidates(sale: &SaleState, search: &str) -> AppResult<Vec<MedicineRecord>> {
    let search = validate_search_query(search)?;
    Ok(sale.with(|s| s.candidates(&search).into_iter().cloned().collect()))
}

pub fn set_sale_details(
    sale: &SaleState,
    invoice_no: &str,
    customer_name: &str,
    payment_method: PaymentMethod,
) -> AppResult<()> {
    debug!(invoice_no, %payment_method, "set_sale_details command");
    sale.with_mut(|s| s.set_details(invoice_no, customer_name, payment_method))
}

/// Adds one unit of a medicine to the cart.
pub fn add_to_cart(sale: &SaleState, medicine_id: MedicineId) -> AppResult<CartView> {
    debug!(medicine_id, "add_to_cart command");

    sale.with_mut(|s| {
        s.add(medicine_id).inspect_err(|err| {
            warn!(medicine_id, error = %err, "Add to cart rejected");
        })?;
        Ok(CartView::from(s.cart()))
    })
}

/// Sets a cart line's quantity. Zero or less removes the line.
pub fn update_cart_item(
    sale: &SaleState,
    medicine_id: MedicineId,
    quantity: i64,
) -> AppResult<CartView> {
    debug!(medicine_id, quantity, "update_cart_item command");

    sale.with_mut(|s| {
        s.set_quantity(medicine_id, quantity).inspect_err(|err| {
            warn!(medicine_id, quantity, error = %err, "Quantity change rejected");
        })?;
        Ok(CartView::from(s.cart()))
    })
}

pub fn remove_from_cart(sale: &SaleState, medicine_id: MedicineId) -> AppResult<CartView> {
    debug!(medicine_id, "remove_from_cart command");

    sale.with_mut(|s| {
        s.remove(medicine_id)?;
        Ok(CartView::from(s.cart()))
    })
}

pub fn get_cart(sale: &SaleState) -> CartView {
    sale.with(|s| CartView::from(s.cart()))
}

// =============================================================================
// Submission
// =============================================================================

/// Sends the draft to the backend.
///
/// ## Flow
/// 1. Validate the draft and mark the session busy (no request on failure)
/// 2. POST the sale with the lock released
/// 3. Apply the answer unless the draft was cancelled meanwhile
/// 4. On success, re-fetch the catalog so stock figures are current
pub async fn submit_sale(
    backend: &dyn PharmacyBackend,
    sale: &SaleState,
    page_size: u32,
) -> AppResult<SaleSummary> {
    let (ticket, new_sale) = sale.with_mut(|s| s.begin_submit()).inspect_err(|err| {
        warn!(error = %err, "Sale submission rejected");
    })?;

    debug!(
        invoice_no = %new_sale.invoice_no,
        items = new_sale.items_count,
        total = %new_sale.total_amount,
        "submit_sale command"
    );

    let result = backend.create_sale(&new_sale).await;
    let outcome = sale.with_mut(|s| s.finish_submit(ticket, result.is_ok()));
    let summary = result?;

    info!(
        invoice_no = %summary.invoice_no,
        total = %summary.total_amount,
        "Sale recorded"
    );

    if outcome == SubmitOutcome::Applied {
        match backend
            .list_medicines(&CatalogQuery::first_page(page_size))
            .await
        {
            Ok(catalog) => sale.with_mut(|s| s.set_catalog(catalog)),
            Err(err) => warn!(error = %err, "Could not refresh catalog after sale"),
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{medicine, sale_summary};
    use crate::error::ErrorCode;
    use pharma_api::{ClientError, MockPharmacyBackend};
    use pharma_core::Money;

    fn catalog() -> Vec<MedicineRecord> {
        vec![
            medicine(1, "Paracetamol", 10, 500),
            medicine(2, "Cetirizine", 3, 1250),
            medicine(3, "Insulin", 0, 45000),
        ]
    }

    fn backend_with_catalog() -> MockPharmacyBackend {
        let mut backend = MockPharmacyBackend::new();
        backend
            .expect_list_medicines()
            .withf(|query| query.skip == 0 && query.limit == 100 && query.search.is_none())
            .returning(|_| Ok(catalog()));
        backend
    }

    async fn opened(backend: &MockPharmacyBackend) -> SaleState {
        let sale = SaleState::default();
        open_sale(backend, &sale, 100).await.unwrap();
        sale
    }

    #[tokio::test]
    async fn test_cart_editing_through_commands() {
        let backend = backend_with_catalog();
        let sale = opened(&backend).await;

        add_to_cart(&sale, 1).unwrap();
        add_to_cart(&sale, 1).unwrap();
        let view = add_to_cart(&sale, 2).unwrap();
        assert_eq!(view.totals.total_items, 3);
        assert_eq!(view.totals.total_amount, Money::from_cents(2250));

        let view = update_cart_item(&sale, 2, 3).unwrap();
        assert_eq!(view.totals.total_amount, Money::from_cents(4750));

        let err = update_cart_item(&sale, 2, 4).unwrap_err();
        assert_eq!(err.code, ErrorCode::StockExceeded);
        assert_eq!(get_cart(&sale).totals.total_items, 5);

        let view = update_cart_item(&sale, 1, 0).unwrap();
        assert_eq!(view.items.len(), 1);

        let view = remove_from_cart(&sale, 2).unwrap();
        assert!(view.items.is_empty());
    }

    #[tokio::test]
    async fn test_search_candidates_hides_out_of_stock() {
        let backend = backend_with_catalog();
        let sale = opened(&backend).await;

        let names: Vec<_> = search_candidates(&sale, "IN")
            .unwrap()
            .into_iter()
            .map(|m| m.medicine_name)
            .collect();
        assert_eq!(names, vec!["Cetirizine"]);
    }

    #[tokio::test]
    async fn test_submit_posts_cart_and_refreshes_catalog() {
        let mut backend = MockPharmacyBackend::new();
        backend
            .expect_list_medicines()
            .times(2)
            .returning(|_| Ok(catalog()));
        backend
            .expect_create_sale()
            .once()
            .withf(|sale| {
                sale.invoice_no == "INV-100"
                    && sale.items_count == 3
                    && sale.total_amount == Money::from_cents(2250)
                    && sale.items.len() == 2
                    && sale.payment_method == PaymentMethod::Upi
            })
            .returning(|sale| Ok(sale_summary(&sale.invoice_no, 2250, sale.items_count)));

        let sale = opened(&backend).await;
        set_sale_details(&sale, " INV-100 ", "Ravi", PaymentMethod::Upi).unwrap();
        add_to_cart(&sale, 1).unwrap();
        add_to_cart(&sale, 1).unwrap();
        add_to_cart(&sale, 2).unwrap();

        let summary = submit_sale(&backend, &sale, 100).await.unwrap();

        assert_eq!(summary.invoice_no, "INV-100");
        sale.with(|s| {
            assert!(!s.is_open());
            assert!(s.cart().is_empty());
        });
    }

    #[tokio::test]
    async fn test_empty_invoice_never_reaches_backend() {
        let mut backend = backend_with_catalog();
        backend.expect_create_sale().never();

        let sale = opened(&backend).await;
        set_sale_details(&sale, "   ", "Ravi", PaymentMethod::Cash).unwrap();
        add_to_cart(&sale, 1).unwrap();

        let err = submit_sale(&backend, &sale, 100).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        sale.with(|s| {
            assert!(!s.is_busy());
            assert_eq!(s.cart().quantity_of(1), 1);
        });
    }

    #[tokio::test]
    async fn test_empty_cart_never_reaches_backend() {
        let mut backend = backend_with_catalog();
        backend.expect_create_sale().never();

        let sale = opened(&backend).await;
        set_sale_details(&sale, "INV-1", "Ravi", PaymentMethod::Cash).unwrap();

        let err = submit_sale(&backend, &sale, 100).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_submit_while_in_flight_is_busy() {
        let mut backend = backend_with_catalog();
        backend.expect_create_sale().never();

        let sale = opened(&backend).await;
        set_sale_details(&sale, "INV-1", "Ravi", PaymentMethod::Cash).unwrap();
        add_to_cart(&sale, 1).unwrap();
        // First submission still waiting on the backend
        sale.with_mut(|s| s.begin_submit()).unwrap();

        let err = submit_sale(&backend, &sale, 100).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Busy);
    }

    #[tokio::test]
    async fn test_rejected_sale_keeps_draft() {
        let mut backend = backend_with_catalog();
        backend.expect_create_sale().once().returning(|_| {
            Err(ClientError::Rejected {
                status: 400,
                detail: Some("Insufficient stock for Paracetamol".into()),
            })
        });

        let sale = opened(&backend).await;
        set_sale_details(&sale, "INV-1", "Ravi", PaymentMethod::Cash).unwrap();
        add_to_cart(&sale, 1).unwrap();

        let err = submit_sale(&backend, &sale, 100).await.unwrap_err();

        assert_eq!(err.message, "Insufficient stock for Paracetamol");
        sale.with(|s| {
            assert!(s.is_open());
            assert!(!s.is_busy());
            assert_eq!(s.cart().quantity_of(1), 1);
        });
    }

    #[tokio::test]
    async fn test_response_after_cancel_is_ignored() {
        let sale = SaleState::default();
        let cancelled_meanwhile = sale.clone();

        let mut backend = MockPharmacyBackend::new();
        // Only the initial load; a stale answer triggers no refresh
        backend
            .expect_list_medicines()
            .once()
            .returning(|_| Ok(catalog()));
        backend.expect_create_sale().once().returning(move |sale| {
            cancelled_meanwhile.with_mut(|s| {
                s.cancel();
                s.open();
            });
            Ok(sale_summary(&sale.invoice_no, 500, 1))
        });

        open_sale(&backend, &sale, 100).await.unwrap();
        set_sale_details(&sale, "INV-1", "Ravi", PaymentMethod::Cash).unwrap();
        add_to_cart(&sale, 1).unwrap();

        submit_sale(&backend, &sale, 100).await.unwrap();

        sale.with(|s| {
            assert!(s.is_open());
            assert!(!s.is_busy());
            assert_eq!(s.draft().invoice_no, "");
        });
    }

    #[tokio::test]
    async fn test_cancel_discards_draft() {
        let backend = backend_with_catalog();
        let sale = opened(&backend).await;
        add_to_cart(&sale, 1).unwrap();

        cancel_sale(&sale);

        assert!(get_cart(&sale).items.is_empty());
        assert_eq!(
            add_to_cart(&sale, 1).unwrap_err().code,
            ErrorCode::ValidationError
        );
    }
}
