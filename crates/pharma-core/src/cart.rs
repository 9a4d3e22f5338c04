//! # Sale Cart
//!
//! The list of medicines being sold in the open sale form.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  User Action              Method                  Stock Check           │
//! │  ───────────              ──────                  ───────────           │
//! │                                                                         │
//! │  Click candidate ────────► add(&medicine) ──────► in_cart + 1 <= stock │
//! │                                                   total exact on wire   │
//! │                                                                         │
//! │  Edit quantity ──────────► set_quantity() ──────► qty <= catalog stock │
//! │                            (qty <= 0 removes)                           │
//! │                                                                         │
//! │  Click remove ───────────► remove(id) ──────────► none (no-op if absent)│
//! │                                                                         │
//! │  Cancel / sale done ─────► clear() ─────────────► none                 │
//! │                                                                         │
//! │  Every failing call leaves the cart exactly as it was.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by medicine id and keep insertion order
//! - Every line has `quantity >= 1`
//! - `quantity <= medicine.quantity` for the catalog snapshot the line was
//!   last checked against

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{MedicineId, MedicineRecord, SaleItemRequest};

/// A medicine in the cart with the number of units being sold.
///
/// `medicine` is the record as it was when first added; its `mrp` is the
/// price charged for this line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub medicine: MedicineRecord,
    pub quantity: u32,
}

impl CartLine {
    /// `mrp × quantity`
    #[inline]
    pub fn line_total(&self) -> Money {
        self.medicine.mrp.multiply_quantity(self.quantity)
    }

    #[inline]
    pub fn medicine_id(&self) -> MedicineId {
        self.medicine.id
    }
}

/// The sale cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Lines in the order they were added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up the line for a medicine.
    pub fn get(&self, medicine_id: MedicineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.medicine.id == medicine_id)
    }

    /// Units of a medicine currently in the cart (0 if absent).
    pub fn quantity_of(&self, medicine_id: MedicineId) -> u32 {
        self.get(medicine_id).map_or(0, |l| l.quantity)
    }

    /// Adds one unit of `medicine`.
    ///
    /// ## Behavior
    /// - Already in cart: quantity + 1, if that still fits `medicine.quantity`
    /// - Not in cart: new line with quantity 1, if `medicine.quantity >= 1`
    ///
    /// `medicine` must be the current catalog record; its `quantity` is the
    /// ceiling checked here.
    ///
    /// ## Returns
    /// The line's new quantity, or `StockExceeded` / `AmountTooLarge` with
    /// the cart unchanged.
    pub fn add(&mut self, medicine: &MedicineRecord) -> CoreResult<u32> {
        let current = self.quantity_of(medicine.id);
        let Some(requested) = current.checked_add(1).filter(|q| *q <= medicine.quantity) else {
            return Err(CoreError::StockExceeded {
                medicine: medicine.medicine_name.clone(),
                available: medicine.quantity,
                requested: i64::from(current) + 1,
            });
        };

        let priced = self.get(medicine.id).map_or(medicine, |l| &l.medicine);
        self.ensure_total_fits(priced, requested)?;

        match self.lines.iter_mut().find(|l| l.medicine.id == medicine.id) {
            Some(line) => line.quantity = requested,
            None => self.lines.push(CartLine {
                medicine: medicine.clone(),
                quantity: requested,
            }),
        }

        Ok(requested)
    }

    /// Removes a medicine from the cart.
    ///
    /// Absent ids are a no-op, not an error. Returns whether a line was removed.
    pub fn remove(&mut self, medicine_id: MedicineId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.medicine.id != medicine_id);
        self.lines.len() != before
    }

    /// Sets the quantity of a line, checked against the current catalog.
    ///
    /// ## Behavior
    /// ```text
    /// new_quantity <= 0          → remove the line
    /// id not in catalog          → StockExceeded (0 available)
    /// new_quantity > stock       → StockExceeded, line unchanged
    /// id not in cart             → no-op
    /// total not exact on wire    → AmountTooLarge, line unchanged
    /// otherwise                  → line.quantity = new_quantity
    /// ```
    ///
    /// `catalog` should be the latest fetched snapshot: stock may have moved
    /// since the line was added.
    pub fn set_quantity(
        &mut self,
        medicine_id: MedicineId,
        new_quantity: i64,
        catalog: &[MedicineRecord],
    ) -> CoreResult<()> {
        if new_quantity <= 0 {
            self.remove(medicine_id);
            return Ok(());
        }

        let Some(current) = catalog.iter().find(|m| m.id == medicine_id) else {
            let medicine = self
                .get(medicine_id)
                .map(|l| l.medicine.medicine_name.clone())
                .unwrap_or_else(|| format!("medicine #{medicine_id}"));
            return Err(CoreError::StockExceeded {
                medicine,
                available: 0,
                requested: new_quantity,
            });
        };

        let quantity = match u32::try_from(new_quantity) {
            Ok(q) if q <= current.quantity => q,
            _ => {
                return Err(CoreError::StockExceeded {
                    medicine: current.medicine_name.clone(),
                    available: current.quantity,
                    requested: new_quantity,
                })
            }
        };

        let Some(index) = self.lines.iter().position(|l| l.medicine.id == medicine_id) else {
            return Ok(());
        };
        self.ensure_total_fits(&self.lines[index].medicine, quantity)?;
        self.lines[index].quantity = quantity;

        Ok(())
    }

    /// Fails unless the cart total, with `medicine`'s line at `quantity`,
    /// is still an exact wire amount.
    fn ensure_total_fits(&self, medicine: &MedicineRecord, quantity: u32) -> CoreResult<()> {
        let mut replaced = false;
        let mut total = Some(Money::zero());

        for line in &self.lines {
            let qty = if line.medicine.id == medicine.id {
                replaced = true;
                quantity
            } else {
                line.quantity
            };
            let line_total = line.medicine.mrp.checked_multiply_quantity(qty);
            total = total.zip(line_total).and_then(|(t, l)| t.checked_add(l));
        }
        if !replaced {
            let line_total = medicine.mrp.checked_multiply_quantity(quantity);
            total = total.zip(line_total).and_then(|(t, l)| t.checked_add(l));
        }

        match total {
            Some(_) => Ok(()),
            None => Err(CoreError::AmountTooLarge {
                medicine: medicine.medicine_name.clone(),
            }),
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Σ `mrp × quantity` over all lines, recomputed on every call.
    ///
    /// `add` and `set_quantity` keep this exact on the wire; a cart built
    /// any other way saturates instead of overflowing.
    pub fn total_amount(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Σ `quantity` over all lines.
    pub fn total_item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Number of distinct medicines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The `items` array of a create-sale request.
    pub fn sale_items(&self) -> Vec<SaleItemRequest> {
        self.lines
            .iter()
            .map(|l| SaleItemRequest {
                medicine_id: l.medicine.id,
                quantity: l.quantity,
            })
            .collect()
    }
}

/// Cart totals summary for responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_items: u64,
    pub total_amount: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_items: cart.total_item_count(),
            total_amount: cart.total_amount(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MedicineStatus;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn medicine(id: MedicineId, name: &str, quantity: u32, mrp_cents: i64) -> MedicineRecord {
        MedicineRecord {
            id,
            medicine_name: name.to_string(),
            generic_name: format!("{name} generic"),
            category: "General".to_string(),
            batch_no: format!("B-{id}"),
            expiry_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            quantity,
            cost_price: Money::from_cents(mrp_cents / 2),
            mrp: Money::from_cents(mrp_cents),
            supplier: "MedSupply".to_string(),
            status: MedicineStatus::Active,
        }
    }

    #[test]
    fn test_add_four_times_totals_twenty() {
        let paracetamol = medicine(1, "Paracetamol", 10, 500);
        let mut cart = Cart::new();

        for _ in 0..4 {
            cart.add(&paracetamol).unwrap();
        }

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of(1), 4);
        assert_eq!(cart.total_amount(), Money::from_cents(2000));
        assert_eq!(cart.total_item_count(), 4);
    }

    #[test]
    fn test_add_beyond_stock_fails_and_keeps_quantity() {
        let paracetamol = medicine(1, "Paracetamol", 3, 500);
        let mut cart = Cart::new();

        for expected in 1..=3 {
            assert_eq!(cart.add(&paracetamol).unwrap(), expected);
        }
        let before = cart.clone();

        let err = cart.add(&paracetamol).unwrap_err();
        assert_eq!(
            err,
            CoreError::StockExceeded {
                medicine: "Paracetamol".to_string(),
                available: 3,
                requested: 4,
            }
        );
        assert_eq!(cart, before);
        assert_eq!(cart.quantity_of(1), 3);
    }

    #[test]
    fn test_add_zero_stock_medicine_fails() {
        let mut cart = Cart::new();
        let result = cart.add(&medicine(9, "Insulin", 0, 45000));

        assert!(matches!(
            result,
            Err(CoreError::StockExceeded { available: 0, .. })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&medicine(2, "B", 5, 100)).unwrap();
        cart.add(&medicine(1, "A", 5, 100)).unwrap();
        cart.add(&medicine(2, "B", 5, 100)).unwrap();

        let ids: Vec<_> = cart.lines().iter().map(CartLine::medicine_id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(&medicine(1, "A", 5, 100)).unwrap();
        let before = cart.clone();

        assert!(!cart.remove(42));
        assert_eq!(cart, before);

        assert!(cart.remove(1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_zero_or_negative_removes() {
        let catalog = vec![medicine(1, "A", 5, 100), medicine(2, "B", 5, 100)];
        let mut cart = Cart::new();
        cart.add(&catalog[0]).unwrap();
        cart.add(&catalog[1]).unwrap();

        cart.set_quantity(1, 0, &catalog).unwrap();
        assert!(cart.get(1).is_none());

        cart.set_quantity(2, -3, &catalog).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_checks_current_catalog() {
        let added = medicine(1, "Amoxicillin", 10, 1200);
        let mut cart = Cart::new();
        cart.add(&added).unwrap();

        // Stock dropped to 4 since the line was added
        let refreshed = vec![medicine(1, "Amoxicillin", 4, 1200)];

        let err = cart.set_quantity(1, 5, &refreshed).unwrap_err();
        assert!(matches!(
            err,
            CoreError::StockExceeded {
                available: 4,
                requested: 5,
                ..
            }
        ));
        assert_eq!(cart.quantity_of(1), 1);

        cart.set_quantity(1, 4, &refreshed).unwrap();
        assert_eq!(cart.quantity_of(1), 4);
    }

    #[test]
    fn test_set_quantity_for_medicine_missing_from_catalog() {
        let mut cart = Cart::new();
        cart.add(&medicine(1, "Ibuprofen", 10, 300)).unwrap();

        let err = cart.set_quantity(1, 2, &[]).unwrap_err();
        assert_eq!(
            err,
            CoreError::StockExceeded {
                medicine: "Ibuprofen".to_string(),
                available: 0,
                requested: 2,
            }
        );
        assert_eq!(cart.quantity_of(1), 1);
    }

    #[test]
    fn test_set_quantity_not_in_cart_is_noop() {
        let catalog = vec![medicine(1, "A", 5, 100)];
        let mut cart = Cart::new();

        cart.set_quantity(1, 2, &catalog).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_and_sale_items() {
        let catalog = vec![medicine(1, "A", 5, 100), medicine(2, "B", 5, 250)];
        let mut cart = Cart::new();
        cart.add(&catalog[0]).unwrap();
        cart.add(&catalog[1]).unwrap();
        cart.set_quantity(2, 3, &catalog).unwrap();

        assert_eq!(
            cart.sale_items(),
            vec![
                SaleItemRequest { medicine_id: 1, quantity: 1 },
                SaleItemRequest { medicine_id: 2, quantity: 3 },
            ]
        );
        assert_eq!(
            CartTotals::from(&cart),
            CartTotals {
                line_count: 2,
                total_items: 4,
                total_amount: Money::from_cents(850),
            }
        );

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_amount(), Money::zero());
    }

    #[test]
    fn test_add_at_u32_max_stock_does_not_overflow() {
        let bandages = medicine(1, "Bandage", u32::MAX, 1);
        let mut cart = Cart::new();
        cart.add(&bandages).unwrap();
        cart.set_quantity(1, i64::from(u32::MAX), &[bandages.clone()]).unwrap();
        let before = cart.clone();

        let err = cart.add(&bandages).unwrap_err();
        assert_eq!(
            err,
            CoreError::StockExceeded {
                medicine: "Bandage".to_string(),
                available: u32::MAX,
                requested: i64::from(u32::MAX) + 1,
            }
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_item_count_beyond_u32() {
        let catalog = vec![medicine(1, "A", u32::MAX, 1), medicine(2, "B", 5, 1)];
        let mut cart = Cart::new();
        cart.add(&catalog[0]).unwrap();
        cart.set_quantity(1, i64::from(u32::MAX), &catalog).unwrap();
        cart.add(&catalog[1]).unwrap();
        cart.add(&catalog[1]).unwrap();

        assert_eq!(cart.total_item_count(), u64::from(u32::MAX) + 2);
        assert_eq!(
            cart.total_amount(),
            Money::from_cents(i64::from(u32::MAX) + 2)
        );
    }

    #[test]
    fn test_total_too_large_for_wire_is_rejected() {
        // 2^40 hundredths per unit, so 2^13 units reach 2^53
        let catalog = vec![medicine(1, "Implant", u32::MAX, 1 << 40)];
        let mut cart = Cart::new();
        cart.add(&catalog[0]).unwrap();

        cart.set_quantity(1, (1 << 13) - 1, &catalog).unwrap();
        let before = cart.clone();

        let err = cart.set_quantity(1, 1 << 13, &catalog).unwrap_err();
        assert_eq!(
            err,
            CoreError::AmountTooLarge {
                medicine: "Implant".to_string()
            }
        );
        assert_eq!(cart, before);
        assert!(matches!(
            cart.add(&catalog[0]),
            Err(CoreError::AmountTooLarge { .. })
        ));
        assert_eq!(cart, before);
    }

    /// Random add/set sequences never break the stock ceiling, and the
    /// total always equals a fresh Σ mrp × quantity.
    #[test]
    fn test_random_operations_hold_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..200 {
            let catalog: Vec<MedicineRecord> = (1..=6)
                .map(|id| {
                    medicine(
                        id,
                        &format!("Med {id}"),
                        rng.gen_range(0..8),
                        rng.gen_range(1..10_000),
                    )
                })
                .collect();
            let mut cart = Cart::new();

            for _ in 0..40 {
                let target = &catalog[rng.gen_range(0..catalog.len())];
                let before = cart.clone();

                let result = if rng.gen_bool(0.5) {
                    cart.add(target).map(|_| ())
                } else {
                    cart.set_quantity(target.id, rng.gen_range(-2..12), &catalog)
                };

                if result.is_err() {
                    assert_eq!(cart, before, "failed call must not mutate");
                }

                for line in cart.lines() {
                    let stock = catalog
                        .iter()
                        .find(|m| m.id == line.medicine.id)
                        .map(|m| m.quantity)
                        .unwrap();
                    assert!(line.quantity >= 1);
                    assert!(line.quantity <= stock);
                }

                let expected: i64 = cart
                    .lines()
                    .iter()
                    .map(|l| l.medicine.mrp.cents() * i64::from(l.quantity))
                    .sum();
                assert_eq!(cart.total_amount().cents(), expected);
            }
        }
    }
}
