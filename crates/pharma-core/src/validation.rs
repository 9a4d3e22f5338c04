//! # Validation Module
//!
//! Input validation for the two forms the dashboard submits: the new-sale
//! form and the add/edit medicine form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (before any request is sent)                     │
//! │  ├── Required fields, trimming                                         │
//! │  ├── Number/date parsing                                               │
//! │  └── Price rules (> 0, MRP >= cost)                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Backend service                                              │
//! │  ├── Same price rules, re-checked                                      │
//! │  ├── Unique invoice numbers                                            │
//! │  └── Stock re-checked at sale time                                     │
//! │                                                                         │
//! │  A failure at layer 1 means no request is made at all.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{MedicineForm, MedicineInput};
use crate::{MAX_SEARCH_LENGTH, MAX_TEXT_FIELD_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required text field and returns it trimmed.
///
/// ## Example
/// ```rust
/// use pharma_core::validation::validate_required;
///
/// assert_eq!(validate_required("Customer name", "  Asha  ").unwrap(), "Asha");
/// assert!(validate_required("Customer name", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    validate_length(field, value)?;
    Ok(value.to_string())
}

/// Validates an optional text field and returns it trimmed.
pub fn validate_optional(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    validate_length(field, value)?;
    Ok(value.to_string())
}

fn validate_length(field: &str, value: &str) -> ValidationResult<()> {
    if value.chars().count() > MAX_TEXT_FIELD_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_FIELD_LENGTH,
        });
    }
    Ok(())
}

/// Validates a catalog search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The query unchanged; surrounding whitespace is part of the match.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    if query.chars().count() > MAX_SEARCH_LENGTH {
        return Err(ValidationError::TooLong {
            field: "Search".to_string(),
            max: MAX_SEARCH_LENGTH,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price: must be strictly positive.
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates the price pair of a medicine.
///
/// ## Rules
/// - Both prices must be greater than zero
/// - MRP must not be below cost price
///
/// ## Example
/// ```rust
/// use pharma_core::money::Money;
/// use pharma_core::validation::validate_prices;
///
/// assert!(validate_prices(Money::from_cents(300), Money::from_cents(500)).is_ok());
/// assert!(validate_prices(Money::from_cents(500), Money::from_cents(500)).is_ok());
/// assert!(validate_prices(Money::from_cents(600), Money::from_cents(500)).is_err());
/// ```
pub fn validate_prices(cost_price: Money, mrp: Money) -> ValidationResult<()> {
    validate_price("Cost price", cost_price)?;
    validate_price("MRP", mrp)?;

    if mrp < cost_price {
        return Err(ValidationError::PriceOrdering);
    }

    Ok(())
}

fn parse_amount(field: &str, raw: &str) -> ValidationResult<Money> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    raw.parse::<f64>()
        .ok()
        .and_then(Money::from_amount)
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a number".to_string(),
        })
}

/// Parses a stock quantity. Blank means zero.
fn parse_quantity(raw: &str) -> ValidationResult<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }

    raw.parse::<u32>().map_err(|_| ValidationError::InvalidFormat {
        field: "Quantity".to_string(),
        reason: "must be a whole number of 0 or more".to_string(),
    })
}

fn parse_expiry_date(raw: &str) -> ValidationResult<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "Expiry date".to_string(),
        });
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::InvalidFormat {
        field: "Expiry date".to_string(),
        reason: "expected YYYY-MM-DD".to_string(),
    })
}

// =============================================================================
// Form Validators
// =============================================================================

/// Validates the add/edit medicine form and builds the request body.
///
/// ## Check Order
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Medicine name, generic name, supplier present    → Required        │
/// │  2. Optional text (category, batch) within length    → TooLong         │
/// │  3. Expiry date parses as YYYY-MM-DD                  → InvalidFormat   │
/// │  4. Quantity is a whole number (blank = 0)            → InvalidFormat   │
/// │  5. Cost price and MRP parse and are > 0             → MustBePositive  │
/// │  6. MRP >= cost price                                 → PriceOrdering   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// The first failing rule is reported; text fields come back trimmed.
pub fn validate_medicine_form(form: &MedicineForm) -> ValidationResult<MedicineInput> {
    let medicine_name = validate_required("Medicine name", &form.medicine_name)?;
    let generic_name = validate_required("Generic name", &form.generic_name)?;
    let supplier = validate_required("Supplier", &form.supplier)?;
    let category = validate_optional("Category", &form.category)?;
    let batch_no = validate_optional("Batch number", &form.batch_no)?;

    let expiry_date = parse_expiry_date(&form.expiry_date)?;
    let quantity = parse_quantity(&form.quantity)?;

    let cost_price = parse_amount("Cost price", &form.cost_price)?;
    let mrp = parse_amount("MRP", &form.mrp)?;
    validate_prices(cost_price, mrp)?;

    Ok(MedicineInput {
        medicine_name,
        generic_name,
        category,
        batch_no,
        expiry_date,
        quantity,
        cost_price,
        mrp,
        supplier,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> MedicineForm {
        MedicineForm {
            medicine_name: "  Cetirizine 10mg ".to_string(),
            generic_name: "Cetirizine".to_string(),
            category: "Antihistamine".to_string(),
            batch_no: " CTZ-11 ".to_string(),
            expiry_date: "2027-08-15".to_string(),
            quantity: "120".to_string(),
            cost_price: "1.25".to_string(),
            mrp: "2".to_string(),
            supplier: "Allergy Labs".to_string(),
        }
    }

    #[test]
    fn test_validate_required() {
        assert_eq!(validate_required("Invoice number", " INV-1 ").unwrap(), "INV-1");
        assert_eq!(
            validate_required("Invoice number", "  "),
            Err(ValidationError::Required {
                field: "Invoice number".to_string()
            })
        );
        assert!(validate_required("Supplier", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  para ").unwrap(), "  para ");
        assert_eq!(validate_search_query(" ").unwrap(), " ");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_prices() {
        assert!(validate_prices(Money::from_cents(100), Money::from_cents(150)).is_ok());
        assert_eq!(
            validate_prices(Money::zero(), Money::from_cents(150)),
            Err(ValidationError::MustBePositive {
                field: "Cost price".to_string()
            })
        );
        assert_eq!(
            validate_prices(Money::from_cents(100), Money::from_cents(-1)),
            Err(ValidationError::MustBePositive {
                field: "MRP".to_string()
            })
        );
        assert_eq!(
            validate_prices(Money::from_cents(200), Money::from_cents(150)),
            Err(ValidationError::PriceOrdering)
        );
    }

    #[test]
    fn test_valid_form_builds_trimmed_input() {
        let input = validate_medicine_form(&filled_form()).unwrap();
        assert_eq!(input.medicine_name, "Cetirizine 10mg");
        assert_eq!(input.batch_no, "CTZ-11");
        assert_eq!(input.quantity, 120);
        assert_eq!(input.cost_price.cents(), 125);
        assert_eq!(input.mrp.cents(), 200);
        assert_eq!(input.expiry_date, NaiveDate::from_ymd_opt(2027, 8, 15).unwrap());
    }

    #[test]
    fn test_missing_required_fields() {
        let mut form = filled_form();
        form.supplier = "   ".to_string();
        assert_eq!(
            validate_medicine_form(&form),
            Err(ValidationError::Required {
                field: "Supplier".to_string()
            })
        );

        let mut form = filled_form();
        form.generic_name.clear();
        assert!(matches!(
            validate_medicine_form(&form),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_blank_quantity_means_zero() {
        let mut form = filled_form();
        form.quantity = " ".to_string();
        assert_eq!(validate_medicine_form(&form).unwrap().quantity, 0);

        form.quantity = "-4".to_string();
        assert!(matches!(
            validate_medicine_form(&form),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_bad_date_and_price_formats() {
        let mut form = filled_form();
        form.expiry_date = "15/08/2027".to_string();
        assert!(matches!(
            validate_medicine_form(&form),
            Err(ValidationError::InvalidFormat { .. })
        ));

        let mut form = filled_form();
        form.mrp = "two".to_string();
        assert!(matches!(
            validate_medicine_form(&form),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_mrp_below_cost_rejected() {
        let mut form = filled_form();
        form.cost_price = "5".to_string();
        form.mrp = "4.99".to_string();
        assert_eq!(
            validate_medicine_form(&form),
            Err(ValidationError::PriceOrdering)
        );
    }
}
