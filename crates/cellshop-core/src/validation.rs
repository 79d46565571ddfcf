//! # Validation Module
//!
//! Business rules a line item must satisfy before it enters a bill.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Coercion (coerce.rs)                                         │
//! │  ├── Raw text → numbers, garbage → 0                                   │
//! │  └── Never fails, runs on every keystroke                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Preview gate (draft.rs)                                      │
//! │  └── Pending row shown in totals only if qty > 0 and price > 0         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE, on "add to bill"                                │
//! │  ├── Name present, quantity 1..=999, price > 0                         │
//! │  └── Rejection leaves the pending row in place for correction          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Discount, LineItem, Percent};
use crate::{MAX_BILL_ITEMS, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_IDENTIFIER_LEN: usize = 64;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item name.
///
/// ```rust
/// use cellshop_core::validation::validate_item_name;
///
/// assert!(validate_item_name("Back cover - Galaxy A15").is_ok());
/// assert!(validate_item_name("   ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a stock identifier (IMEI, barcode, part number).
pub fn validate_identifier(identifier: &str) -> ValidationResult<()> {
    let identifier = identifier.trim();

    if identifier.is_empty() {
        return Err(ValidationError::Required {
            field: "identifier".to_string(),
        });
    }

    if identifier.len() > MAX_IDENTIFIER_LEN {
        return Err(ValidationError::TooLong {
            field: "identifier".to_string(),
            max: MAX_IDENTIFIER_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity: 1 to `MAX_ITEM_QUANTITY`.
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: "1".to_string(),
            max: MAX_ITEM_QUANTITY.to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price. Must be strictly positive: a zero-price row is
/// still being typed and never enters the bill.
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a GST rate. Must be between 0 and 100 percent.
pub fn validate_tax_rate(rate: Percent) -> ValidationResult<()> {
    percent_in_range("tax rate", rate)
}

/// Validates a line or bill discount.
///
/// - Percent: 0 to 100
/// - Flat: not negative (may exceed the amount it discounts)
pub fn validate_discount(discount: &Discount) -> ValidationResult<()> {
    match discount {
        Discount::None => Ok(()),
        Discount::Percent(pct) => percent_in_range("discount", *pct),
        Discount::Flat(value) if value.is_negative() => Err(ValidationError::MustNotBeNegative {
            field: "discount".to_string(),
        }),
        Discount::Flat(_) => Ok(()),
    }
}

fn percent_in_range(field: &str, pct: Percent) -> ValidationResult<()> {
    if pct.value() < Decimal::ZERO || pct.value() > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: "100".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates every field of a line item.
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_item_name(&item.name)?;
    validate_identifier(&item.identifier)?;
    validate_quantity(item.quantity)?;
    validate_unit_price(item.unit_price)?;
    validate_tax_rate(item.tax_rate)?;
    validate_discount(&item.discount)?;
    Ok(())
}

/// Validates that a bill with `current_items` lines can take one more.
pub fn validate_bill_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_BILL_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "bill items".to_string(),
            min: "0".to_string(),
            max: MAX_BILL_ITEMS.to_string(),
        });
    }

    Ok(())
}
