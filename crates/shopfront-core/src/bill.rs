//! # Bill Builder
//!
//! The bill being composed at the counter, before it is persisted.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Bill Builder Operations                              │
//! │                                                                         │
//! │  Counter Action            Builder Call           State Change          │
//! │  ──────────────            ────────────           ────────────          │
//! │                                                                         │
//! │  Scan / type name ───────► add_item() ──────────► merge or push line    │
//! │                                                                         │
//! │  Click Remove ───────────► remove_item() ───────► line dropped          │
//! │                                                                         │
//! │  Enter discount ─────────► set_discount() ──────► flat amount           │
//! │                                                                         │
//! │  Pick payment ───────────► set_payment_method() ► method                │
//! │                                                                         │
//! │  Finalize ───────────────► to_new_bill() ───────► NewBill payload       │
//! │                            clear() after the backend accepts it         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id (adding again merges quantities)
//! - Every line has quantity ≥ 1
//! - Totals are always derived from the lines, never stored

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{BillItem, NewBill, PaymentMethod};
use crate::validation::validate_discount;

// =============================================================================
// Totals
// =============================================================================

/// Derived totals for the current lines and discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillTotals {
    /// Σ price × quantity
    pub sub_total: Money,
    /// Flat discount as entered
    pub discount: Money,
    /// sub_total − discount (may be negative until finalize rejects it)
    pub grand_total: Money,
    /// discount / sub_total × 100, two decimals, display only
    pub discount_percentage: String,
}

impl BillTotals {
    /// Computes totals for a set of lines and a discount.
    pub fn compute(items: &[BillItem], discount: Money) -> Self {
        let sub_total: Money = items.iter().map(BillItem::line_total).sum();
        BillTotals {
            sub_total,
            discount,
            grand_total: sub_total - discount,
            discount_percentage: discount.percentage_of(sub_total),
        }
    }
}

// =============================================================================
// Bill Builder
// =============================================================================

/// In-memory accumulator for the bill in progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillBuilder {
    items: Vec<BillItem>,
    discount: Money,
    payment_method: PaymentMethod,
}

impl BillBuilder {
    /// Creates an empty bill paid in cash.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of the product matching `identifier`.
    ///
    /// ## Behavior
    /// - Identifier is trimmed, then resolved by exact id, then by
    ///   case-insensitive name
    /// - Existing line: quantity increases, price snapshot is kept
    /// - New line: price is snapshotted from the catalog now
    /// - Quantity below 1 is treated as 1
    ///
    /// Returns the line as it stands after the add.
    pub fn add_item(
        &mut self,
        catalog: &Catalog,
        identifier: &str,
        quantity: i64,
    ) -> CoreResult<&BillItem> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(ValidationError::required("Product ID (Barcode) or Name").into());
        }

        let product = catalog
            .find_by_identifier(identifier)
            .ok_or_else(|| CoreError::ProductNotFound(identifier.to_string()))?;
        let quantity = quantity.max(1);

        let index = match self.items.iter().position(|i| i.product_id == product.id) {
            Some(index) => {
                let line = &mut self.items[index];
                line.quantity = line.quantity.saturating_add(quantity);
                index
            }
            None => {
                self.items.push(BillItem::from_product(product, quantity));
                self.items.len() - 1
            }
        };

        Ok(&self.items[index])
    }

    /// Removes the line for `product_id`. Absent ids are ignored.
    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Sets the flat discount. Negative amounts are rejected.
    pub fn set_discount(&mut self, amount: Money) -> Result<(), ValidationError> {
        validate_discount(amount)?;
        self.discount = amount;
        Ok(())
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    pub fn items(&self) -> &[BillItem] {
        &self.items
    }

    pub fn discount(&self) -> Money {
        self.discount
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current totals. Recomputed on every call.
    pub fn totals(&self) -> BillTotals {
        BillTotals::compute(&self.items, self.discount)
    }

    /// Builds the finalize payload.
    ///
    /// ## Errors
    /// - [`ValidationError::EmptyBill`] when there are no lines
    /// - [`ValidationError::DiscountExceedsSubtotal`] when grand total < 0
    ///
    /// The builder itself is left untouched; call [`clear`](Self::clear)
    /// once the backend has accepted the bill.
    pub fn to_new_bill(&self) -> Result<NewBill, ValidationError> {
        if self.items.is_empty() {
            return Err(ValidationError::EmptyBill);
        }

        let totals = self.totals();
        if totals.grand_total.is_negative() {
            return Err(ValidationError::DiscountExceedsSubtotal);
        }

        Ok(NewBill {
            items: self.items.clone(),
            discount_amount: self.discount,
            payment_method: self.payment_method,
            sub_total: totals.sub_total,
            grand_total: totals.grand_total,
        })
    }

    /// Resets lines, discount and payment method.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn product(id: &str, name: &str, price_major: i64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: "Shirts".to_string(),
            price: Money::from_major_minor(price_major, 0),
            colors: String::new(),
            sizes: String::new(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_products(vec![
            product("P001", "Linen Shirt", 100),
            product("P002", "Denim Jeans", 50),
        ])
    }

    #[test]
    fn test_add_merges_same_product() {
        let catalog = catalog();
        let mut bill = BillBuilder::new();

        bill.add_item(&catalog, "P001", 2).unwrap();
        let line = bill.add_item(&catalog, "linen shirt", 3).unwrap();
        assert_eq!(line.quantity, 5);
        assert_eq!(bill.items().len(), 1);
    }

    #[test]
    fn test_add_clamps_quantity() {
        let catalog = catalog();
        let mut bill = BillBuilder::new();

        bill.add_item(&catalog, "P002", 0).unwrap();
        bill.add_item(&catalog, "P002", -4).unwrap();
        assert_eq!(bill.items()[0].quantity, 2);
    }

    #[test]
    fn test_add_unknown_and_empty_identifier() {
        let catalog = catalog();
        let mut bill = BillBuilder::new();

        let err = bill.add_item(&catalog, "P999", 1).unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(ref id) if id == "P999"));

        let err = bill.add_item(&catalog, "   ", 1).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::Required { .. })));
        assert!(bill.is_empty());
    }

    #[test]
    fn test_price_snapshot_survives_catalog_edit() {
        let mut catalog = catalog();
        let mut bill = BillBuilder::new();
        bill.add_item(&catalog, "P001", 1).unwrap();

        catalog.upsert(product("P001", "Linen Shirt", 150));
        bill.add_item(&catalog, "P001", 1).unwrap();

        assert_eq!(bill.items()[0].price, Money::from_major_minor(100, 0));
        assert_eq!(bill.totals().sub_total, Money::from_major_minor(200, 0));
    }

    #[test]
    fn test_totals_and_percentage() {
        let catalog = catalog();
        let mut bill = BillBuilder::new();
        bill.add_item(&catalog, "P001", 2).unwrap();
        bill.add_item(&catalog, "P002", 1).unwrap();
        bill.set_discount(Money::from_major_minor(25, 0)).unwrap();

        let totals = bill.totals();
        assert_eq!(totals.sub_total.cents(), 25000);
        assert_eq!(totals.grand_total.cents(), 22500);
        assert_eq!(totals.discount_percentage, "10.00");

        assert_eq!(BillBuilder::new().totals().discount_percentage, "0.00");
    }

    #[test]
    fn test_huge_backend_price_does_not_overflow() {
        let catalog = Catalog::from_products(vec![Product {
            price: Money::from_cents(i64::MAX / 4),
            ..product("LUX", "Couture Gown", 0)
        }]);
        let mut bill = BillBuilder::new();
        bill.add_item(&catalog, "LUX", i64::MAX).unwrap();
        bill.add_item(&catalog, "LUX", i64::MAX).unwrap();

        assert_eq!(bill.items()[0].quantity, i64::MAX);
        let totals = bill.totals();
        assert_eq!(totals.sub_total.cents(), i64::MAX);
        assert_eq!(totals.grand_total, totals.sub_total);
    }

    #[test]
    fn test_remove_item() {
        let catalog = catalog();
        let mut bill = BillBuilder::new();
        bill.add_item(&catalog, "P001", 1).unwrap();
        bill.add_item(&catalog, "P002", 1).unwrap();

        bill.remove_item("P001");
        bill.remove_item("P404");
        assert_eq!(bill.items().len(), 1);
        assert_eq!(bill.items()[0].product_id, "P002");
    }

    #[test]
    fn test_negative_discount_rejected() {
        let mut bill = BillBuilder::new();
        assert!(bill.set_discount(Money::from_cents(-1)).is_err());
        assert_eq!(bill.discount(), Money::zero());
    }

    #[test]
    fn test_to_new_bill_guards() {
        let catalog = catalog();
        let mut bill = BillBuilder::new();
        assert_eq!(bill.to_new_bill().unwrap_err(), ValidationError::EmptyBill);

        bill.add_item(&catalog, "P002", 1).unwrap();
        bill.set_discount(Money::from_major_minor(60, 0)).unwrap();
        assert_eq!(
            bill.to_new_bill().unwrap_err(),
            ValidationError::DiscountExceedsSubtotal
        );

        // Discount equal to the subtotal is allowed
        bill.set_discount(Money::from_major_minor(50, 0)).unwrap();
        bill.set_payment_method(PaymentMethod::GPay);
        let payload = bill.to_new_bill().unwrap();
        assert_eq!(payload.grand_total, Money::zero());
        assert_eq!(payload.payment_method, PaymentMethod::GPay);
        assert_eq!(bill.items().len(), 1);
    }

    #[test]
    fn test_clear_resets_everything() {
        let catalog = catalog();
        let mut bill = BillBuilder::new();
        bill.add_item(&catalog, "P001", 1).unwrap();
        bill.set_discount(Money::from_major_minor(5, 0)).unwrap();
        bill.set_payment_method(PaymentMethod::Card);

        bill.clear();
        assert_eq!(bill, BillBuilder::new());
        assert_eq!(bill.payment_method(), PaymentMethod::Cash);
    }
}
