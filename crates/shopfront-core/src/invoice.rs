//! # Invoice
//!
//! Printable text layout for a persisted bill.
//!
//! ## Layout
//! ```text
//!                    Fashion World
//!                       Invoice
//! Invoice ID: B17                  Date: 2024-05-01 10:00
//! ---------------------------------------------------------
//! Product              ID (Barcode)   Qty     Price    Total
//! Linen Shirt          P001             2   ₹100.00  ₹200.00
//! ---------------------------------------------------------
//! Subtotal:                                          ₹200.00
//! Discount Applied:                                 - ₹30.00
//! (Discount % of Subtotal):                          (15.00%)
//! Grand Total:                                       ₹170.00
//!
//! Payment Method: Cash
//!
//!          Thank you for shopping at Fashion World!
//! ```

use std::fmt;

use crate::money::Money;
use crate::types::Bill;

const WIDTH: usize = 57;

/// A bill prepared for printing.
///
/// Totals are taken from the persisted bill, not recomputed. Only the
/// discount percentage is derived.
#[derive(Debug, Clone)]
pub struct Invoice<'a> {
    bill: &'a Bill,
    shop_name: &'a str,
    currency_symbol: &'a str,
}

impl<'a> Invoice<'a> {
    pub fn new(bill: &'a Bill, shop_name: &'a str, currency_symbol: &'a str) -> Self {
        Invoice {
            bill,
            shop_name,
            currency_symbol,
        }
    }

    /// `discountAmount / subTotal × 100` with two decimals.
    pub fn discount_percentage(&self) -> String {
        self.bill.discount_amount.percentage_of(self.bill.sub_total)
    }

    pub fn footer(&self) -> String {
        format!("Thank you for shopping at {}!", self.shop_name)
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with(self.currency_symbol)
    }

    fn summary_line(
        &self,
        f: &mut fmt::Formatter<'_>,
        label: &str,
        value: &str,
    ) -> fmt::Result {
        let pad = WIDTH.saturating_sub(label.chars().count());
        writeln!(f, "{}{:>pad$}", label, value, pad = pad)
    }
}

impl fmt::Display for Invoice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(WIDTH);
        let bill = self.bill;

        writeln!(f, "{:^width$}", self.shop_name, width = WIDTH)?;
        writeln!(f, "{:^width$}", "Invoice", width = WIDTH)?;
        let id = format!("Invoice ID: {}", bill.id);
        let date = format!("Date: {}", bill.created_at.format("%Y-%m-%d %H:%M"));
        self.summary_line(f, &id, &date)?;
        writeln!(f, "{}", rule)?;

        writeln!(
            f,
            "{:<20} {:<14} {:>3} {:>8} {:>8}",
            "Product", "ID (Barcode)", "Qty", "Price", "Total"
        )?;
        for item in &bill.items {
            writeln!(
                f,
                "{:<20} {:<14} {:>3} {:>8} {:>8}",
                item.product_name,
                item.product_id,
                item.quantity,
                self.money(item.price),
                self.money(item.line_total()),
            )?;
        }
        writeln!(f, "{}", rule)?;

        self.summary_line(f, "Subtotal:", &self.money(bill.sub_total))?;
        self.summary_line(
            f,
            "Discount Applied:",
            &format!("- {}", self.money(bill.discount_amount)),
        )?;
        self.summary_line(
            f,
            "(Discount % of Subtotal):",
            &format!("({}%)", self.discount_percentage()),
        )?;
        self.summary_line(f, "Grand Total:", &self.money(bill.grand_total))?;
        writeln!(f)?;
        writeln!(f, "Payment Method: {}", bill.payment_method.label())?;
        writeln!(f)?;
        write!(f, "{:^width$}", self.footer(), width = WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BillItem, PaymentMethod};
    use chrono::{TimeZone, Utc};

    fn bill() -> Bill {
        Bill {
            id: "B17".into(),
            items: vec![BillItem {
                product_id: "P001".into(),
                product_name: "Linen Shirt".into(),
                quantity: 2,
                price: Money::from_major_minor(100, 0),
            }],
            discount_amount: Money::from_major_minor(30, 0),
            payment_method: PaymentMethod::Card,
            sub_total: Money::from_major_minor(200, 0),
            grand_total: Money::from_major_minor(170, 0),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_invoice_text() {
        let bill = bill();
        let invoice = Invoice::new(&bill, "Fashion World", "₹");
        let text = invoice.to_string();

        assert!(text.contains("Invoice ID: B17"));
        assert!(text.contains("Date: 2024-05-01 10:00"));
        assert!(text.contains("Linen Shirt"));
        assert!(text.contains("₹200.00"));
        assert!(text.contains("- ₹30.00"));
        assert!(text.contains("(15.00%)"));
        assert!(text.contains("₹170.00"));
        assert!(text.contains("Payment Method: Card (Credit/Debit)"));
        assert!(text.trim_end().ends_with("Thank you for shopping at Fashion World!"));
    }

    #[test]
    fn test_zero_subtotal_percentage() {
        let mut bill = bill();
        bill.sub_total = Money::zero();
        bill.discount_amount = Money::zero();
        assert_eq!(Invoice::new(&bill, "Shop", "$").discount_percentage(), "0.00");
    }
}
