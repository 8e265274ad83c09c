//! # Validation Module
//!
//! Turns raw form text into typed values, and checks business rules before
//! anything is sent to the backend.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Input coercion (THIS MODULE)                                  │
//! │  ├── quantity text  → integer ≥ 1 (never fails)                         │
//! │  └── discount text  → Money (non-numeric → 0)                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Form validation (THIS MODULE)                                 │
//! │  └── ProductForm → ProductDraft or ValidationError                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                       │
//! │  └── its own rules, surfaced as RemoteError                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Product, ProductDraft};
use crate::{OTHER_CATEGORY, PREDEFINED_CATEGORIES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Coerces quantity text to a positive integer.
///
/// ## Rules
/// - Leading integer is parsed (`"3abc"` → 3)
/// - Non-numeric, zero or negative input becomes 1
///
/// ## Example
/// ```rust
/// use shopfront_core::validation::coerce_quantity;
///
/// assert_eq!(coerce_quantity("5"), 5);
/// assert_eq!(coerce_quantity("abc"), 1);
/// assert_eq!(coerce_quantity("-2"), 1);
/// ```
pub fn coerce_quantity(input: &str) -> i64 {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let leading: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    if negative || leading.is_empty() {
        return 1;
    }

    match leading.parse::<u32>() {
        Ok(qty) if qty >= 1 => i64::from(qty),
        _ => 1,
    }
}

/// Coerces discount text to a flat amount; non-numeric input is zero.
///
/// Negative amounts pass through so that [`validate_discount`] can reject
/// them explicitly.
pub fn coerce_discount(input: &str) -> Money {
    Money::parse(input).unwrap_or_default()
}

/// Validates a flat discount amount.
///
/// ## Rules
/// - Must be non-negative
/// - The upper bound (≤ subtotal) is checked at finalize time, since the
///   subtotal keeps changing while the bill is composed
pub fn validate_discount(amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "discount".to_string(),
        });
    }
    Ok(())
}

/// Parses and validates a product price.
///
/// ## Rules
/// - Required
/// - Must be a decimal number
/// - Must be greater than zero
///
/// ## Example
/// ```rust
/// use shopfront_core::validation::parse_price;
///
/// assert_eq!(parse_price("499.5").unwrap().cents(), 49950);
/// assert!(parse_price("0").is_err());
/// assert!(parse_price("free").is_err());
/// ```
pub fn parse_price(input: &str) -> ValidationResult<Money> {
    if input.trim().is_empty() {
        return Err(ValidationError::required("price"));
    }

    let price = Money::parse(input).ok_or_else(|| ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: "must be a number".to_string(),
    })?;

    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(price)
}

// =============================================================================
// Product Form
// =============================================================================

/// Raw state of the add/edit product form.
///
/// `category` holds either one of [`PREDEFINED_CATEGORIES`] or
/// [`OTHER_CATEGORY`], in which case `other_category` carries the name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub other_category: String,
    pub price: String,
    pub colors: String,
    pub sizes: String,
}

impl ProductForm {
    /// Prefills the form from an existing product.
    ///
    /// A category outside the predefined list comes back as
    /// [`OTHER_CATEGORY`] with the custom name filled in.
    pub fn from_product(product: &Product) -> Self {
        let (category, other_category) = if is_predefined_category(&product.category) {
            (product.category.clone(), String::new())
        } else {
            (OTHER_CATEGORY.to_string(), product.category.clone())
        };

        ProductForm {
            name: product.name.clone(),
            category,
            other_category,
            price: product.price.to_string(),
            colors: product.colors.clone(),
            sizes: product.sizes.clone(),
        }
    }

    /// The category that will actually be stored.
    pub fn resolved_category(&self) -> String {
        if self.category == OTHER_CATEGORY {
            self.other_category.trim().to_string()
        } else {
            self.category.trim().to_string()
        }
    }

    /// Validates the form and builds the request body.
    ///
    /// ## Rules
    /// - Name required
    /// - Category required; "Other..." requires a custom name
    /// - Price must parse and be > 0
    pub fn validate(&self) -> ValidationResult<ProductDraft> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::required("name"));
        }

        if self.category == OTHER_CATEGORY && self.other_category.trim().is_empty() {
            return Err(ValidationError::required("new category name"));
        }

        let category = self.resolved_category();
        if category.is_empty() {
            return Err(ValidationError::required("category"));
        }

        let price = parse_price(&self.price)?;

        Ok(ProductDraft {
            id: None,
            name: self.name.trim().to_string(),
            category,
            price,
            colors: self.colors.trim().to_string(),
            sizes: self.sizes.trim().to_string(),
        })
    }
}

/// Checks whether a category is one of the built-in choices.
pub fn is_predefined_category(category: &str) -> bool {
    PREDEFINED_CATEGORIES.contains(&category)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, category: &str, other: &str, price: &str) -> ProductForm {
        ProductForm {
            name: name.into(),
            category: category.into(),
            other_category: other.into(),
            price: price.into(),
            colors: " Red, Blue ".into(),
            sizes: "M".into(),
        }
    }

    #[test]
    fn test_coerce_quantity() {
        assert_eq!(coerce_quantity("3"), 3);
        assert_eq!(coerce_quantity(" 12 "), 12);
        assert_eq!(coerce_quantity("3abc"), 3);
        assert_eq!(coerce_quantity("abc"), 1);
        assert_eq!(coerce_quantity("0"), 1);
        assert_eq!(coerce_quantity("-2"), 1);
        assert_eq!(coerce_quantity(""), 1);
        assert_eq!(coerce_quantity("99999999999999999999"), 1);
    }

    #[test]
    fn test_coerce_and_validate_discount() {
        assert_eq!(coerce_discount("30").cents(), 3000);
        assert_eq!(coerce_discount("abc"), Money::zero());
        assert!(validate_discount(Money::zero()).is_ok());
        assert!(validate_discount(coerce_discount("-5")).is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("199").unwrap().cents(), 19900);
        assert_eq!(parse_price("").unwrap_err(), ValidationError::required("price"));
        assert!(matches!(
            parse_price("-1"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            parse_price("twelve"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_product_form_validate() {
        let draft = form("Linen Shirt", "Shirts", "", "799").validate().unwrap();
        assert_eq!(draft.category, "Shirts");
        assert_eq!(draft.colors, "Red, Blue");
        assert!(draft.id.is_none());

        let draft = form("Dupatta", OTHER_CATEGORY, "Stoles", "250").validate().unwrap();
        assert_eq!(draft.category, "Stoles");

        assert_eq!(
            form("", "Shirts", "", "799").validate().unwrap_err(),
            ValidationError::required("name")
        );
        assert_eq!(
            form("Dupatta", OTHER_CATEGORY, "  ", "250").validate().unwrap_err(),
            ValidationError::required("new category name")
        );
        assert_eq!(
            form("Dupatta", "", "", "250").validate().unwrap_err(),
            ValidationError::required("category")
        );
        assert!(form("Shirt", "Shirts", "", "0").validate().is_err());
    }

    #[test]
    fn test_form_from_product_custom_category() {
        let product = Product {
            id: "P7".into(),
            name: "Stole".into(),
            category: "Stoles".into(),
            price: Money::from_cents(25000),
            colors: String::new(),
            sizes: String::new(),
        };
        let form = ProductForm::from_product(&product);
        assert_eq!(form.category, OTHER_CATEGORY);
        assert_eq!(form.other_category, "Stoles");
        assert_eq!(form.price, "250.00");
        assert_eq!(form.validate().unwrap().category, "Stoles");
    }
}
