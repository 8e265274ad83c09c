//! # Catalog
//!
//! In-memory mirror of the backend's product list.
//!
//! The catalog never creates ids or talks to the network. The controller
//! calls the backend and then reconciles the response here.

use crate::types::Product;

/// Products as last seen from the backend, in backend order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the mirror with a fresh backend listing.
    pub fn from_products(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Resolves a scanned or typed identifier.
    ///
    /// Exact id match wins over a case-insensitive name match, so a product
    /// whose name equals another product's id cannot shadow it.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::{Catalog, Money, Product};
    ///
    /// let catalog = Catalog::from_products(vec![Product {
    ///     id: "P001".into(),
    ///     name: "Silk Saree".into(),
    ///     category: "Sarees".into(),
    ///     price: Money::from_major_minor(2500, 0),
    ///     colors: String::new(),
    ///     sizes: String::new(),
    /// }]);
    ///
    /// assert!(catalog.find_by_identifier("P001").is_some());
    /// assert!(catalog.find_by_identifier("SILK SAREE").is_some());
    /// assert!(catalog.find_by_identifier("p001").is_none());
    /// ```
    pub fn find_by_identifier(&self, term: &str) -> Option<&Product> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }

        self.get(term).or_else(|| {
            let lowered = term.to_lowercase();
            self.products
                .iter()
                .find(|p| p.name.to_lowercase() == lowered)
        })
    }

    /// Replaces the product with the same id, or appends it.
    pub fn upsert(&mut self, product: Product) {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => self.products.push(product),
        }
    }

    /// Drops the product with `id`, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id == id)?;
        Some(self.products.remove(index))
    }

    pub fn clear(&mut self) {
        self.products.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: "Kurtis".to_string(),
            price: Money::from_major_minor(10, 0),
            colors: String::new(),
            sizes: String::new(),
        }
    }

    #[test]
    fn test_id_match_beats_name_match() {
        let catalog = Catalog::from_products(vec![product("A1", "B2"), product("B2", "Scarf")]);

        assert_eq!(catalog.find_by_identifier("B2").unwrap().name, "Scarf");
        assert_eq!(catalog.find_by_identifier(" scarf ").unwrap().id, "B2");
        assert!(catalog.find_by_identifier("").is_none());
        assert!(catalog.find_by_identifier("nothing").is_none());
    }

    #[test]
    fn test_upsert_and_remove() {
        let mut catalog = Catalog::new();
        catalog.upsert(product("A1", "Scarf"));
        catalog.upsert(product("A2", "Belt"));
        catalog.upsert(product("A1", "Silk Scarf"));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.products()[0].name, "Silk Scarf");

        assert!(catalog.remove("A1").is_some());
        assert!(catalog.remove("A1").is_none());
        assert_eq!(catalog.len(), 1);
    }
}
