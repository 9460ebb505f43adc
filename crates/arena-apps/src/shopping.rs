//! Shopping app
//!
//! Products with priced item variants and a simple cart. Adding an
//! unknown or unavailable item is a reportable failure.

use crate::app::App;
use crate::error::AppError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub(crate) const APP_NAME: &str = "ShoppingApp";

/// One purchasable item variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: String,
    pub price: f64,
    pub available: bool,
}

impl Item {
    #[must_use]
    pub fn new(item_id: impl Into<String>, price: f64, available: bool) -> Self {
        Self {
            item_id: item_id.into(),
            price,
            available,
        }
    }
}

/// A product with named variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub name: String,
    /// variant name -> item
    pub variants: IndexMap<String, Item>,
}

impl Product {
    #[must_use]
    pub fn new(product_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            variants: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_variant(mut self, variant: impl Into<String>, item: Item) -> Self {
        self.variants.insert(variant.into(), item);
        self
    }
}

/// In-memory shopping app
#[derive(Debug, Default)]
pub struct ShoppingApp {
    products: IndexMap<String, Product>,
    /// item id -> quantity
    cart: IndexMap<String, u32>,
}

impl ShoppingApp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product; an existing product id is overwritten
    pub fn add_product(&mut self, product: Product) -> String {
        let id = product.product_id.clone();
        self.products.insert(id.clone(), product);
        id
    }

    /// All products in insertion order
    #[must_use]
    pub fn list_products(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }

    /// Get a product by id
    ///
    /// # Errors
    /// `AppError::NotFound` if the id is unknown.
    pub fn get_product(&self, product_id: &str) -> Result<Product, AppError> {
        self.products
            .get(product_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(APP_NAME, product_id))
    }

    fn find_item(&self, item_id: &str) -> Option<&Item> {
        self.products
            .values()
            .find_map(|p| p.variants.values().find(|i| i.item_id == item_id))
    }

    /// Add an item to the cart
    ///
    /// # Errors
    /// `AppError::NotFound` for unknown items, `AppError::InvalidRequest`
    /// for unavailable ones.
    pub fn add_to_cart(&mut self, item_id: &str, quantity: u32) -> Result<String, AppError> {
        let item = self
            .find_item(item_id)
            .ok_or_else(|| AppError::not_found(APP_NAME, item_id))?;
        if !item.available {
            return Err(AppError::invalid(
                APP_NAME,
                format!("item '{item_id}' is not available"),
            ));
        }
        *self.cart.entry(item_id.to_string()).or_insert(0) += quantity;
        Ok(item_id.to_string())
    }

    /// Current cart contents as (item id, quantity) pairs
    #[must_use]
    pub fn view_cart(&self) -> Vec<(String, u32)> {
        self.cart.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }

    /// Total cart price and clear the cart
    ///
    /// # Errors
    /// `AppError::InvalidRequest` on an empty cart.
    pub fn checkout(&mut self) -> Result<f64, AppError> {
        if self.cart.is_empty() {
            return Err(AppError::invalid(APP_NAME, "cart is empty"));
        }
        let mut total = 0.0;
        for (item_id, quantity) in &self.cart {
            if let Some(item) = self.find_item(item_id) {
                total += item.price * f64::from(*quantity);
            }
        }
        self.cart.clear();
        Ok(total)
    }
}

impl App for ShoppingApp {
    fn name(&self) -> &'static str {
        APP_NAME
    }

    fn reset(&mut self) {
        self.products.clear();
        self.cart.clear();
    }

    fn state(&self) -> Value {
        serde_json::json!({
            "products": self.products,
            "cart": self.cart,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ShoppingApp {
        let mut app = ShoppingApp::new();
        app.add_product(
            Product::new("prod1", "Laptop").with_variant("default", Item::new("item1", 999.99, true)),
        );
        app.add_product(
            Product::new("prod2", "Mouse").with_variant("default", Item::new("item2", 29.99, true)),
        );
        app.add_product(
            Product::new("prod3", "Keyboard")
                .with_variant("default", Item::new("item3", 79.99, false)),
        );
        app
    }

    #[test]
    fn add_to_cart_and_checkout() {
        let mut app = catalog();
        app.add_to_cart("item2", 2).unwrap();

        assert_eq!(app.view_cart(), vec![("item2".to_string(), 2)]);
        let total = app.checkout().unwrap();
        assert!((total - 59.98).abs() < 1e-9);
        assert!(app.view_cart().is_empty());
    }

    #[test]
    fn unknown_item_fails() {
        let mut app = catalog();
        assert!(matches!(
            app.add_to_cart("nope", 1),
            Err(AppError::NotFound { .. })
        ));
    }

    #[test]
    fn unavailable_item_fails() {
        let mut app = catalog();
        assert!(matches!(
            app.add_to_cart("item3", 1),
            Err(AppError::InvalidRequest { .. })
        ));
    }

    #[test]
    fn checkout_empty_cart_fails() {
        let mut app = catalog();
        assert!(app.checkout().is_err());
    }
}
