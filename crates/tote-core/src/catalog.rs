//! # Catalog
//!
//! The read-only list of purchasable products.
//!
//! Order is preserved as given so the presentation layer renders products
//! the way they were configured. Lookups go through an id index.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, ProductId};
use crate::validation::{validate_price, validate_product_name};

/// Immutable product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids, blank names and negative
    /// prices.
    pub fn new(products: impl IntoIterator<Item = Product>) -> CoreResult<Self> {
        let products: Vec<Product> = products.into_iter().collect();
        let mut index = HashMap::with_capacity(products.len());

        for (position, product) in products.iter().enumerate() {
            validate_product_name(&product.name)?;
            validate_price(product.price)?;

            if index.insert(product.id, position).is_some() {
                return Err(CoreError::DuplicateProduct(product.id));
            }
        }

        Ok(Catalog { products, index })
    }

    /// Looks up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).map(|&position| &self.products[position])
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.index.contains_key(&id)
    }

    /// All products in configured order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// The built-in demo catalog.
impl Default for Catalog {
    fn default() -> Self {
        let products = vec![
            Product::new(
                1,
                "Wireless Headphones",
                "High-quality wireless headphones with noise cancellation.",
                Money::from_major_minor(199, 99),
                "/img/wirelessheadphone.webp",
            ),
            Product::new(
                2,
                "Smart Watch",
                "Fitness tracking and smartphone notifications.",
                Money::from_major_minor(149, 99),
                "/img/smartwatch.jpg",
            ),
            Product::new(
                3,
                "Bluetooth Speaker",
                "Portable waterproof speaker with 20h battery life.",
                Money::from_major_minor(79, 99),
                "/img/speaker.jpg",
            ),
        ];

        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id, position))
            .collect();

        Catalog { products, index }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_default_catalog() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(1).map(|p| p.price.cents()), Some(19999));
        assert_eq!(catalog.get(3).map(|p| p.name.as_str()), Some("Bluetooth Speaker"));
        assert!(catalog.get(4).is_none());
    }

    #[test]
    fn test_default_catalog_passes_validation() {
        let rebuilt = Catalog::new(Catalog::default().products().to_vec()).unwrap();
        assert_eq!(rebuilt.len(), 3);
    }

    #[test]
    fn test_preserves_order() {
        let catalog = Catalog::new(vec![
            Product::new(9, "Nine", "", Money::from_cents(900), ""),
            Product::new(2, "Two", "", Money::from_cents(200), ""),
        ])
        .unwrap();

        let ids: Vec<_> = catalog.products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![9, 2]);
        assert_eq!(catalog.get(2).map(|p| p.name.as_str()), Some("Two"));
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let result = Catalog::new(vec![
            Product::new(1, "A", "", Money::from_cents(100), ""),
            Product::new(1, "B", "", Money::from_cents(200), ""),
        ]);
        assert!(matches!(result, Err(CoreError::DuplicateProduct(1))));
    }

    #[test]
    fn test_rejects_negative_price() {
        let result = Catalog::new(vec![Product::new(1, "A", "", Money::from_cents(-1), "")]);
        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::MustBeNonNegative { .. }))
        ));
    }

    #[test]
    fn test_empty_catalog_is_allowed() {
        let catalog = Catalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
    }
}
