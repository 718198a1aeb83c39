use serde::{Deserialize, Serialize};

/// A catalog product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub product_id: String,
    pub product_name: String,
}

/// Mock product catalog backing the protected endpoints. Stateless
/// fixture data; a real deployment would swap this for a backing store.
#[derive(Debug, Clone)]
pub struct ProductService {
    products: Vec<Product>,
}

impl Default for ProductService {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductService {
    pub fn new() -> Self {
        Self {
            products: vec![
                Product {
                    product_id: "001".to_string(),
                    product_name: "product-name-001".to_string(),
                },
                Product {
                    product_id: "002".to_string(),
                    product_name: "product-name-002".to_string(),
                },
            ],
        }
    }

    /// Look up one product by id.
    pub fn get_product(&self, product_id: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|product| product.product_id == product_id)
    }

    /// All products in the catalog.
    pub fn get_products(&self) -> &[Product] {
        &self.products
    }
}
