use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::error::IngestError;
use crate::table::read_table;
use crate::types::{Product, ProductId};

const CATALOG_COLUMNS: [&str; 3] = [
    "product_id",
    "product_name",
    "product_name_description_processed",
];

/// The product catalog, in file order.
///
/// Row `i` is document `i` of the similarity index built over the same
/// file, so [`Catalog::at`] turns similarity hits back into products.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    positions: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Builds a catalog from rows, rejecting duplicate product ids.
    pub fn from_products(products: Vec<Product>) -> Result<Self, IngestError> {
        let mut positions = HashMap::with_capacity(products.len());
        for (row, product) in products.iter().enumerate() {
            if positions.insert(product.product_id, row).is_some() {
                return Err(IngestError::DuplicateProduct(product.product_id.0));
            }
        }
        Ok(Self {
            products,
            positions,
        })
    }

    /// Loads the catalog CSV. Extra columns are ignored.
    pub fn from_path(path: impl AsRef<Path>, delimiter: u8) -> Result<Self, IngestError> {
        let path = path.as_ref();
        let products = read_table(path, delimiter, &CATALOG_COLUMNS)?;
        let catalog = Self::from_products(products)?;
        info!(
            path = %path.display(),
            products = catalog.len(),
            "catalog_loaded"
        );
        Ok(catalog)
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.position(id).map(|row| &self.products[row])
    }

    /// Row of the product, which is also its similarity-index document.
    pub fn position(&self, id: ProductId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Product at a row.
    pub fn at(&self, row: usize) -> Option<&Product> {
        self.products.get(row)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Processed descriptions in row order, the corpus of the similarity index.
    pub fn processed_descriptions(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(|p| p.processed_description.as_str())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
