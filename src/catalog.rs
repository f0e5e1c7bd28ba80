//! Catalog
//!
//! The product catalog is static configuration loaded from YAML:
//!
//! ```yaml
//! products:
//!   - id: "1"
//!     name: Lavender Pillar
//!     price: 15000
//!     box_length_cm: 15
//!     box_width_cm: 10
//!     box_height_cm: 5
//!     box_weight_g: 500
//! ```

use std::{
    fmt::{self, Display, Formatter},
    fs, io,
    num::NonZeroU32,
    path::Path,
};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parcels::{BoxSpec, LineItem};

/// Product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A product as configured in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Product identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Unit price in cents
    pub price: u64,

    /// Box length in centimetres
    #[serde(default)]
    pub box_length_cm: Option<u32>,

    /// Box width in centimetres
    #[serde(default)]
    pub box_width_cm: Option<u32>,

    /// Box height in centimetres
    #[serde(default)]
    pub box_height_cm: Option<u32>,

    /// Box weight in grams
    #[serde(default)]
    pub box_weight_g: Option<u32>,
}

impl CatalogProduct {
    /// Packaging for one unit, with each missing or zero field taken from [`BoxSpec::DEFAULT`].
    pub fn package(&self) -> BoxSpec {
        let or_default = |value: Option<u32>, default: u32| {
            value.filter(|value| *value > 0).unwrap_or(default)
        };

        BoxSpec {
            length_cm: or_default(self.box_length_cm, BoxSpec::DEFAULT.length_cm),
            width_cm: or_default(self.box_width_cm, BoxSpec::DEFAULT.width_cm),
            height_cm: or_default(self.box_height_cm, BoxSpec::DEFAULT.height_cm),
            weight_g: or_default(self.box_weight_g, BoxSpec::DEFAULT.weight_g),
        }
    }
}

/// A requested quantity of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product identifier
    pub product_id: ProductId,

    /// Number of units
    pub quantity: NonZeroU32,
}

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog: {0}")]
    Io(#[from] io::Error),

    /// The catalog file is not valid YAML for a catalog.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_norway::Error),

    /// The same product id appears more than once.
    #[error("duplicate product id {0}")]
    DuplicateProduct(ProductId),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<CatalogProduct>,
}

/// Product lookup table.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: FxHashMap<ProductId, CatalogProduct>,
}

impl Catalog {
    /// Build a catalog from a list of products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`] when two products share an id.
    pub fn new(products: impl IntoIterator<Item = CatalogProduct>) -> Result<Self, CatalogError> {
        let mut map = FxHashMap::default();

        for product in products {
            if let Some(previous) = map.insert(product.id.clone(), product) {
                return Err(CatalogError::DuplicateProduct(previous.id));
            }
        }

        Ok(Self { products: map })
    }

    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error when the YAML is malformed or contains duplicate products.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_norway::from_str(yaml)?;

        Self::new(file.products)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// Look up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&CatalogProduct> {
        self.products.get(id)
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Resolve a product and quantity into a line item.
    ///
    /// Unknown products resolve to the default box and a zero price so shipping can still be
    /// quoted.
    pub fn line_item(&self, product: &ProductId, quantity: NonZeroU32) -> LineItem {
        let (unit_price, package) = self
            .get(product)
            .map_or((0, BoxSpec::DEFAULT), |found| (found.price, found.package()));

        LineItem {
            product: product.clone(),
            quantity,
            unit_price,
            package,
        }
    }

    /// Resolve cart lines into line items.
    pub fn line_items(&self, lines: &[CartLine]) -> Vec<LineItem> {
        lines
            .iter()
            .map(|line| self.line_item(&line.product_id, line.quantity))
            .collect()
    }
}
