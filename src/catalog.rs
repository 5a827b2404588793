//! The read-only list of properties on sale.

use crate::property::{Category, Property};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog is not a valid property list: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog has no property at position {index}, it lists {len}")]
    UnknownProperty { index: usize, len: usize },
}

/// Properties in the order the data source lists them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    properties: Vec<Property>,
}

impl Catalog {
    pub fn new(properties: Vec<Property>) -> Self {
        Self { properties }
    }

    /// Parses a JSON array of properties.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let properties: Vec<Property> = serde_json::from_str(json)?;
        Ok(Self::new(properties))
    }

    /// Reads a JSON catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        info!(path = %path.display(), properties = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Returns the property at `index`.
    pub fn get(&self, index: usize) -> Result<&Property, CatalogError> {
        self.properties
            .get(index)
            .ok_or(CatalogError::UnknownProperty {
                index,
                len: self.properties.len(),
            })
    }

    /// Properties of one category, with their catalog position, in catalog order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = (usize, &Property)> {
        self.properties
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.category == category)
    }

    /// Every category with its properties, in display order. Empty categories are kept.
    pub fn grouped(&self) -> Vec<(Category, Vec<(usize, &Property)>)> {
        Category::ordered()
            .into_iter()
            .map(|category| (category, self.by_category(category).collect()))
            .collect()
    }

    pub fn featured(&self) -> impl Iterator<Item = (usize, &Property)> {
        self.properties.iter().enumerate().filter(|(_, p)| p.featured)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
