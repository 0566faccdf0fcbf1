//! JSON resource catalogue, standing in for a package backend.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::featured::ResourceLookup;
use crate::models::{CatalogFile, Resource};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    resources: HashMap<String, Resource>,
}

impl Catalog {
    /// Load `{ "resources": [ ... ] }`. Later duplicates replace earlier ones.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::ReadFailed(e, path.to_path_buf()))?;
        let file: CatalogFile = serde_json::from_str(&content)
            .map_err(|e| CatalogError::ParseFailed(e, path.to_path_buf()))?;
        Ok(Self::from_resources(file.resources))
    }

    pub fn from_resources(resources: impl IntoIterator<Item = Resource>) -> Self {
        Self {
            resources: resources
                .into_iter()
                .map(|r| (r.package_name.clone(), r))
                .collect(),
        }
    }

    pub fn get(&self, package_name: &str) -> Option<&Resource> {
        self.resources.get(package_name)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl ResourceLookup for Catalog {
    fn resource_by_package_name(&self, name: &str) -> Option<Resource> {
        self.get(name).cloned()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalogue {1}: {0}")]
    ReadFailed(std::io::Error, PathBuf),
    #[error("Failed to parse catalogue {1}: {0}")]
    ParseFailed(serde_json::Error, PathBuf),
}
