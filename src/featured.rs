//! Featured applications listing.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::models::{FeaturedDescriptor, FeaturedRow, Resource};

/// Resolves package names to resources.
pub trait ResourceLookup {
    fn resource_by_package_name(&self, name: &str) -> Option<Resource>;
}

/// Ordered featured listing, keyed as in the listing file.
pub type FeaturedListing = IndexMap<String, FeaturedDescriptor>;

/// Build list rows for every listed package the lookup knows about.
/// Unknown packages are skipped.
pub fn populate_featured(
    listing: &FeaturedListing,
    lookup: &dyn ResourceLookup,
    default_screenshot: &str,
) -> Vec<FeaturedRow> {
    let mut rows = Vec::new();
    for (key, descriptor) in listing {
        let resource = match lookup.resource_by_package_name(&descriptor.package) {
            Some(r) => r,
            None => {
                debug!(key = %key, package = %descriptor.package, "Featured package not found");
                continue;
            }
        };

        let image = descriptor
            .image
            .clone()
            .filter(|i| !i.is_empty())
            .or_else(|| resource.screenshot.clone().filter(|s| !s.is_empty()))
            .unwrap_or_else(|| default_screenshot.to_string());

        rows.push(FeaturedRow {
            text: resource.name,
            image,
            icon: resource.icon,
            comment: resource.comment,
            package_name: resource.package_name,
        });
    }
    rows
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListingFile {
    Keyed(FeaturedListing),
    Packages(Vec<String>),
}

/// Read a featured listing.
///
/// Accepts either `{ "<key>": { "package": "...", "image": "..." } }` or a plain
/// array of package names.
pub fn load_featured(path: &Path) -> Result<FeaturedListing, FeaturedError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| FeaturedError::ReadFailed(e, path.to_path_buf()))?;
    let parsed: ListingFile = serde_json::from_str(&content)
        .map_err(|e| FeaturedError::ParseFailed(e, path.to_path_buf()))?;

    Ok(match parsed {
        ListingFile::Keyed(map) => map,
        ListingFile::Packages(packages) => packages
            .into_iter()
            .map(|package| {
                (
                    package.clone(),
                    FeaturedDescriptor {
                        package,
                        image: None,
                    },
                )
            })
            .collect(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum FeaturedError {
    #[error("Failed to read featured listing {1}: {0}")]
    ReadFailed(std::io::Error, PathBuf),
    #[error("Failed to parse featured listing {1}: {0}")]
    ParseFailed(serde_json::Error, PathBuf),
}
