//! Data structures for navigation requests and the JSON files dnav reads.

use serde::{Deserialize, Serialize};

/// Properties handed to a page factory, one variant per destination kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavRequest {
    Category(CategoryRequest),
    Search(SearchRequest),
    Detail(DetailRequest),
    Reviews(ReviewsRequest),
    Addons(AddonsRequest),
}

impl NavRequest {
    /// Short name of the destination kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            NavRequest::Category(_) => "category",
            NavRequest::Search(_) => "search",
            NavRequest::Detail(_) => "detail",
            NavRequest::Reviews(_) => "reviews",
            NavRequest::Addons(_) => "addons",
        }
    }
}

/// Browse a category (and its subcategories).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryRequest {
    pub category: String,
    pub icon: String,
}

/// A filtered application list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub origin: Option<String>,
    pub mime_type: Option<String>,
    pub extends: Option<String>,
}

/// A single application's detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRequest {
    pub package_name: String,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsRequest {
    pub package_name: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonsRequest {
    pub package_name: String,
    pub name: String,
}

/// One entry of the featured listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedDescriptor {
    pub package: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// A resource as returned by the resource lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub package_name: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub screenshot: Option<String>,
}

/// A row of the featured list model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedRow {
    pub text: String,
    pub image: String,
    pub icon: String,
    pub comment: String,
    pub package_name: String,
}

/// Catalogue file: `{ "resources": [ ... ] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub resources: Vec<Resource>,
}
