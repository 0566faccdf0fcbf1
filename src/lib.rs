//! dnav - Discover navigation
//!
//! Page stack with breadcrumb tracking for a software center shell, plus the
//! featured listing helper and a headless replay driver.

pub mod breadcrumb;
pub mod catalog;
pub mod config;
pub mod featured;
pub mod models;
pub mod navigate;
pub mod paths;
pub mod replay;
pub mod shell;
pub mod stack;

pub use breadcrumb::{BreadcrumbTrail, Breadcrumbs, Marker};
pub use catalog::Catalog;
pub use config::{get_config_value, get_config_values, set_config_value, Settings};
pub use featured::{load_featured, populate_featured, FeaturedListing, ResourceLookup};
pub use models::{FeaturedRow, NavRequest, Resource};
pub use navigate::{Navigator, PageFactories};
pub use paths::Paths;
pub use replay::{replay, Step};
pub use shell::ShellState;
pub use stack::{FactoryError, NavError, NavigationStack, PageEntry, PageFactory, Push};
