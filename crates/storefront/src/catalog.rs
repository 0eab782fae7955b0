//! Catalog pages loaded from YAML content files.
//!
//! Each file in `content/catalog/` is one catalog page. Items are add-to-cart
//! controls written as attribute maps, exactly the attributes the markup
//! carries:
//!
//! ```yaml
//! title: Glassware Closeouts
//! description: Last cases of discontinued jars.
//! quantities: [1, 5, 10, 25]
//! items:
//!   - sku: CL-1001
//!     name: Mason Jar 16oz
//!     cases-per-case: 12
//!     price-normal: 24.00
//!     price10: 21.50
//!     price-50: 19.00
//! ```
//!
//! `quantities` is optional; when present each item gets a quantity selector
//! for bulk adds.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use closeout_core::capture::{self, AddControl};
use serde::Deserialize;
use thiserror::Error;

/// Errors loading catalog content.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// On-disk shape of a catalog page.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    quantities: Vec<u32>,
    #[serde(default)]
    items: Vec<BTreeMap<String, serde_yaml::Value>>,
}

/// A catalog page with its add controls.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    /// Choices for the bulk-add quantity selector; empty means no selector.
    pub quantities: Vec<u32>,
    pub controls: Vec<AddControl>,
}

impl CatalogPage {
    /// The page's usable add controls.
    pub fn add_controls(&self) -> impl Iterator<Item = &AddControl> {
        capture::discover(&self.controls)
    }
}

/// All catalog pages, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    pages: Arc<HashMap<String, CatalogPage>>,
    order: Arc<Vec<String>>,
}

impl CatalogStore {
    /// Load every `*.yaml` file under `content_dir/catalog`.
    ///
    /// A missing directory yields an empty catalog. Files that fail to parse
    /// are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog directory exists but cannot be read.
    pub fn load(content_dir: &Path) -> Result<Self, CatalogError> {
        let dir = content_dir.join("catalog");
        let mut pages = Vec::new();

        if !dir.exists() {
            tracing::warn!("Catalog directory does not exist: {:?}", dir);
            return Ok(Self::default());
        }

        let entries = std::fs::read_dir(&dir).map_err(|e| CatalogError::Io(e.to_string()))?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                match Self::load_page(&path) {
                    Ok(page) => {
                        tracing::info!(
                            "Loaded catalog page: {} ({} items)",
                            page.slug,
                            page.controls.len()
                        );
                        pages.push(page);
                    }
                    Err(e) => {
                        tracing::error!("Failed to load catalog page {:?}: {}", path, e);
                    }
                }
            }
        }

        pages.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(Self::from_pages(pages))
    }

    /// Build a catalog from already-parsed pages, keeping their order.
    #[must_use]
    pub fn from_pages(pages: Vec<CatalogPage>) -> Self {
        let order = pages.iter().map(|page| page.slug.clone()).collect();
        let pages = pages
            .into_iter()
            .map(|page| (page.slug.clone(), page))
            .collect();
        Self {
            pages: Arc::new(pages),
            order: Arc::new(order),
        }
    }

    fn load_page(path: &Path) -> Result<CatalogPage, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| CatalogError::Parse("Invalid filename".to_string()))?
            .to_string();

        parse_page(slug, &content)
    }

    /// Get a catalog page by slug.
    #[must_use]
    pub fn get_page(&self, slug: &str) -> Option<&CatalogPage> {
        self.pages.get(slug)
    }

    /// All pages in display order.
    pub fn pages(&self) -> impl Iterator<Item = &CatalogPage> {
        self.order.iter().filter_map(|slug| self.pages.get(slug))
    }
}

/// Parse one catalog page from YAML text.
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] if the YAML does not describe a page.
pub fn parse_page(slug: String, yaml: &str) -> Result<CatalogPage, CatalogError> {
    let file: CatalogFile =
        serde_yaml::from_str(yaml).map_err(|e| CatalogError::Parse(e.to_string()))?;

    let controls = file
        .items
        .into_iter()
        .map(|attributes| {
            attributes
                .into_iter()
                .filter_map(|(name, value)| match scalar_text(&value) {
                    Some(text) => Some((name, text)),
                    None => {
                        tracing::warn!(page = %slug, attribute = %name, "Ignoring non-scalar attribute");
                        None
                    }
                })
                .collect::<AddControl>()
        })
        .collect();

    Ok(CatalogPage {
        slug,
        title: file.title,
        description: file.description,
        quantities: file.quantities,
        controls,
    })
}

/// Attribute text for a YAML scalar, the way it would appear in markup.
fn scalar_text(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
