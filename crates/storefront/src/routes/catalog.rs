//! Catalog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use closeout_core::capture::{AddControl, AttributeSource, attr};
use tracing::instrument;

use crate::catalog::CatalogPage;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Catalog page link for the index.
#[derive(Clone)]
pub struct PageLink {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub item_count: usize,
}

/// One add control as rendered on a catalog page.
#[derive(Clone)]
pub struct AddControlView {
    pub name: String,
    pub sku: String,
    pub cases_per_case: String,
    pub price_normal: String,
    pub price10: String,
    pub price50: String,
    /// Attributes posted back as hidden inputs when the control is used.
    pub attributes: Vec<(String, String)>,
}

impl AddControlView {
    /// View for a control, or `None` when its attributes do not describe
    /// an item.
    fn from_control(control: &AddControl, has_selector: bool) -> Option<Self> {
        let item = control.catalog_item().ok()?;
        let offered = |price: closeout_core::Price| {
            if price.is_offered() {
                price.to_string()
            } else {
                String::new()
            }
        };

        Some(Self {
            sku: item.sku.to_string(),
            cases_per_case: control
                .attribute(attr::CASES_PER_CASE)
                .unwrap_or_default()
                .to_string(),
            price_normal: offered(item.price_normal),
            price10: offered(item.price10),
            price50: offered(item.price50),
            attributes: control
                .attributes()
                // The selector supplies the quantity.
                .filter(|(name, _)| !(has_selector && *name == attr::QUANTITY))
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            name: item.name,
        })
    }
}

/// Catalog index template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogIndexTemplate {
    pub pages: Vec<PageLink>,
    pub order_form_url: String,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/show.html")]
pub struct CatalogShowTemplate {
    pub title: String,
    pub description: Option<String>,
    pub quantities: Vec<u32>,
    pub controls: Vec<AddControlView>,
    pub order_form_url: String,
}

impl CatalogShowTemplate {
    fn new(page: &CatalogPage, order_form_url: String) -> Self {
        let has_selector = !page.quantities.is_empty();
        Self {
            title: page.title.clone(),
            description: page.description.clone(),
            quantities: page.quantities.clone(),
            controls: page
                .add_controls()
                .filter_map(|control| AddControlView::from_control(control, has_selector))
                .collect(),
            order_form_url,
        }
    }
}

/// List catalog pages.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> CatalogIndexTemplate {
    let pages = state
        .catalog()
        .pages()
        .map(|page| PageLink {
            slug: page.slug.clone(),
            title: page.title.clone(),
            description: page.description.clone(),
            item_count: page.add_controls().count(),
        })
        .collect();

    CatalogIndexTemplate {
        pages,
        order_form_url: state.config().order_form_url.to_string(),
    }
}

/// Display one catalog page with its add controls.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<CatalogShowTemplate> {
    let page = state
        .catalog()
        .get_page(&slug)
        .ok_or_else(|| AppError::NotFound(format!("catalog page '{slug}'")))?;

    Ok(CatalogShowTemplate::new(
        page,
        state.config().order_form_url.to_string(),
    ))
}
