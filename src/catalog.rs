//! Product catalog: records, where they come from, and how the home screen
//! filters them.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error};

mod bundled {
    include!(concat!(env!("OUT_DIR"), "/generated_catalog.rs"));
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Program,
    Game,
    Salary,
    /// Unrecognised `type` tags. Listed with the games but only under "All".
    #[serde(other)]
    Other,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Program => "program",
            Category::Game => "game",
            Category::Salary => "salary",
            Category::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// One purchasable tier of a product.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Package {
    pub amount: String,
    #[serde(rename = "priceYER", default)]
    pub price_yer: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub name_ar: String,
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub packages: Vec<Package>,
    #[serde(default)]
    pub withdraw_link: Option<String>,
    #[serde(default)]
    pub explanation_link: Option<String>,
}

impl Product {
    pub fn is_salary(&self) -> bool {
        self.category == Category::Salary
    }

    /// Note text, if it is more than whitespace.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }

    pub fn tutorial_link(&self) -> Option<&str> {
        self.explanation_link
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }
}

pub trait CatalogSource {
    fn load(&self) -> Result<Vec<Product>, CatalogError>;

    fn describe(&self) -> String;
}

/// Catalog read from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileCatalog {
    fn load(&self) -> Result<Vec<Product>, CatalogError> {
        let raw = fs::read(&self.path).map_err(|source| CatalogError::Read {
            path: self.path.clone(),
            source,
        })?;
        parse_products(&raw)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Catalog compiled into the binary from `assets/catalog.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledCatalog;

impl CatalogSource for BundledCatalog {
    fn load(&self) -> Result<Vec<Product>, CatalogError> {
        parse_products(bundled::BUNDLED_CATALOG.content)
    }

    fn describe(&self) -> String {
        format!(
            "bundled catalog (modified {})",
            bundled::BUNDLED_CATALOG.modified_unix
        )
    }
}

pub fn parse_products(raw: &[u8]) -> Result<Vec<Product>, CatalogError> {
    Ok(serde_json::from_slice(raw)?)
}

/// Home screen category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub const CYCLE: [CategoryFilter; 4] = [
        CategoryFilter::All,
        CategoryFilter::Only(Category::Program),
        CategoryFilter::Only(Category::Game),
        CategoryFilter::Only(Category::Salary),
    ];

    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }

    pub fn next(self) -> Self {
        let pos = Self::CYCLE.iter().position(|f| *f == self).unwrap_or(0);
        Self::CYCLE[(pos + 1) % Self::CYCLE.len()]
    }

    pub fn prev(self) -> Self {
        let pos = Self::CYCLE.iter().position(|f| *f == self).unwrap_or(0);
        Self::CYCLE[(pos + Self::CYCLE.len() - 1) % Self::CYCLE.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "الكل",
            CategoryFilter::Only(Category::Program) => "التطبيقات",
            CategoryFilter::Only(Category::Game) => "الألعاب",
            CategoryFilter::Only(Category::Salary) => "الرواتب",
            CategoryFilter::Only(Category::Other) => "أخرى",
        }
    }
}

/// Filtered products split into the three home sections.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogView<'a> {
    pub programs: Vec<&'a Product>,
    pub games: Vec<&'a Product>,
    pub salaries: Vec<&'a Product>,
}

impl<'a> CatalogView<'a> {
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.programs.len() + self.games.len() + self.salaries.len()
    }

    /// Products in display order: programs, games, salaries.
    pub fn flatten(&self) -> Vec<&'a Product> {
        self.programs
            .iter()
            .chain(self.games.iter())
            .chain(self.salaries.iter())
            .copied()
            .collect()
    }
}

#[derive(Debug, Default, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Load from `source`, logging and falling back to an empty catalog on
    /// failure. The error is handed back so the UI can show it.
    pub fn load_from(source: &dyn CatalogSource) -> (Self, Option<CatalogError>) {
        match source.load() {
            Ok(products) => {
                debug!(source = %source.describe(), count = products.len(), "catalog loaded");
                (Self::new(products), None)
            }
            Err(err) => {
                error!(source = %source.describe(), error = %err, "catalog unavailable");
                (Self::default(), Some(err))
            }
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// English names match case-insensitively, Arabic names by substring.
    pub fn filter(&self, search: &str, filter: CategoryFilter) -> CatalogView<'_> {
        let term = search.to_lowercase();
        let term = term.trim();
        let mut view = CatalogView::default();
        for product in &self.products {
            let matches_search =
                product.name.to_lowercase().contains(term) || product.name_ar.contains(term);
            if !matches_search || !filter.matches(product.category) {
                continue;
            }
            match product.category {
                Category::Salary => view.salaries.push(product),
                Category::Program => view.programs.push(product),
                Category::Game | Category::Other => view.games.push(product),
            }
        }
        view
    }
}
