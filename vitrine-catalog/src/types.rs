//! Data model types for the product catalog.
//!
//! `ParsedMetadata` is the ephemeral result of reading one filename;
//! `Product` and `Category` mirror the persisted rows; `ImportLog` tracks
//! import runs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Size Code ───────────────────────────────────────────────────────────────

/// Box/model size token found in filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SizeCode {
    Pm,
    Mm,
    Gm,
    Tgm,
}

impl SizeCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pm => "PM",
            Self::Mm => "MM",
            Self::Gm => "GM",
            Self::Tgm => "TGM",
        }
    }

    /// Human-readable model name shown on the storefront.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pm => "Petit modèle",
            Self::Mm => "Moyen modèle",
            Self::Gm => "Grand modèle",
            Self::Tgm => "Très grand modèle",
        }
    }

    /// Fixed dimension string for the size.
    pub fn dimensions(&self) -> &'static str {
        match self {
            Self::Pm => "20 x 15 cm",
            Self::Mm => "30 x 20 cm",
            Self::Gm => "40 x 30 cm",
            Self::Tgm => "50 x 40 cm",
        }
    }
}

impl fmt::Display for SizeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unknown size code: {0}")]
pub struct ParseSizeCodeError(pub String);

impl FromStr for SizeCode {
    type Err = ParseSizeCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PM" => Ok(Self::Pm),
            "MM" => Ok(Self::Mm),
            "GM" => Ok(Self::Gm),
            "TGM" => Ok(Self::Tgm),
            _ => Err(ParseSizeCodeError(s.to_string())),
        }
    }
}

/// Display string for an optional size: its dimensions, or "Standard".
pub fn size_display(size: Option<SizeCode>) -> &'static str {
    size.map(|s| s.dimensions()).unwrap_or("Standard")
}

// ── Parsed Metadata ─────────────────────────────────────────────────────────

/// Structured fields extracted from a single image filename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedMetadata {
    /// Cleaned product name (extension, price and size removed).
    pub base_name: String,
    pub size_code: Option<SizeCode>,
    /// Price in MAD.
    pub price: Option<f64>,
    pub main_category: String,
    pub sub_category: String,
    pub brand: Option<String>,
    pub material: Option<String>,
    pub shape: Option<String>,
    pub chocolate_type: Option<String>,
    pub tags: Vec<String>,
    pub is_gift_box: bool,
    pub is_premium: bool,
}

// ── Product ─────────────────────────────────────────────────────────────────

/// A catalog product, as stored in the `products` table.
///
/// Every chocolate-domain attribute is present on every product and simply
/// left empty when it does not apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Row id; 0 for a product that has not been inserted yet.
    pub id: i64,
    /// Catalog reference, e.g. `PLA-ALI-GM-1000`.
    pub reference: String,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    /// Display size ("40 x 30 cm" or "Standard").
    pub size: String,
    pub size_code: Option<SizeCode>,
    pub main_image: String,
    /// Secondary images, in display order. Never contains `main_image`.
    pub gallery: Vec<String>,
    pub initial_price: f64,
    pub promo_price: Option<f64>,
    /// "Article Rouge" last-piece merchandising flag.
    pub is_article_rouge: bool,
    pub main_category: String,
    pub sub_category: String,
    /// Brand or origin tag.
    pub store: Option<String>,
    pub is_active: bool,
    pub weight: Option<f64>,
    pub quantity: Option<i64>,
    pub chocolate_type: Option<String>,
    pub ingredients: Option<String>,
    pub allergens: Option<String>,
    pub tags: Vec<String>,
    pub stock: Option<i64>,
    pub sku: Option<String>,
    pub expiration_days: Option<i64>,
    pub is_gift_box: bool,
    pub is_premium: bool,
    pub material: Option<String>,
    pub shape: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Product {
    /// Build an unsaved product from parsed filename metadata.
    ///
    /// A missing price becomes `0.0`, which validation rejects.
    pub fn from_parsed(
        meta: &ParsedMetadata,
        reference: String,
        slug: String,
        main_image: String,
        gallery: Vec<String>,
    ) -> Self {
        Self {
            id: 0,
            reference,
            slug,
            name: meta.base_name.clone(),
            description: None,
            size: size_display(meta.size_code).to_string(),
            size_code: meta.size_code,
            gallery: gallery.into_iter().filter(|g| *g != main_image).collect(),
            main_image,
            initial_price: meta.price.unwrap_or(0.0),
            promo_price: None,
            is_article_rouge: false,
            main_category: meta.main_category.clone(),
            sub_category: meta.sub_category.clone(),
            store: meta.brand.clone(),
            is_active: true,
            weight: None,
            quantity: None,
            chocolate_type: meta.chocolate_type.clone(),
            ingredients: None,
            allergens: None,
            tags: meta.tags.clone(),
            stock: None,
            sku: None,
            expiration_days: None,
            is_gift_box: meta.is_gift_box,
            is_premium: meta.is_premium,
            material: meta.material.clone(),
            shape: meta.shape.clone(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }
}

// ── Category ────────────────────────────────────────────────────────────────

/// A main category and every subcategory seen for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub subcategories: Vec<String>,
}

// ── Import Tracking ─────────────────────────────────────────────────────────

/// Log entry for one import run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportLog {
    pub id: i64,
    pub source: String,
    pub imported_at: String,
    pub records_created: i64,
    pub records_updated: i64,
    pub records_skipped: i64,
    pub records_failed: i64,
}
