//! Catalog reference and slug generation.
//!
//! References look like `PLA-ALI-GM-1000`: three letters of the main
//! category, three letters of the brand (or `GEN`), the size code (or `STD`)
//! and the last four digits of the price. Collisions get a numeric suffix.

use std::collections::{HashMap, HashSet};

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::types::{ParsedMetadata, SizeCode};

/// Maximum slug length stored in the catalog.
pub const MAX_SLUG_LEN: usize = 100;

/// Generate a reference that is not present in `existing`.
///
/// Deterministic for a given `existing` snapshot. The set is not modified;
/// callers record the result themselves (see [`IdentRegistry`]).
pub fn generate_ref(
    main_category: &str,
    brand: Option<&str>,
    size_code: Option<SizeCode>,
    price: Option<f64>,
    existing: &HashSet<String>,
) -> String {
    let category = code3(main_category).unwrap_or_else(|| "GEN".to_string());
    let brand = brand.and_then(code3).unwrap_or_else(|| "GEN".to_string());
    let size = size_code.map(|s| s.as_str()).unwrap_or("STD");
    let candidate = format!("{category}-{brand}-{size}-{}", price4(price));

    if !existing.contains(&candidate) {
        return candidate;
    }

    let mut n = 1u32;
    loop {
        let suffixed = format!("{candidate}-{n}");
        if !existing.contains(&suffixed) {
            return suffixed;
        }
        n += 1;
    }
}

/// Convert text to a URL-safe slug.
///
/// Accents are stripped, so `"Légère Boîte"` and `"Legere Boite"` give the
/// same slug.
pub fn create_slug(text: &str) -> String {
    let folded = fold_accents(text);
    let mut result = String::with_capacity(folded.len());
    let mut last_was_separator = false;

    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_separator = false;
        } else if !last_was_separator && !result.is_empty() {
            result.push('-');
            last_was_separator = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

/// Cut a slug to at most `max` characters without leaving a trailing hyphen.
pub fn truncate_slug(slug: &str, max: usize) -> String {
    // Slugs are ASCII, so byte and char boundaries coincide.
    let cut = if slug.len() > max { &slug[..max] } else { slug };
    cut.trim_end_matches('-').to_string()
}

/// Slug for a product: its name plus the size code when present.
pub fn product_slug(base_name: &str, size_code: Option<SizeCode>) -> String {
    let text = match size_code {
        Some(size) => format!("{base_name} {size}"),
        None => base_name.to_string(),
    };
    truncate_slug(&create_slug(&text), MAX_SLUG_LEN)
}

/// A product already in the catalog, as seen by [`IdentRegistry`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExistingIdent {
    pub reference: String,
    pub slug: String,
    pub price: f64,
}

impl ExistingIdent {
    /// Price code the product was created with.
    ///
    /// Taken from the fourth segment of a generated reference, so later price
    /// changes do not alter it. Hand-made references fall back to the stored
    /// price.
    fn price_code(&self) -> String {
        self.reference
            .split('-')
            .nth(3)
            .filter(|seg| seg.len() == 4 && seg.bytes().all(|b| b.is_ascii_digit()))
            .map(str::to_string)
            .unwrap_or_else(|| price4(Some(self.price)))
    }
}

/// Identifiers handed out during one import run.
///
/// Seeded with the catalog's references and slugs. A catalog slug is only
/// handed out again to a product with the same price code, so that the slug
/// lookup finds the product the slug belongs to and never a price variant.
#[derive(Debug, Default, Clone)]
pub struct IdentRegistry {
    refs: HashSet<String>,
    /// Catalog slug -> price code of the product owning it.
    catalog_slugs: HashMap<String, String>,
    run_slugs: HashSet<String>,
}

impl IdentRegistry {
    pub fn new(existing: impl IntoIterator<Item = ExistingIdent>) -> Self {
        let mut registry = Self::default();
        for ident in existing {
            registry
                .catalog_slugs
                .insert(ident.slug.clone(), ident.price_code());
            registry.refs.insert(ident.reference);
        }
        registry
    }

    /// Generate a unique reference for `meta` and record it.
    pub fn assign_ref(&mut self, meta: &ParsedMetadata) -> String {
        let reference = generate_ref(
            &meta.main_category,
            meta.brand.as_deref(),
            meta.size_code,
            meta.price,
            &self.refs,
        );
        self.refs.insert(reference.clone());
        reference
    }

    /// Pick a slug for `meta` and record it.
    ///
    /// Candidates are name + size, then name + size + price, then numeric
    /// suffixes. A candidate is taken when no product of this run has it and
    /// it is either unused in the catalog or owned there by a product with the
    /// same price code.
    pub fn assign_slug(&mut self, meta: &ParsedMetadata) -> String {
        let price = price4(meta.price);
        let primary = product_slug(&meta.base_name, meta.size_code);
        let size = meta.size_code.map(|s| s.as_str()).unwrap_or("");
        let with_price = truncate_slug(
            &create_slug(&format!("{} {size} {price}", meta.base_name)),
            MAX_SLUG_LEN,
        );

        let mut n = 0u32;
        loop {
            let candidate = match n {
                0 => primary.clone(),
                1 => with_price.clone(),
                _ => {
                    let suffix = format!("-{}", n - 1);
                    let base = truncate_slug(&with_price, MAX_SLUG_LEN - suffix.len());
                    format!("{base}{suffix}")
                }
            };
            n += 1;

            if self.run_slugs.contains(&candidate) {
                continue;
            }
            let available = match self.catalog_slugs.get(&candidate) {
                Some(owner_price) => *owner_price == price,
                None => true,
            };
            if available {
                self.run_slugs.insert(candidate.clone());
                return candidate;
            }
        }
    }
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// Decompose and drop combining marks; expand common ligatures.
fn fold_accents(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(|c| match c {
            'œ' => vec!['o', 'e'],
            'Œ' => vec!['O', 'E'],
            'æ' => vec!['a', 'e'],
            'Æ' => vec!['A', 'E'],
            'ß' => vec!['s', 's'],
            other => vec![other],
        })
        .collect()
}

/// First three ASCII alphanumerics after accent folding, upper-cased.
fn code3(text: &str) -> Option<String> {
    let code: String = fold_accents(text)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(3)
        .collect::<String>()
        .to_ascii_uppercase();
    if code.is_empty() { None } else { Some(code) }
}

/// Integer part of the price, zero-padded, last four digits.
fn price4(price: Option<f64>) -> String {
    match price {
        Some(p) if p.is_finite() && p >= 0.0 => {
            let digits = format!("{:04}", p.trunc() as u64);
            digits[digits.len() - 4..].to_string()
        }
        _ => "0000".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price4_pads_and_keeps_last_digits() {
        assert_eq!(price4(Some(220.0)), "0220");
        assert_eq!(price4(Some(1000.0)), "1000");
        assert_eq!(price4(Some(12500.0)), "2500");
        assert_eq!(price4(Some(99.9)), "0099");
        assert_eq!(price4(None), "0000");
    }

    #[test]
    fn code3_folds_accents() {
        assert_eq!(code3("Boîtes Cadeaux").as_deref(), Some("BOI"));
        assert_eq!(code3("Sièges").as_deref(), Some("SIE"));
        assert_eq!(code3("--"), None);
    }
}
