//! Parser for product image filenames.
//!
//! Image files are named after the product they show:
//! ```text
//! <name>[ <size-code>]_<price> MAD.<ext>
//! Petit plateau rectangulaire en similicuir rose Alice GM_1000 MAD.jpeg
//! ```
//!
//! This module extracts the size code and price, cleans the display name,
//! and classifies the product (category, subcategory, brand, material, ...)
//! by matching the name against the tables in [`crate::keywords`].

use std::sync::LazyLock;

use regex::Regex;

use crate::keywords::{
    BRANDS, CHOCOLATE_TYPES, DEFAULT_MAIN_CATEGORY, DEFAULT_SUB_CATEGORY, GIFT_BOX_KEYWORDS,
    MAIN_CATEGORIES, MATERIALS, PREMIUM_KEYWORDS, SHAPES, SUB_CATEGORY_MATERIALS, TAGS,
};
use crate::types::{ParsedMetadata, SizeCode};

static SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|[_\s])(TGM|GM|MM|PM)[_\s]").expect("valid regex"));

static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[_\s](\d+(?:[.,]\d+)?)\s*MAD").expect("valid regex")
});

static EXTENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(?:jpe?g|png)$").expect("valid regex"));

static TRAILING_SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[_\s]+(?:TGM|GM|MM|PM)$").expect("valid regex"));

/// Material phrases ordered longest first; ties keep table order.
static MATERIALS_BY_LENGTH: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let mut sorted = SUB_CATEGORY_MATERIALS.to_vec();
    sorted.sort_by_key(|k| std::cmp::Reverse(k.chars().count()));
    sorted
});

/// Parse a filename into structured product metadata.
///
/// # Examples
///
/// ```
/// use vitrine_catalog::{parse_filename, SizeCode};
///
/// let meta = parse_filename("Petit plateau rectangulaire en similicuir rose Alice GM_1000 MAD.jpeg");
/// assert_eq!(meta.base_name, "Petit plateau rectangulaire en similicuir rose Alice");
/// assert_eq!(meta.main_category, "Plateaux");
/// assert_eq!(meta.sub_category, "Similicuir");
/// assert_eq!(meta.brand.as_deref(), Some("Alice"));
/// assert_eq!(meta.size_code, Some(SizeCode::Gm));
/// assert_eq!(meta.price, Some(1000.0));
/// ```
pub fn parse_filename(filename: &str) -> ParsedMetadata {
    let base_name = clean_product_name(filename);

    let is_gift_box = detect_is_gift_box(&base_name);
    let is_premium = detect_is_premium(&base_name);

    ParsedMetadata {
        size_code: extract_size_code(filename),
        price: extract_price(filename),
        main_category: detect_main_category(&base_name),
        sub_category: detect_sub_category(&base_name),
        brand: detect_brand(&base_name),
        material: detect_material(&base_name),
        shape: detect_shape(&base_name),
        chocolate_type: detect_chocolate_type(&base_name),
        tags: detect_tags(&base_name),
        is_gift_box,
        is_premium,
        base_name,
    }
}

/// Extract the first size token (`TGM`, `GM`, `MM`, `PM`) that is followed by
/// `_` or whitespace.
pub fn extract_size_code(filename: &str) -> Option<SizeCode> {
    SIZE_RE
        .captures(filename)
        .and_then(|caps| caps[1].parse().ok())
}

/// Extract the price written just before the `MAD` currency marker.
///
/// Accepts `.` or `,` as decimal separator. When several numbers precede a
/// `MAD`, the last marker in the filename is the price.
pub fn extract_price(filename: &str) -> Option<f64> {
    let (_, amount) = price_marker(filename)?;
    amount.replace(',', ".").parse().ok()
}

/// Reduce a filename to the product's display name.
///
/// Strips the image extension, the `_<price> MAD` marker and anything after
/// it, a trailing size token, and trailing separators.
pub fn clean_product_name(filename: &str) -> String {
    let name = EXTENSION_RE.replace(filename, "");
    let name = match price_marker(&name) {
        Some((start, _)) => &name[..start],
        None => &name[..],
    };
    let name = TRAILING_SIZE_RE.replace(name, "");
    name.trim_end_matches(['_', '-', ' ', '.'])
        .trim()
        .to_string()
}

/// Main category from the name prefix; [`DEFAULT_MAIN_CATEGORY`] if none match.
pub fn detect_main_category(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    MAIN_CATEGORIES
        .iter()
        .find(|(prefix, _)| lower.starts_with(prefix))
        .map(|(_, category)| category.to_string())
        .unwrap_or_else(|| DEFAULT_MAIN_CATEGORY.to_string())
}

/// Subcategory from the first (longest) material phrase in the name.
///
/// Without a material, words 3–4 of the name are used as a descriptive
/// subcategory when the name has at least three words.
pub fn detect_sub_category(name: &str) -> String {
    let lower = name.to_lowercase();
    if let Some(&keyword) = MATERIALS_BY_LENGTH.iter().find(|k| lower.contains(**k)) {
        let keyword = keyword.strip_prefix("en ").unwrap_or(keyword);
        return title_case(keyword);
    }

    let words: Vec<&str> = name.split_whitespace().collect();
    if words.len() >= 3 {
        let end = words.len().min(4);
        return title_case(&words[2..end].join(" "));
    }

    DEFAULT_SUB_CATEGORY.to_string()
}

/// Brand whose name appears as a whole word in the product name.
pub fn detect_brand(name: &str) -> Option<String> {
    let lower = name.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    BRANDS
        .iter()
        .find(|brand| words.contains(&brand.to_lowercase().as_str()))
        .map(|brand| brand.to_string())
}

/// Shape label (e.g. `Rectangulaire`) of the first shape keyword in the name.
pub fn detect_shape(name: &str) -> Option<String> {
    first_match(name, SHAPES)
}

/// Material label of the first material keyword in the name.
pub fn detect_material(name: &str) -> Option<String> {
    first_match(name, MATERIALS)
}

/// Chocolate type of the first chocolate keyword in the name.
pub fn detect_chocolate_type(name: &str) -> Option<String> {
    first_match(name, CHOCOLATE_TYPES)
}

/// Every marketing tag whose keyword appears in the name, first occurrence
/// order, without duplicates.
pub fn detect_tags(name: &str) -> Vec<String> {
    let lower = name.to_lowercase();
    let mut tags: Vec<String> = Vec::new();
    for (keyword, tag) in TAGS {
        if lower.contains(keyword) && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

pub fn detect_is_gift_box(name: &str) -> bool {
    contains_any(name, GIFT_BOX_KEYWORDS)
}

pub fn detect_is_premium(name: &str) -> bool {
    contains_any(name, PREMIUM_KEYWORDS)
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Byte offset and amount of the last `<amount> MAD` marker.
///
/// `MAD` must not run into a word, so "6 madeleines" is not a price.
fn price_marker(filename: &str) -> Option<(usize, &str)> {
    PRICE_RE
        .captures_iter(filename)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let amount = caps.get(1)?;
            let ends_word = filename[whole.end()..]
                .chars()
                .next()
                .is_none_or(|c| !c.is_alphabetic());
            ends_word.then_some((whole.start(), amount.as_str()))
        })
        .last()
}

fn first_match(name: &str, table: &[(&str, &str)]) -> Option<String> {
    let lower = name.to_lowercase();
    table
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, value)| value.to_string())
}

fn contains_any(name: &str, keywords: &[&str]) -> bool {
    let lower = name.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

/// Upper-case the first letter of each word, lower-case the rest.
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
