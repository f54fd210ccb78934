//! Product catalog data model and filename metadata extraction.
//!
//! This crate is pure: it turns image filenames into structured product
//! metadata, derives catalog identifiers, groups image files per product and
//! validates drafts. It has no database or filesystem dependencies; the
//! `vitrine-db` and `vitrine-import` crates build on these types.

pub mod filename_parser;
pub mod grouping;
pub mod ident;
pub mod keywords;
pub mod types;
pub mod validate;

pub use filename_parser::{
    clean_product_name, detect_brand, detect_chocolate_type, detect_is_gift_box,
    detect_is_premium, detect_main_category, detect_material, detect_shape, detect_sub_category,
    detect_tags, extract_price, extract_size_code, parse_filename,
};
pub use grouping::{FileGroup, group_files_by_product, group_key};
pub use ident::{ExistingIdent, IdentRegistry, MAX_SLUG_LEN, create_slug, generate_ref, product_slug};
pub use types::*;
pub use validate::validate_product_data;
