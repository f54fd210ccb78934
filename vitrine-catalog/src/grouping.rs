//! Group image files that show the same product.
//!
//! Files whose cleaned name, size code and price all agree belong to one
//! product; the first file is the main image and the rest form the gallery.
//! Two distinct products sharing all three values end up in the same group.

use std::collections::HashMap;

use crate::filename_parser::{clean_product_name, extract_price, extract_size_code};

/// The image files of one logical product, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    pub key: String,
    pub files: Vec<String>,
}

impl FileGroup {
    pub fn main_image(&self) -> &str {
        &self.files[0]
    }

    pub fn gallery(&self) -> &[String] {
        &self.files[1..]
    }
}

/// Grouping key: `{clean name}_{size code}_{price}`, with `null` for missing
/// parts.
pub fn group_key(filename: &str) -> String {
    let name = clean_product_name(filename);
    let size = extract_size_code(filename)
        .map(|s| s.as_str().to_string())
        .unwrap_or_else(|| "null".to_string());
    let price = extract_price(filename)
        .map(|p| p.to_string())
        .unwrap_or_else(|| "null".to_string());
    format!("{name}_{size}_{price}")
}

/// Partition filenames into per-product groups.
///
/// Groups are returned in order of first appearance; files keep their input
/// order within a group. A filename repeated in the input is kept once.
pub fn group_files_by_product<S: AsRef<str>>(filenames: &[S]) -> Vec<FileGroup> {
    let mut groups: Vec<FileGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for filename in filenames {
        let filename = filename.as_ref();
        let key = group_key(filename);
        match index.get(&key) {
            Some(&i) => {
                let files = &mut groups[i].files;
                if !files.iter().any(|f| f == filename) {
                    files.push(filename.to_string());
                }
            }
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(FileGroup {
                    key,
                    files: vec![filename.to_string()],
                });
            }
        }
    }

    groups
}
