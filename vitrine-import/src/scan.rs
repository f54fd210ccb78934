//! Directory scanner for product images.

use std::io;
use std::path::Path;

/// File extensions accepted as product images (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png"];

/// Whether `filename` has one of the [`IMAGE_EXTENSIONS`].
pub fn is_image_file(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// List the image filenames directly inside `dir`, sorted by name.
///
/// Subdirectories, other file types and names that are not valid UTF-8 are
/// skipped.
pub fn scan_image_files(dir: &Path) -> io::Result<Vec<String>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            log::warn!("Skipping non UTF-8 filename: {:?}", entry.file_name());
            continue;
        };
        if is_image_file(&name) {
            files.push(name);
        } else {
            log::debug!("Ignoring non-image file: {}", name);
        }
    }

    files.sort();
    Ok(files)
}
