use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use vitrine_catalog::{ParsedMetadata, parse_filename, product_slug, size_display};

use crate::CliError;

/// Print the metadata parsed from each filename.
pub(crate) fn run_parse(filenames: &[String], json: bool) -> Result<(), CliError> {
    let parsed: Vec<ParsedMetadata> = filenames.iter().map(|f| parse_filename(f)).collect();

    if json {
        let out = serde_json::to_string_pretty(&parsed)
            .map_err(|e| CliError::other(format!("Failed to serialize: {}", e)))?;
        println!("{out}");
        return Ok(());
    }

    for (filename, meta) in filenames.iter().zip(&parsed) {
        log::info!("{}", filename.if_supports_color(Stdout, |t| t.bold()));
        print_field("Name", &meta.base_name);
        print_field("Slug", &product_slug(&meta.base_name, meta.size_code));
        print_field(
            "Size",
            &match meta.size_code {
                Some(code) => format!(
                    "{} / {} ({})",
                    code,
                    code.label(),
                    size_display(meta.size_code)
                ),
                None => size_display(None).to_string(),
            },
        );
        print_field(
            "Price",
            &meta
                .price
                .map(super::format_price)
                .unwrap_or_else(|| "missing".to_string()),
        );
        print_field(
            "Category",
            &format!("{} / {}", meta.main_category, meta.sub_category),
        );
        print_optional("Brand", meta.brand.as_deref());
        print_optional("Material", meta.material.as_deref());
        print_optional("Shape", meta.shape.as_deref());
        print_optional("Chocolate", meta.chocolate_type.as_deref());
        if !meta.tags.is_empty() {
            print_field("Tags", &meta.tags.join(", "));
        }
        if meta.is_gift_box {
            print_field("Gift box", "yes");
        }
        if meta.is_premium {
            print_field("Premium", "yes");
        }
        crate::log_blank();
    }
    Ok(())
}

fn print_field(label: &str, value: &str) {
    log::info!(
        "  {:<10} {}",
        format!("{label}:").if_supports_color(Stdout, |t| t.dimmed()),
        value
    );
}

fn print_optional(label: &str, value: Option<&str>) {
    if let Some(v) = value {
        print_field(label, v);
    }
}
