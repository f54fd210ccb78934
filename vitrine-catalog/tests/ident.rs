use std::collections::HashSet;

use vitrine_catalog::ident::*;
use vitrine_catalog::parse_filename;
use vitrine_catalog::types::SizeCode;

#[test]
fn ref_format() {
    let existing = HashSet::new();
    let r = generate_ref("Plateaux", Some("Alice"), Some(SizeCode::Gm), Some(1000.0), &existing);
    assert_eq!(r, "PLA-ALI-GM-1000");
}

#[test]
fn ref_placeholders() {
    let existing = HashSet::new();
    assert_eq!(generate_ref("Boîtes Cadeaux", None, None, None, &existing), "BOI-GEN-STD-0000");
    assert_eq!(
        generate_ref("Vases", None, Some(SizeCode::Pm), Some(45.0), &existing),
        "VAS-GEN-PM-0045"
    );
}

#[test]
fn ref_collision_appends_suffix() {
    let existing: HashSet<String> = ["PLA-ALI-GM-1000", "PLA-ALI-GM-1000-1"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let r = generate_ref("Plateaux", Some("Alice"), Some(SizeCode::Gm), Some(1000.0), &existing);
    assert_eq!(r, "PLA-ALI-GM-1000-2");
    // The snapshot is not modified
    assert_eq!(existing.len(), 2);
}

#[test]
fn ref_is_deterministic() {
    let existing: HashSet<String> = ["VAS-GEN-STD-0100".to_string()].into_iter().collect();
    let a = generate_ref("Vases", None, None, Some(100.0), &existing);
    let b = generate_ref("Vases", None, None, Some(100.0), &existing);
    assert_eq!(a, b);
}

#[test]
fn registry_never_repeats_refs() {
    let mut registry = IdentRegistry::new(vec![ExistingIdent {
        reference: "PLA-GEN-STD-0100".to_string(),
        slug: "plateau".to_string(),
        price: 100.0,
    }]);
    let meta = parse_filename("Plateau_100 MAD.jpg");
    let refs: HashSet<String> = (0..5).map(|_| registry.assign_ref(&meta)).collect();
    assert_eq!(refs.len(), 5);
    assert!(!refs.contains("PLA-GEN-STD-0100"));
    assert!(refs.contains("PLA-GEN-STD-0100-1"));
}

#[test]
fn slug_basic() {
    assert_eq!(create_slug("Petit plateau  rose -- Alice!"), "petit-plateau-rose-alice");
    assert_eq!(create_slug("  --Vase--  "), "vase");
}

#[test]
fn slug_strips_accents() {
    assert_eq!(create_slug("Légère Boîte"), create_slug("Legere Boite"));
    assert_eq!(create_slug("Légère Boîte"), "legere-boite");
    assert_eq!(create_slug("Cœur doré"), "coeur-dore");
}

#[test]
fn slug_is_deterministic() {
    let s = "Boîte cadeau rectangulaire PM";
    assert_eq!(create_slug(s), create_slug(s));
}

#[test]
fn product_slug_includes_size() {
    assert_eq!(
        product_slug("Petit plateau rectangulaire en similicuir rose Alice", Some(SizeCode::Gm)),
        "petit-plateau-rectangulaire-en-similicuir-rose-alice-gm"
    );
    assert_eq!(product_slug("Vase en verre", None), "vase-en-verre");
}

#[test]
fn product_slug_is_truncated() {
    let long_name = "plateau ".repeat(30);
    let slug = product_slug(&long_name, None);
    assert!(slug.len() <= MAX_SLUG_LEN);
    assert!(!slug.ends_with('-'));
}

#[test]
fn registry_disambiguates_slugs_within_run() {
    let mut registry = IdentRegistry::default();
    let a = parse_filename("Vase en verre GM_100 MAD.jpg");
    let b = parse_filename("Vase en verre GM_150 MAD.jpg");
    let c = parse_filename("Vase en verre GM_150 MAD.png");

    assert_eq!(registry.assign_slug(&a), "vase-en-verre-gm");
    assert_eq!(registry.assign_slug(&b), "vase-en-verre-gm-0150");
    assert_eq!(registry.assign_slug(&c), "vase-en-verre-gm-0150-1");
}

fn existing(reference: &str, slug: &str, price: f64) -> ExistingIdent {
    ExistingIdent {
        reference: reference.to_string(),
        slug: slug.to_string(),
        price,
    }
}

#[test]
fn catalog_slug_is_reused_by_the_same_product() {
    let mut registry = IdentRegistry::new(vec![existing("VAS-GEN-GM-0100", "vase-gm", 100.0)]);
    assert_eq!(registry.assign_slug(&parse_filename("Vase GM_100 MAD.jpg")), "vase-gm");
}

#[test]
fn catalog_slug_is_not_given_to_a_price_variant() {
    let mut registry = IdentRegistry::new(vec![existing("VAS-GEN-GM-0100", "vase-gm", 100.0)]);
    assert_eq!(
        registry.assign_slug(&parse_filename("Vase GM_050 MAD.jpg")),
        "vase-gm-0050"
    );
    assert_eq!(registry.assign_slug(&parse_filename("Vase GM_100 MAD.jpg")), "vase-gm");
}

#[test]
fn catalog_slug_owner_survives_a_price_change() {
    // Price synced to 80 after creation; the reference still says 0100.
    let mut registry = IdentRegistry::new(vec![existing("VAS-GEN-GM-0100", "vase-gm", 80.0)]);
    assert_eq!(registry.assign_slug(&parse_filename("Vase GM_100 MAD.jpg")), "vase-gm");
    assert_eq!(
        registry.assign_slug(&parse_filename("Vase GM_080 MAD.jpg")),
        "vase-gm-0080"
    );
}

#[test]
fn hand_made_reference_falls_back_to_stored_price() {
    let mut registry = IdentRegistry::new(vec![existing("LEGACY-REF", "vase-en-verre", 150.0)]);
    assert_eq!(
        registry.assign_slug(&parse_filename("Vase en verre_150 MAD.jpg")),
        "vase-en-verre"
    );
    assert_eq!(
        registry.assign_slug(&parse_filename("Vase en verre_90 MAD.jpg")),
        "vase-en-verre-0090"
    );
}
