use vitrine_catalog::types::*;
use vitrine_catalog::parse_filename;
use vitrine_db::*;

fn test_product() -> Product {
    let meta = parse_filename("Petit plateau rectangulaire en similicuir rose Alice GM_1000 MAD.jpeg");
    Product::from_parsed(
        &meta,
        "PLA-ALI-GM-1000".to_string(),
        "petit-plateau-rectangulaire-en-similicuir-rose-alice-gm".to_string(),
        "/images/products/plateau-1.jpeg".to_string(),
        vec![
            "/images/products/plateau-2.jpeg".to_string(),
            "/images/products/plateau-3.jpeg".to_string(),
        ],
    )
}

#[test]
fn insert_and_find_by_ref() {
    let conn = open_memory().unwrap();
    let product = test_product();
    let id = insert_product(&conn, &product).unwrap();
    assert!(id > 0);

    let found = find_product_by_ref(&conn, "PLA-ALI-GM-1000").unwrap().unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.name, product.name);
    assert_eq!(found.size_code, Some(SizeCode::Gm));
    assert_eq!(found.store.as_deref(), Some("Alice"));
    assert_eq!(found.initial_price, 1000.0);
    assert_eq!(found.gallery, product.gallery);
    assert!(found.is_active);
}

#[test]
fn find_by_slug_and_missing() {
    let conn = open_memory().unwrap();
    insert_product(&conn, &test_product()).unwrap();

    let found = find_product_by_slug(&conn, "petit-plateau-rectangulaire-en-similicuir-rose-alice-gm")
        .unwrap();
    assert!(found.is_some());
    assert!(find_product_by_slug(&conn, "nope").unwrap().is_none());
    assert!(find_product_by_ref(&conn, "NOPE").unwrap().is_none());
}

#[test]
fn duplicate_ref_is_rejected() {
    let conn = open_memory().unwrap();
    let product = test_product();
    insert_product(&conn, &product).unwrap();

    let mut other = product.clone();
    other.slug = "another-slug".to_string();
    assert!(insert_product(&conn, &other).is_err());
}

#[test]
fn tags_round_trip_as_json() {
    let conn = open_memory().unwrap();
    let mut product = test_product();
    product.tags = vec!["Cadeau".to_string(), "Luxe".to_string()];
    insert_product(&conn, &product).unwrap();

    let raw: String = conn
        .query_row("SELECT tags FROM products", [], |row| row.get(0))
        .unwrap();
    assert_eq!(raw, r#"["Cadeau","Luxe"]"#);

    let found = find_product_by_ref(&conn, &product.reference).unwrap().unwrap();
    assert_eq!(found.tags, product.tags);
}

#[test]
fn update_replaces_fields_and_gallery() {
    let conn = open_memory().unwrap();
    let product = test_product();
    let id = insert_product(&conn, &product).unwrap();

    let mut changed = product.clone();
    changed.reference = "IGNORED-REF".to_string();
    changed.initial_price = 1200.0;
    changed.gallery = vec!["/images/products/new.jpeg".to_string()];
    update_product(&conn, id, &changed).unwrap();

    let found = find_product_by_ref(&conn, "PLA-ALI-GM-1000").unwrap().unwrap();
    assert_eq!(found.initial_price, 1200.0);
    assert_eq!(found.gallery, vec!["/images/products/new.jpeg"]);
    assert!(find_product_by_ref(&conn, "IGNORED-REF").unwrap().is_none());
}

#[test]
fn update_missing_product_is_not_found() {
    let conn = open_memory().unwrap();
    let result = update_product(&conn, 42, &test_product());
    assert!(matches!(result, Err(OperationError::NotFound { .. })));
}

#[test]
fn gallery_order_is_preserved() {
    let conn = open_memory().unwrap();
    let id = insert_product(&conn, &test_product()).unwrap();
    let gallery = vec!["c.jpg".to_string(), "a.jpg".to_string(), "b.jpg".to_string()];
    replace_gallery(&conn, id, &gallery).unwrap();
    assert_eq!(gallery_for_product(&conn, id).unwrap(), gallery);
}

#[test]
fn ensure_category_reports_changes() {
    let conn = open_memory().unwrap();
    assert_eq!(
        ensure_category(&conn, "Plateaux", "Similicuir").unwrap(),
        CategoryChange::Created
    );
    assert_eq!(
        ensure_category(&conn, "Plateaux", "Bois").unwrap(),
        CategoryChange::SubcategoryAdded
    );
    assert_eq!(
        ensure_category(&conn, "Plateaux", "Similicuir").unwrap(),
        CategoryChange::Unchanged
    );

    let categories = list_categories(&conn).unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].subcategories, vec!["Bois", "Similicuir"]);
}

#[test]
fn subcategories_accumulate_regardless_of_order() {
    let runs = [
        vec!["Cuir", "Bois"],
        vec!["Bois", "Verre"],
        vec!["Cuir"],
    ];

    let forward = open_memory().unwrap();
    for run in &runs {
        for sub in run {
            ensure_category(&forward, "Plateaux", sub).unwrap();
        }
    }

    let backward = open_memory().unwrap();
    for run in runs.iter().rev() {
        for sub in run {
            ensure_category(&backward, "Plateaux", sub).unwrap();
        }
    }

    let expected = vec!["Bois", "Cuir", "Verre"];
    assert_eq!(list_categories(&forward).unwrap()[0].subcategories, expected);
    assert_eq!(list_categories(&backward).unwrap()[0].subcategories, expected);
}

#[test]
fn update_price_by_ref() {
    let conn = open_memory().unwrap();
    insert_product(&conn, &test_product()).unwrap();

    assert!(update_product_price(&conn, "PLA-ALI-GM-1000", 950.0, Some(900.0)).unwrap());
    assert!(!update_product_price(&conn, "MISSING", 10.0, None).unwrap());

    let found = find_product_by_ref(&conn, "PLA-ALI-GM-1000").unwrap().unwrap();
    assert_eq!(found.initial_price, 950.0);
    assert_eq!(found.promo_price, Some(900.0));
}

#[test]
fn identifier_snapshots() {
    let conn = open_memory().unwrap();
    insert_product(&conn, &test_product()).unwrap();

    let idents = existing_idents(&conn).unwrap();
    assert_eq!(idents.len(), 1);
    assert_eq!(idents[0].reference, "PLA-ALI-GM-1000");
    assert_eq!(idents[0].slug, test_product().slug);
    assert_eq!(idents[0].price, 1000.0);
}

#[test]
fn stats_and_import_log() {
    let conn = open_memory().unwrap();
    insert_product(&conn, &test_product()).unwrap();
    ensure_category(&conn, "Plateaux", "Similicuir").unwrap();
    insert_import_log(
        &conn,
        &ImportLog {
            id: 0,
            source: "/srv/images".to_string(),
            imported_at: "2026-01-01T00:00:00+00:00".to_string(),
            records_created: 1,
            records_updated: 0,
            records_skipped: 0,
            records_failed: 0,
        },
    )
    .unwrap();

    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(stats.products, 1);
    assert_eq!(stats.active_products, 1);
    assert_eq!(stats.gallery_images, 2);
    assert_eq!(stats.categories, 1);
    assert_eq!(stats.subcategories, 1);
    assert_eq!(stats.import_runs, 1);

    let logs = list_import_logs(&conn, None).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].records_created, 1);
    assert_eq!(logs[0].source, "/srv/images");
}

#[test]
fn list_products_filters_by_category() {
    let conn = open_memory().unwrap();
    insert_product(&conn, &test_product()).unwrap();

    let meta = parse_filename("Vase en verre_150 MAD.jpg");
    let vase = Product::from_parsed(
        &meta,
        "VAS-GEN-STD-0150".to_string(),
        "vase-en-verre".to_string(),
        "/images/products/vase.jpg".to_string(),
        vec![],
    );
    insert_product(&conn, &vase).unwrap();

    assert_eq!(list_products(&conn, None).unwrap().len(), 2);
    let vases = list_products(&conn, Some("Vases")).unwrap();
    assert_eq!(vases.len(), 1);
    assert_eq!(vases[0].reference, "VAS-GEN-STD-0150");
}
