use std::cell::RefCell;
use std::collections::HashSet;
use std::path::Path;

use vitrine_db::*;
use vitrine_import::*;

const PLATEAU: &str = "Petit plateau rectangulaire en similicuir rose Alice GM_1000 MAD.jpeg";
const PLATEAU_2: &str = "Petit plateau rectangulaire en similicuir rose Alice GM_1000 MAD_2.jpeg";
const BOITE: &str = "Boîte cadeau rectangulaire PM_220 MAD.jpeg";

fn image_dir(files: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for f in files {
        std::fs::write(dir.path().join(f), b"").unwrap();
    }
    dir
}

fn options(dir: &Path) -> ImportOptions {
    ImportOptions {
        directory: dir.to_path_buf(),
        ..Default::default()
    }
}

fn run(conn: &rusqlite::Connection, opts: &ImportOptions) -> ImportResult {
    import_directory(conn, opts, &SilentProgress).unwrap()
}

#[test]
fn creates_products_with_gallery_and_categories() {
    let dir = image_dir(&[PLATEAU, PLATEAU_2, BOITE, "notes.txt"]);
    let conn = open_memory().unwrap();

    let result = run(&conn, &options(dir.path()));
    assert_eq!(result.files_scanned, 3);
    assert_eq!(result.product_groups, 2);
    assert_eq!(result.counts.created, 2);
    assert_eq!(result.counts.errors, 0);
    assert!(result.errors.is_empty());

    let plateau = find_product_by_ref(&conn, "PLA-ALI-GM-1000").unwrap().unwrap();
    assert_eq!(plateau.main_category, "Plateaux");
    assert_eq!(plateau.store.as_deref(), Some("Alice"));
    assert_eq!(plateau.main_image, format!("/images/products/{PLATEAU}"));
    assert_eq!(plateau.gallery, vec![format!("/images/products/{PLATEAU_2}")]);
    assert_eq!(plateau.size, "40 x 30 cm");

    let boite = find_product_by_ref(&conn, "BOI-GEN-PM-0220").unwrap().unwrap();
    assert!(boite.is_gift_box);
    assert_eq!(boite.initial_price, 220.0);

    let categories = list_categories(&conn).unwrap();
    let plateaux = categories.iter().find(|c| c.name == "Plateaux").unwrap();
    assert!(plateaux.subcategories.iter().any(|s| s.contains("Similicuir")));
    assert!(categories.iter().any(|c| c.name == "Boîtes Cadeaux"));

    let logs = list_import_logs(&conn, None).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].records_created, 2);
}

#[test]
fn second_run_skips_everything() {
    let dir = image_dir(&[PLATEAU, PLATEAU_2, BOITE]);
    let conn = open_memory().unwrap();

    run(&conn, &options(dir.path()));
    let second = run(&conn, &options(dir.path()));

    assert_eq!(second.counts.created, 0);
    assert_eq!(second.counts.updated, 0);
    assert_eq!(second.counts.skipped, 2);
    assert_eq!(catalog_stats(&conn).unwrap().products, 2);

    let refs: HashSet<_> = second.items.iter().map(|i| i.reference.as_str()).collect();
    assert!(refs.contains("PLA-ALI-GM-1000"));
    assert!(refs.contains("BOI-GEN-PM-0220"));
    assert_eq!(list_import_logs(&conn, None).unwrap().len(), 2);
}

#[test]
fn update_existing_rewrites_fields() {
    let dir = image_dir(&[PLATEAU, PLATEAU_2]);
    let conn = open_memory().unwrap();
    run(&conn, &options(dir.path()));

    update_product_price(&conn, "PLA-ALI-GM-1000", 1.0, Some(0.5)).unwrap();

    let opts = ImportOptions {
        update_existing: true,
        ..options(dir.path())
    };
    let result = run(&conn, &opts);
    assert_eq!(result.counts.updated, 1);
    assert_eq!(result.items[0].reference, "PLA-ALI-GM-1000");

    let plateau = find_product_by_ref(&conn, "PLA-ALI-GM-1000").unwrap().unwrap();
    assert_eq!(plateau.initial_price, 1000.0);
    assert_eq!(plateau.gallery.len(), 1);
    assert_eq!(catalog_stats(&conn).unwrap().products, 1);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = image_dir(&[PLATEAU, BOITE]);
    let conn = open_memory().unwrap();

    let opts = ImportOptions {
        dry_run: true,
        ..options(dir.path())
    };
    let result = run(&conn, &opts);
    assert!(result.dry_run);
    assert_eq!(result.counts.created, 2);
    assert!(result.items[0].message.starts_with("[dry run]"));

    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(stats.products, 0);
    assert_eq!(stats.categories, 0);
    assert_eq!(stats.import_runs, 0);
}

#[test]
fn category_filter_is_case_insensitive() {
    let dir = image_dir(&[PLATEAU, BOITE]);
    let conn = open_memory().unwrap();

    let opts = ImportOptions {
        category: Some("plateaux".to_string()),
        ..options(dir.path())
    };
    let result = run(&conn, &opts);
    assert_eq!(result.counts.created, 1);
    assert_eq!(result.filtered_out, 1);
    assert_eq!(result.items[0].category, "Plateaux");
}

#[test]
fn invalid_products_are_errors_and_the_batch_continues() {
    let dir = image_dir(&["Vase sans prix.jpg", "ab_100 MAD.jpg", BOITE]);
    let conn = open_memory().unwrap();

    let result = run(&conn, &options(dir.path()));
    assert_eq!(result.counts.created, 1);
    assert_eq!(result.counts.errors, 2);
    assert_eq!(result.errors.len(), 2);

    let no_price = result
        .errors
        .iter()
        .find(|e| e.filename == "Vase sans prix.jpg")
        .unwrap();
    assert!(no_price.message.contains("missing or invalid price"));
    let short = result
        .errors
        .iter()
        .find(|e| e.filename == "ab_100 MAD.jpg")
        .unwrap();
    assert!(short.message.contains("name too short"));

    assert_eq!(catalog_stats(&conn).unwrap().products, 1);
    assert_eq!(list_import_logs(&conn, None).unwrap()[0].records_failed, 2);
}

#[test]
fn failed_write_rolls_back_only_that_product() {
    let dir = image_dir(&["Vase en verre_150 MAD.jpg", "Vase en verre_150 MAD_2.jpg", BOITE]);
    let conn = open_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_vase_gallery BEFORE INSERT ON product_images
         WHEN NEW.path LIKE '%Vase%'
         BEGIN SELECT RAISE(ABORT, 'gallery rejected'); END;",
    )
    .unwrap();

    let result = run(&conn, &options(dir.path()));
    assert_eq!(result.counts.created, 1);
    assert_eq!(result.counts.errors, 1);
    assert!(result.errors[0].message.contains("gallery rejected"));

    assert!(find_product_by_ref(&conn, "VAS-GEN-STD-0150").unwrap().is_none());
    assert!(find_product_by_ref(&conn, "BOI-GEN-PM-0220").unwrap().is_some());
    assert!(list_categories(&conn).unwrap().iter().all(|c| c.name != "Vases"));
}

#[test]
fn colliding_refs_get_suffixes() {
    let dir = image_dir(&["Vase bleu_150 MAD.jpg", "Vase rouge_150 MAD.jpg"]);
    let conn = open_memory().unwrap();

    let result = run(&conn, &options(dir.path()));
    let refs: HashSet<_> = result.items.iter().map(|i| i.reference.clone()).collect();
    assert_eq!(refs.len(), result.product_groups);
    assert!(refs.contains("VAS-GEN-STD-0150"));
    assert!(refs.contains("VAS-GEN-STD-0150-1"));
}

#[test]
fn existing_product_is_matched_by_slug() {
    let dir = image_dir(&["Vase en verre_150 MAD.jpg"]);
    let conn = open_memory().unwrap();

    let meta = vitrine_catalog::parse_filename("Vase en verre_150 MAD.jpg");
    let existing = vitrine_catalog::Product::from_parsed(
        &meta,
        "LEGACY-REF".to_string(),
        "vase-en-verre".to_string(),
        "/old/vase.jpg".to_string(),
        vec![],
    );
    insert_product(&conn, &existing).unwrap();

    let result = run(&conn, &options(dir.path()));
    assert_eq!(result.counts.skipped, 1);
    assert_eq!(result.items[0].reference, "LEGACY-REF");
    assert!(result.items[0].message.contains("slug"));

    // Skipped products still feed the category side table.
    let categories = list_categories(&conn).unwrap();
    assert_eq!(categories[0].name, "Vases");
    assert_eq!(categories[0].subcategories, vec!["Verre"]);
}

#[test]
fn new_price_variant_does_not_take_an_existing_slug() {
    let conn = open_memory().unwrap();
    let first = image_dir(&["Vase GM_100 MAD.jpg"]);
    run(&conn, &options(first.path()));

    let second = image_dir(&["Vase GM_100 MAD.jpg", "Vase GM_050 MAD.jpg"]);
    let result = run(&conn, &options(second.path()));
    assert_eq!(result.counts.created, 1);
    assert_eq!(result.counts.skipped, 1);
    assert_eq!(catalog_stats(&conn).unwrap().products, 2);

    let products = list_products(&conn, None).unwrap();
    let mut prices: Vec<f64> = products.iter().map(|p| p.initial_price).collect();
    prices.sort_by(f64::total_cmp);
    assert_eq!(prices, vec![50.0, 100.0]);

    let original = find_product_by_slug(&conn, "vase-gm").unwrap().unwrap();
    assert_eq!(original.initial_price, 100.0);
    let variant = find_product_by_slug(&conn, "vase-gm-0050").unwrap().unwrap();
    assert_eq!(variant.initial_price, 50.0);
}

#[test]
fn subcategories_accumulate_across_runs() {
    let conn = open_memory().unwrap();
    let bois = image_dir(&["Plateau en bois_100 MAD.jpg"]);
    let verre = image_dir(&["Plateau en verre_120 MAD.jpg"]);

    run(&conn, &options(verre.path()));
    run(&conn, &options(bois.path()));
    run(&conn, &options(verre.path()));

    let categories = list_categories(&conn).unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].subcategories, vec!["Bois", "Verre"]);
}

#[test]
fn missing_directory_is_fatal() {
    let conn = open_memory().unwrap();
    let opts = options(Path::new("/nonexistent/vitrine/images"));
    let err = import_directory(&conn, &opts, &SilentProgress).unwrap_err();
    assert!(matches!(err, ImportError::ReadDir { .. }));
}

#[derive(Default)]
struct RecordingProgress {
    scanned: RefCell<Option<(usize, usize)>>,
    products: RefCell<Vec<(usize, usize, ImportStatus)>>,
    tally: ProgressTally,
    completed: RefCell<Option<ImportCounts>>,
}

impl ImportProgress for RecordingProgress {
    fn on_scanned(&self, _directory: &Path, files: usize, groups: usize) {
        *self.scanned.borrow_mut() = Some((files, groups));
    }

    fn on_product(&self, current: usize, total: usize, item: &ImportItem) {
        self.tally.record(item.status);
        self.products.borrow_mut().push((current, total, item.status));
    }

    fn on_complete(&self, result: &ImportResult) {
        *self.completed.borrow_mut() = Some(result.counts);
    }
}

#[test]
fn progress_sees_every_outcome() {
    let dir = image_dir(&[PLATEAU, PLATEAU_2, BOITE, "ab_100 MAD.jpg"]);
    let conn = open_memory().unwrap();
    run(&conn, &options(dir.path()));
    std::fs::write(dir.path().join("Vase en verre_150 MAD.jpg"), b"").unwrap();

    let progress = RecordingProgress::default();
    let result = import_directory(&conn, &options(dir.path()), &progress).unwrap();

    assert_eq!(*progress.scanned.borrow(), Some((5, 4)));
    let products = progress.products.borrow();
    assert_eq!(products.len(), 4);
    assert!(products.iter().enumerate().all(|(i, (current, total, _))| *current == i + 1 && *total == 4));

    let counts = progress.tally.counts();
    assert_eq!(counts.created, 1);
    assert_eq!(counts.skipped, 2);
    assert_eq!(counts.errors, 1);
    assert_eq!(counts, result.counts);
    assert_eq!(*progress.completed.borrow(), Some(result.counts));
}

#[test]
fn category_filter_advances_progress_without_reporting() {
    let dir = image_dir(&[PLATEAU, BOITE]);
    let conn = open_memory().unwrap();
    let opts = ImportOptions {
        category: Some("Plateaux".to_string()),
        ..options(dir.path())
    };

    let progress = LogProgress::default();
    let result = import_directory(&conn, &opts, &progress).unwrap();
    assert_eq!(result.filtered_out, 1);
    assert_eq!(progress.counts().created, 1);
    assert_eq!(progress.counts(), result.counts);
}
