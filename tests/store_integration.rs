use std::sync::Arc;

use storefront_admin::app::{run_save_worker, BackendMessage, SaveRequest};
use storefront_admin::store::catalog::{Catalog, ProductDraft};
use storefront_admin::store::local::{LocalStore, CATALOG_KEY, SETTINGS_KEY};
use storefront_admin::store::settings::{HeroAnimation, SiteSettings};

fn draft(name: &str, price: u32, quantity: u32) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        description: format!("{name} description"),
        price,
        original_price: None,
        quantity,
        rating: None,
        reviews: 0,
        badge: None,
        image: "https://example.com/image.jpg".to_string(),
    }
}

#[test]
fn settings_round_trip_through_the_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalStore::open(dir.path()).expect("open store");

    let mut settings = SiteSettings::default();
    settings.site_name = "MIDNIGHT MUSK".to_string();
    settings.hero_animation = HeroAnimation::SlideUp;
    settings.save(&store).expect("save settings");

    let loaded = SiteSettings::load(&store).expect("load settings");
    assert_eq!(loaded, settings);
}

#[test]
fn catalog_round_trip_preserves_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalStore::open(dir.path()).expect("open store");

    let mut catalog = Catalog::default();
    catalog.add(draft("Cedar Oil", 1200, 3));
    catalog.add(draft("Amber Resin", 900, 7));
    catalog.add(draft("Rose Absolute", 4100, 1));
    catalog.save(&store).expect("save catalog");

    let loaded = Catalog::load(&store).expect("load catalog");
    assert_eq!(loaded, catalog);

    let names: Vec<_> = loaded.products().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Cedar Oil", "Amber Resin", "Rose Absolute"]);
}

#[test]
fn fresh_store_seeds_example_products_in_memory_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalStore::open(dir.path()).expect("open store");

    let catalog = Catalog::load(&store).expect("load catalog");
    let ids: Vec<_> = catalog.products().iter().map(|p| p.id).collect();
    assert_eq!(ids, [1, 2]);

    // Nothing is written until the first explicit save.
    assert!(store.get(CATALOG_KEY).expect("get").is_none());

    catalog.save(&store).expect("save catalog");
    assert!(store.get(CATALOG_KEY).expect("get").is_some());
}

#[test]
fn crud_survives_reopening_the_store() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let store = LocalStore::open(dir.path()).expect("open store");
        let mut catalog = Catalog::load(&store).expect("load catalog");

        let id = catalog.add(draft("Test Oil", 1000, 5));
        assert_eq!(id, 3);
        assert!(catalog.remove(1));
        catalog.save(&store).expect("save catalog");
    }

    let store = LocalStore::open(dir.path()).expect("reopen store");
    let catalog = Catalog::load(&store).expect("reload catalog");

    let ids: Vec<_> = catalog.products().iter().map(|p| p.id).collect();
    assert_eq!(ids, [2, 3]);

    let added = catalog.get(3).expect("added product");
    assert_eq!(added.name, "Test Oil");
    assert_eq!(added.price, 1000);
    assert_eq!(added.reviews, 0);
    assert_eq!(added.badge, None);
}

#[test]
fn corrupt_settings_blob_loads_as_defaults_without_rewriting() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalStore::open(dir.path()).expect("open store");
    store.set(SETTINGS_KEY, "{definitely not json").expect("set");

    let (settings, fell_back) = SiteSettings::load_or_default(&store);
    assert!(fell_back);
    assert_eq!(settings, SiteSettings::default());

    // The broken blob stays on disk until the next explicit save.
    assert_eq!(
        store.get(SETTINGS_KEY).expect("get").as_deref(),
        Some("{definitely not json")
    );
}

#[tokio::test]
async fn queued_saves_commit_in_queue_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(LocalStore::open(dir.path()).expect("open store"));

    // Two quick successive deletes: the second snapshot must be the one
    // that ends up durable, never the first.
    let mut first = Catalog::seed();
    first.remove(1);
    let mut second = first.clone();
    second.remove(2);

    let (req_tx, req_rx) = tokio::sync::mpsc::unbounded_channel();
    let (res_tx, res_rx) = std::sync::mpsc::channel();

    req_tx
        .send(SaveRequest::Catalog {
            catalog: first,
            toast: "Product deleted successfully!".to_string(),
        })
        .expect("queue first save");
    req_tx
        .send(SaveRequest::Catalog {
            catalog: second.clone(),
            toast: "Product deleted successfully!".to_string(),
        })
        .expect("queue second save");
    drop(req_tx);

    run_save_worker(store.clone(), req_rx, res_tx).await;

    let loaded = Catalog::load(&store).expect("load catalog");
    assert_eq!(loaded, second);
    assert!(loaded.is_empty());

    let mut completed = 0;
    while let Ok(msg) = res_rx.try_recv() {
        assert!(matches!(msg, BackendMessage::SaveCompleted { .. }));
        completed += 1;
    }
    assert_eq!(completed, 2);
}

#[tokio::test]
async fn saves_reach_every_subscriber() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalStore::open(dir.path()).expect("open store");

    // One receiver per context, like the admin page and the storefront
    // page listening to the same storage.
    let mut admin_rx = store.subscribe();
    let mut storefront_rx = store.subscribe();

    let settings = SiteSettings::default();
    settings.save(&store).expect("save settings");

    let change = admin_rx.recv().await.expect("admin change");
    assert_eq!(change.key, SETTINGS_KEY);
    let decoded: SiteSettings = serde_json::from_str(&change.new_value).expect("decode payload");
    assert_eq!(decoded, settings);

    let change = storefront_rx.recv().await.expect("storefront change");
    assert_eq!(change.key, SETTINGS_KEY);
}

#[tokio::test]
async fn catalog_saves_carry_the_full_collection() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalStore::open(dir.path()).expect("open store");

    let mut rx = store.subscribe();

    let mut catalog = Catalog::load(&store).expect("load catalog");
    catalog.add(draft("Test Oil", 1000, 5));
    catalog.save(&store).expect("save catalog");

    let change = rx.recv().await.expect("change event");
    assert_eq!(change.key, CATALOG_KEY);

    let decoded: Catalog = serde_json::from_str(&change.new_value).expect("decode payload");
    assert_eq!(decoded.len(), 3);
    assert_eq!(decoded.get(3).expect("new product").name, "Test Oil");
}
