use hyperbean_server::seed::seed_catalog;

#[test]
fn test_seed_produces_requested_bean_count() {
    let catalog = seed_catalog(72);
    assert_eq!(catalog.bean_count(), 72);
    assert_eq!(catalog.supplier_count(), 5);
}

#[test]
fn test_seeded_ids_are_sequential() {
    let catalog = seed_catalog(10);
    let ids: Vec<u32> = catalog.page(0, 10).iter().map(|b| b.id).collect();
    assert_eq!(ids, (1..=10).collect::<Vec<u32>>());
}

#[test]
fn test_image_keys_cycle_through_six_assets() {
    let catalog = seed_catalog(12);
    let beans = catalog.page(0, 12);

    assert_eq!(beans[0].image_key, beans[6].image_key);
    assert_eq!(beans[5].image_key, beans[11].image_key);
    assert_ne!(beans[0].image_key, beans[1].image_key);
}

#[test]
fn test_generated_beans_are_fully_populated() {
    let catalog = seed_catalog(24);

    for bean in catalog.page(0, 24) {
        assert!(!bean.name.is_empty());
        assert!(bean.description.is_some());
        assert!(bean.tasting_notes.is_some());
        assert!((1200..=3500).contains(&bean.price_in_cents));
        assert!(bean.roast_level.is_some());
        assert!((1..=5).contains(&bean.supplier_id.unwrap()));
    }
}

#[test]
fn test_empty_catalog_is_allowed() {
    let catalog = seed_catalog(0);
    assert_eq!(catalog.bean_count(), 0);
    assert!(catalog.page(0, 6).is_empty());
}
