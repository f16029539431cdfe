use hyperbean_common::{CoffeeBean, RoastLevel, Supplier};
use rand::Rng;

use crate::catalog::Catalog;

const IMAGE_KEYS: [&str; 6] = [
    "beans/bag-minimal-light.jpg",
    "beans/pour-over-setup.jpg",
    "beans/espresso-crema.jpg",
    "beans/green-beans-sack.jpg",
    "beans/dark-roast-pile.jpg",
    "beans/latte-art-hero.jpg",
];

const ADJECTIVES: [&str; 10] = [
    "Misty", "Golden", "Velvet", "Obsidian", "Morning", "Royal", "Wild", "Silent", "Crimson",
    "Deep",
];

const NOUNS: [&str; 10] = [
    "Harvest", "Reserve", "Blend", "Peak", "Valley", "Estate", "Selection", "Heirloom", "Drift",
    "Coast",
];

const FLAVORS: [&str; 10] = [
    "Blueberry", "Chocolate", "Caramel", "Jasmine", "Hazelnut", "Citrus", "Honey", "Vanilla",
    "Smoke", "Cherry",
];

const BODIES: [&str; 4] = ["full-bodied", "bright", "complex", "smooth"];

const ROASTS: [RoastLevel; 4] =
    [RoastLevel::Light, RoastLevel::Medium, RoastLevel::Dark, RoastLevel::Espresso];

fn pick<'a, T>(rng: &mut impl Rng, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

fn supplier(id: u32, name: &str, country: &str, is_fair_trade: bool) -> Supplier {
    Supplier {
        id,
        name: name.to_string(),
        country: country.to_string(),
        is_fair_trade,
        website_url: Some("https://example.com".to_string()),
    }
}

/// Build the demo catalog: five fixed suppliers and `bean_count` generated
/// beans with names drawn from the word pools, image keys cycled through the
/// six available assets, and prices between $12.00 and $35.00.
pub fn seed_catalog(bean_count: usize) -> Catalog {
    let mut rng = rand::thread_rng();

    let suppliers = vec![
        supplier(1, "Coastal Roasters", "USA", true),
        supplier(2, "Andes Origins", "Colombia", true),
        supplier(3, "Ethico Beans", "Ethiopia", true),
        supplier(4, "Pacific Rim Coffee", "Indonesia", false),
        supplier(5, "Nordic Roast", "Sweden", true),
    ];

    let beans = (0..bean_count)
        .map(|i| {
            let name = format!("{} {}", pick(&mut rng, &ADJECTIVES), pick(&mut rng, &NOUNS));
            let notes = format!(
                "{}, {}, {}",
                pick(&mut rng, &FLAVORS),
                pick(&mut rng, &FLAVORS),
                pick(&mut rng, &FLAVORS)
            );
            let description = format!(
                "A delightful {} coffee with hints of {}.",
                pick(&mut rng, &BODIES),
                notes
            );
            let supplier_id = suppliers[rng.gen_range(0..suppliers.len())].id;

            CoffeeBean {
                id: i as u32 + 1,
                name,
                description: Some(description),
                image_key: Some(IMAGE_KEYS[i % IMAGE_KEYS.len()].to_string()),
                tasting_notes: Some(notes),
                price_in_cents: rng.gen_range(1200..=3500),
                roast_level: Some(*pick(&mut rng, &ROASTS)),
                supplier_id: Some(supplier_id),
            }
        })
        .collect();

    Catalog::new(suppliers, beans)
}
