use rand::rngs::StdRng;
use rand::SeedableRng;

use hyperbean_bench::runner::random_other_page;

#[test]
fn test_random_other_page_stays_in_range_and_avoids_current() {
    let mut rng = StdRng::seed_from_u64(7);

    for current in 1..=12 {
        for _ in 0..100 {
            let page = random_other_page(&mut rng, current, 12);
            assert!((1..=12).contains(&page), "page {page} out of range");
            assert_ne!(page, current);
        }
    }
}

#[test]
fn test_random_other_page_with_two_pages_always_flips() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..20 {
        assert_eq!(random_other_page(&mut rng, 1, 2), 2);
        assert_eq!(random_other_page(&mut rng, 2, 2), 1);
    }
}
