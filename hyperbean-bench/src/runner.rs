use rand::Rng;

use hyperbean_client::session::PageSession;
use hyperbean_client::Client;

/// Outcome of driving one connection mode through the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeRun {
    /// Page changes actually issued.
    pub requests: u64,
    /// Fetches that failed; the session state is untouched by these.
    pub failures: u64,
}

/// Flip through `requests` randomly chosen pages in the given mode, feeding
/// the session's latency ledger one sample per successful change.
pub async fn run_mode(
    client: &mut Client,
    session: &mut PageSession,
    hyperdrive: bool,
    requests: u64,
    rng: &mut impl Rng,
) -> ModeRun {
    client.set_hyperdrive(hyperdrive);

    let mut issued = 0;
    let mut failures = 0;
    for _ in 0..requests {
        let pagination = session.pagination();
        if pagination.total_pages < 2 {
            // Nowhere to navigate; the ledger only grows through page changes.
            break;
        }
        let target = random_other_page(rng, pagination.current_page, pagination.total_pages);
        issued += 1;
        if session.change_page(client, target).await.is_err() {
            failures += 1;
        }
    }

    ModeRun { requests: issued, failures }
}

/// A uniformly random page in `[1, total_pages]` other than `current`.
pub fn random_other_page(rng: &mut impl Rng, current: u32, total_pages: u32) -> u32 {
    loop {
        let page = rng.gen_range(1..=total_pages);
        if page != current {
            return page;
        }
    }
}
