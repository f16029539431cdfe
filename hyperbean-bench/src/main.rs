use clap::Parser;
use std::process;
use std::sync::Arc;

use hyperbean_bench::runner::{self, ModeRun};
use hyperbean_bench::server::ServerProcess;
use hyperbean_client::ledger::{db_improvement, Improvement, LedgerStats, MAX_SAMPLES};
use hyperbean_client::session::PageSession;
use hyperbean_client::{Client, ClientConfig, SystemClock};

#[derive(Parser)]
#[command(name = "hyperbean-bench", about = "Hyperbean latency comparison harness")]
struct Args {
    /// Page fetches per connection mode
    #[arg(long, default_value_t = 10)]
    requests: u64,

    /// Beans to seed the spawned server with
    #[arg(long, default_value_t = 72)]
    beans: usize,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let server = ServerProcess::build_and_spawn(args.beans).unwrap_or_else(|e| {
        eprintln!("Failed to start server: {e}");
        process::exit(3);
    });

    println!("Server ready on {}", server.addr);

    let mut client = Client::new(ClientConfig { base_url: server.base_url() });

    // The initial render seeds the session; it is not recorded in the ledger.
    let initial = match client.fetch_beans_page(1).await {
        Ok(fetch) => fetch,
        Err(e) => {
            eprintln!("Failed to fetch the first page: {e}");
            process::exit(3);
        }
    };
    let mut session =
        PageSession::new(initial.page.beans, initial.page.pagination, Arc::new(SystemClock));

    let mut rng = rand::thread_rng();
    let direct = runner::run_mode(&mut client, &mut session, false, args.requests, &mut rng).await;
    let hyperdrive =
        runner::run_mode(&mut client, &mut session, true, args.requests, &mut rng).await;

    print_report(&args, &session.stats(), direct, hyperdrive);

    drop(server);

    let failures = direct.failures + hyperdrive.failures;
    process::exit(if failures > 0 { 1 } else { 0 });
}

fn print_report(args: &Args, stats: &LedgerStats, direct: ModeRun, hyperdrive: ModeRun) {
    println!();
    println!("Hyperbean Latency Report");
    println!("========================");
    println!("Catalog:               {} beans", args.beans);
    println!(
        "Requests:              {} direct + {} hyperdrive   [ledger keeps the last {}]",
        direct.requests, hyperdrive.requests, MAX_SAMPLES
    );
    println!("Failures:              {}", direct.failures + hyperdrive.failures);
    println!();
    println!(
        "Direct avg:            {} db / {} total   ({} samples)",
        fmt_avg(stats.avg_direct_db),
        fmt_avg(stats.avg_direct_total),
        stats.direct_requests
    );
    println!(
        "Hyperdrive avg:        {} db / {} total   ({} samples)",
        fmt_avg(stats.avg_hyperdrive_db),
        fmt_avg(stats.avg_hyperdrive_total),
        stats.hyperdrive_requests
    );
    println!();
    match db_improvement(stats) {
        Improvement::Faster(percent) => {
            println!("Improvement:           {percent}% faster with Hyperdrive");
        }
        Improvement::NoDifference => {
            println!("Improvement:           none");
        }
        Improvement::InsufficientData => {
            println!("Improvement:           insufficient data (need samples in both modes)");
        }
    }
}

fn fmt_avg(avg: Option<u64>) -> String {
    match avg {
        Some(ms) => format!("{ms} ms"),
        None => "--".to_string(),
    }
}
