use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use hyperbean_server::config::{DEFAULT_ADDRESS, DEFAULT_BEAN_COUNT};
use hyperbean_server::{Server, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "hyperbean-server")]
struct Args {
    /// Address to bind, host:port.
    #[arg(long, default_value = DEFAULT_ADDRESS)]
    address: SocketAddr,

    /// Number of beans to seed the catalog with.
    #[arg(long, default_value_t = DEFAULT_BEAN_COUNT)]
    beans: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    let config = ServerConfig { address: args.address, bean_count: args.beans };

    let (ready_tx, ready_rx) = tokio::sync::oneshot::channel();

    // Print "Listening on <addr>" once the server signals it is bound.
    tokio::spawn(async move {
        if let Ok(addr) = ready_rx.await {
            println!("Listening on {}", addr);
        }
    });

    Server::new(config).run(ready_tx).await?;
    Ok(())
}
