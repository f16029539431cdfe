use std::net::{SocketAddr, TcpStream};
use std::path::PathBuf;
use std::process::{Child, Command};
use std::time::{Duration, Instant};

pub struct ServerProcess {
    child: Child,
    pub addr: SocketAddr,
}

impl Drop for ServerProcess {
    fn drop(&mut self) {
        self.child.kill().ok();
    }
}

/// Reserve a free TCP port by binding to port 0 and releasing it. The
/// listener stays alive until the port is read off, narrowing the TOCTOU
/// window between releasing and the spawned server binding.
pub fn pick_free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Return the path to the `hyperbean-server` binary that sits alongside this
/// executable in `target/debug/` (or `target/debug/deps/` when run as a test).
fn server_binary_path() -> PathBuf {
    let mut path = std::env::current_exe().expect("cannot determine own executable path");
    path.pop(); // remove own filename
    if path.file_name().map(|n| n == "deps").unwrap_or(false) {
        path.pop(); // step out of target/debug/deps → target/debug/
    }
    path.push("hyperbean-server");
    path
}

const READY_TIMEOUT: Duration = Duration::from_secs(30);

impl ServerProcess {
    /// Build the `hyperbean-server` binary, spawn it on a free port seeded
    /// with `bean_count` beans, and wait until it accepts connections.
    ///
    /// Returns `Err` if the build fails, the process cannot be spawned, or
    /// the readiness deadline elapses. The caller should map this error to
    /// exit code 3.
    pub fn build_and_spawn(bean_count: usize) -> Result<Self, String> {
        let status = Command::new("cargo")
            .args(["build", "-p", "hyperbean-server"])
            .status()
            .map_err(|e| format!("Failed to invoke cargo build: {e}"))?;
        if !status.success() {
            return Err(format!("cargo build -p hyperbean-server failed: {status}"));
        }

        let port = pick_free_port();
        let addr: SocketAddr = format!("127.0.0.1:{port}").parse().unwrap();

        let child = Command::new(server_binary_path())
            .args(["--address", &addr.to_string(), "--beans", &bean_count.to_string()])
            .spawn()
            .map_err(|e| format!("Failed to spawn server: {e}"))?;
        let process = ServerProcess { child, addr };

        // On failure `process` drops here, killing the child.
        poll_until_ready(addr, Instant::now() + READY_TIMEOUT)
            .map_err(|e| format!("Server not ready within timeout: {e}"))?;

        Ok(process)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Poll `addr` with a TCP connect attempt until the connection succeeds
/// (server is accepting connections) or `deadline` is reached.
///
/// A successful TCP connection is sufficient to confirm readiness: the
/// axum-based server starts accepting the moment it binds, so a successful
/// `connect` implies it will also answer HTTP requests.
fn poll_until_ready(addr: SocketAddr, deadline: Instant) -> Result<(), String> {
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(format!("timed out waiting for {addr}"));
        }
        let probe = Duration::min(remaining, Duration::from_millis(200));
        if TcpStream::connect_timeout(&addr, probe).is_ok() {
            return Ok(());
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}
