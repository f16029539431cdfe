use std::time::Instant;

use hyperbean_common::{BeanDetail, BeansPage, ErrorResponse, HyperbeanError, Result};

pub mod clock;
pub mod ledger;
pub mod pager;
pub mod session;

pub use clock::{Clock, SystemClock};

/// Hyperbean client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
}

/// One fetched catalog page plus the client-measured round-trip time.
#[derive(Debug, Clone)]
pub struct PageFetch {
    pub page: BeansPage,
    pub total_ms: u64,
}

/// Hyperbean catalog client. The connection-mode flag travels with every
/// request as the `use-hyperdrive` cookie; the server reports back which
/// path actually served it.
pub struct Client {
    pub config: ClientConfig,
    hyperdrive: bool,
    http_client: reqwest::Client,
}

impl Client {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Self {
        Self { config, hyperdrive: false, http_client: reqwest::Client::new() }
    }

    /// Whether subsequent requests ask for the accelerated connection path.
    pub fn set_hyperdrive(&mut self, enabled: bool) {
        self.hyperdrive = enabled;
    }

    pub fn hyperdrive(&self) -> bool {
        self.hyperdrive
    }

    /// Build the URL for a catalog page against the configured server.
    pub fn build_page_url(&self, page: u32) -> String {
        format!("{}/api/beans?page={}", self.config.base_url, page)
    }

    /// Build the URL for a single bean.
    pub fn build_bean_url(&self, id: u32) -> String {
        format!("{}/api/beans/{}", self.config.base_url, id)
    }

    fn mode_cookie(&self) -> String {
        format!("use-hyperdrive={}", self.hyperdrive)
    }

    /// Fetch one catalog page, measuring the wall-clock round trip (request
    /// sent to body decoded) in milliseconds.
    pub async fn fetch_beans_page(&self, page: u32) -> Result<PageFetch> {
        let url = self.build_page_url(page);
        let started = Instant::now();

        let response = self
            .http_client
            .get(&url)
            .header(reqwest::header::COOKIE, self.mode_cookie())
            .send()
            .await
            .map_err(|e| HyperbeanError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(parse_error_response(status, response).await);
        }

        let page = response
            .json::<BeansPage>()
            .await
            .map_err(|e| HyperbeanError::MalformedResponse(e.to_string()))?;
        let total_ms = started.elapsed().as_millis() as u64;

        Ok(PageFetch { page, total_ms })
    }

    /// Fetch one bean joined with its supplier.
    pub async fn fetch_bean(&self, id: u32) -> Result<BeanDetail> {
        let url = self.build_bean_url(id);

        let response = self
            .http_client
            .get(&url)
            .header(reqwest::header::COOKIE, self.mode_cookie())
            .send()
            .await
            .map_err(|e| HyperbeanError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(HyperbeanError::BeanNotFound(id));
        }
        if !status.is_success() {
            return Err(parse_error_response(status, response).await);
        }

        response
            .json::<BeanDetail>()
            .await
            .map_err(|e| HyperbeanError::MalformedResponse(e.to_string()))
    }
}

async fn parse_error_response(
    status: reqwest::StatusCode,
    response: reqwest::Response,
) -> HyperbeanError {
    let error_msg = response
        .json::<ErrorResponse>()
        .await
        .map(|r| r.error)
        .unwrap_or_else(|_| format!("Server returned status: {}", status));

    HyperbeanError::HttpError(status.as_u16(), error_msg)
}
