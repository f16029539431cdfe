use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use hyperbean_common::{BeanDetail, BeansPage, ErrorResponse, PaginationInfo, BEANS_PER_PAGE};

pub mod catalog;
pub mod config;
pub mod seed;

use catalog::Catalog;

pub type SharedCatalog = Arc<RwLock<Catalog>>;

#[derive(Clone)]
pub struct AppState {
    pub catalog: SharedCatalog,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog: Arc::new(RwLock::new(catalog)) }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub address: SocketAddr,
    pub bean_count: usize,
}

/// Hyperbean catalog server
pub struct Server {
    config: ServerConfig,
}

impl Server {
    /// Create a new server with the given configuration
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Get the server's configured address
    pub fn address(&self) -> SocketAddr {
        self.config.address
    }

    /// Create the application router with the given state
    pub fn create_router(state: AppState) -> Router {
        Router::new()
            .route("/api/beans", get(handle_list_beans))
            .route("/api/beans/:id", get(handle_get_bean))
            .with_state(state)
    }

    /// Run the server, signalling `ready_tx` with the bound address once accepting connections
    pub async fn run(
        self,
        ready_tx: tokio::sync::oneshot::Sender<SocketAddr>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let catalog = seed::seed_catalog(self.config.bean_count);
        info!(
            beans = catalog.bean_count(),
            suppliers = catalog.supplier_count(),
            "catalog seeded"
        );

        let state = AppState::new(catalog);
        let app = Self::create_router(state);
        let listener = tokio::net::TcpListener::bind(self.config.address).await?;
        let local_addr = listener.local_addr()?;
        ready_tx.send(local_addr).ok();
        axum::serve(listener, app).await?;
        Ok(())
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { error: message.into() })).into_response()
}

/// `true` when the request carries a `use-hyperdrive=true` cookie.
pub fn hyperdrive_requested(headers: &HeaderMap) -> bool {
    let Some(cookies) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    cookies.split(';').any(|cookie| cookie.trim() == "use-hyperdrive=true")
}

#[derive(Debug, Deserialize)]
pub struct ListBeansParams {
    pub page: Option<String>,
}

/// Handler for GET /api/beans?page=N — one catalog page plus pagination
/// metadata, the connection mode that served it, and the time spent in the
/// store. A missing or non-numeric `page` defaults to 1; a page past the end
/// comes back with an empty bean list.
pub async fn handle_list_beans(
    State(state): State<AppState>,
    Query(params): Query<ListBeansParams>,
    headers: HeaderMap,
) -> Response {
    let requested = params
        .page
        .as_deref()
        .and_then(|p| p.parse::<i64>().ok())
        .unwrap_or(1);
    let is_using_hyperdrive = hyperdrive_requested(&headers);

    let db_started = Instant::now();
    let catalog = state.catalog.read().await;
    let total_count = catalog.bean_count() as u64;
    let pagination = PaginationInfo::compute(requested, total_count, BEANS_PER_PAGE);
    let offset = (pagination.current_page as usize - 1) * BEANS_PER_PAGE as usize;
    let beans = catalog.page(offset, BEANS_PER_PAGE as usize);
    drop(catalog);
    let db_duration_ms = db_started.elapsed().as_millis() as u64;

    debug!(
        page = pagination.current_page,
        hyperdrive = is_using_hyperdrive,
        db_duration_ms,
        "served bean page"
    );

    Json(BeansPage { beans, pagination, is_using_hyperdrive, db_duration_ms }).into_response()
}

/// Handler for GET /api/beans/:id — the bean joined with its supplier.
/// Non-numeric ids are a 400, unknown ids a 404.
pub async fn handle_get_bean(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let Ok(bean_id) = id.parse::<u32>() else {
        warn!(id = %id, "rejected non-numeric bean id");
        return error_response(StatusCode::BAD_REQUEST, "Invalid bean ID");
    };

    let is_using_hyperdrive = hyperdrive_requested(&headers);

    let db_started = Instant::now();
    let catalog = state.catalog.read().await;
    let found = catalog.bean_with_supplier(bean_id);
    drop(catalog);
    let db_duration_ms = db_started.elapsed().as_millis() as u64;

    match found {
        None => error_response(StatusCode::NOT_FOUND, "Coffee bean not found"),
        Some((bean, supplier)) => {
            debug!(id = bean_id, hyperdrive = is_using_hyperdrive, "served bean detail");
            Json(BeanDetail { bean, supplier, is_using_hyperdrive, db_duration_ms })
                .into_response()
        }
    }
}
