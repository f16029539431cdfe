/// Default bind address for the catalog server.
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:8787";

/// Default number of beans the catalog is seeded with.
pub const DEFAULT_BEAN_COUNT: usize = 72;
