//! Network defaults for the exchange backend.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "PREDMARKET_API_URL";

/// Environment variable carrying JSON route-table overrides.
pub const ROUTES_ENV: &str = "PREDMARKET_ROUTES";
