use courier_core::query::paging::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Page size used when a listing query does not ask for one.
    pub default_page_size: usize,
    /// Upper bound applied to requested page sizes.
    pub max_page_size: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DEFAULT_PAGE_SIZE`    | `20`                       |
    /// | `MAX_PAGE_SIZE`        | `100`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let default_page_size: usize = std::env::var("DEFAULT_PAGE_SIZE")
            .map(|v| v.parse().expect("DEFAULT_PAGE_SIZE must be a valid usize"))
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let max_page_size: usize = std::env::var("MAX_PAGE_SIZE")
            .map(|v| v.parse().expect("MAX_PAGE_SIZE must be a valid usize"))
            .unwrap_or(MAX_PAGE_SIZE);

        assert!(
            page_sizes_are_valid(default_page_size, max_page_size),
            "DEFAULT_PAGE_SIZE must be between 1 and MAX_PAGE_SIZE"
        );

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            default_page_size,
            max_page_size,
        }
    }
}

fn page_sizes_are_valid(default_page_size: usize, max_page_size: usize) -> bool {
    (1..=max_page_size).contains(&default_page_size)
}
