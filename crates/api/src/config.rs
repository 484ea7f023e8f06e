use sandlot_core::draft_board::DRAFT_ROUNDS;
use sandlot_core::keeper_slots::{OverflowPolicy, SlotConfig, MAX_KEEPER_ROUND};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
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
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Round bound and overflow policy for keeper allocation.
    pub keeper: SlotConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`  | `30`                       |
    /// | `KEEPER_MAX_ROUND`       | `23`                       |
    /// | `KEEPER_OVERFLOW_POLICY` | `reject`                   |
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

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let keeper = keeper_config_from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            keeper,
        }
    }
}

/// Read the keeper allocation settings. Panics on invalid values so a
/// misconfigured server never starts.
fn keeper_config_from_env() -> SlotConfig {
    let max_round: i32 = std::env::var("KEEPER_MAX_ROUND")
        .unwrap_or_else(|_| MAX_KEEPER_ROUND.to_string())
        .parse()
        .expect("KEEPER_MAX_ROUND must be a valid i32");
    assert!(
        (1..=DRAFT_ROUNDS).contains(&max_round),
        "KEEPER_MAX_ROUND must be between 1 and {DRAFT_ROUNDS}"
    );

    let overflow_policy = match std::env::var("KEEPER_OVERFLOW_POLICY") {
        Ok(value) => OverflowPolicy::parse(&value)
            .unwrap_or_else(|e| panic!("Invalid KEEPER_OVERFLOW_POLICY: {e}")),
        Err(_) => OverflowPolicy::default(),
    };

    SlotConfig {
        max_round,
        overflow_policy,
    }
}
