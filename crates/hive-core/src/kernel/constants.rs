/// Application name
pub const APP_NAME: &str = "Hive";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Per-component deadline applied to every dispatched handler, in milliseconds
pub const DEFAULT_DISPATCH_TIMEOUT_MS: u64 = 30_000;

/// Default log filter used when neither the config nor `RUST_LOG` set one
pub const DEFAULT_LOG_LEVEL: &str = "info";
