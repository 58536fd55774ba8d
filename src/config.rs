use tracing::level_filters::LevelFilter;

/// Environment-driven runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: LevelFilter
}

impl Config {
    pub fn from_env() -> Self {
        let listen_addr = std::env::var("ACCOUNTS_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string());

        let log_level = std::env::var("ACCOUNTS_LOG_LEVEL")
            .map(|value| parse_log_level(&value))
            .unwrap_or(LevelFilter::INFO);

        Self {
            listen_addr,
            log_level
        }
    }
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}
