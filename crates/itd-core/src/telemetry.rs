//! Tracing subscriber setup for hosts
//!
//! Filtering follows `RUST_LOG`, falling back to `info`. Both functions are
//! idempotent: a second call (or a subscriber installed elsewhere) is left
//! alone and reported as `false`.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a human-readable subscriber; returns whether it was installed
pub fn init_tracing() -> bool {
    tracing_subscriber::fmt().with_env_filter(env_filter()).with_target(false).try_init().is_ok()
}

/// Install a JSON-lines subscriber; returns whether it was installed
pub fn init_json_tracing() -> bool {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter())
        .with_current_span(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_refused() {
        let _ = init_tracing();
        assert!(!init_tracing());
        assert!(!init_json_tracing());
    }
}
