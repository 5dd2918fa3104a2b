use tracing_subscriber::EnvFilter;

/// Filter directives for a base level, keeping the noisy dependencies at warn
pub fn filter_directives(level: &str) -> String {
    format!("{level},quakefeed={level},sqlx=warn,reqwest=warn,hyper=warn")
}

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_parse() {
        let directives = filter_directives("debug");
        assert!(directives.starts_with("debug,quakefeed=debug"));
        assert!(EnvFilter::try_new(directives).is_ok());
    }
}
