//! Tracing subscriber setup

use crate::config::LoggingConfig;

/// Install the global fmt subscriber described by `config`
///
/// Returns `false` if a subscriber was already installed; the existing one is
/// left in place.
pub fn init(config: &LoggingConfig) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_max_level(config.level.as_tracing())
        .with_target(false);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_noop() {
        let config = LoggingConfig::default();
        init(&config);
        assert!(!init(&config));
    }
}
