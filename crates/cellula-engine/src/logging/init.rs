use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// `RUST_LOG` takes precedence; otherwise `default_filter` applies
/// (`env_logger` filter syntax, e.g. "info" or "cellula_engine=debug,wgpu=warn").
///
/// Idempotent; subsequent calls are ignored. Intended usage is early in `main`.
pub fn init_logging(default_filter: &str) {
    let default_filter = default_filter.to_string();
    INIT.call_once(move || {
        let mut builder = env_logger::Builder::new();

        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.parse_filters(&default_filter);
        }

        builder.init();

        log::debug!("logging initialized");
    });
}
