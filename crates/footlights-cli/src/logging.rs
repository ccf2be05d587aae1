use std::sync::Once;

use log::LevelFilter;

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// A non-zero `verbosity` wins over `RUST_LOG`: 1 enables debug output,
/// 2 or more enables trace. Without either, only warnings are shown.
pub fn init_logging(verbosity: u8) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match verbosity {
            0 => match std::env::var("RUST_LOG") {
                Ok(filter) => {
                    builder.parse_filters(&filter);
                }
                Err(_) => {
                    builder.filter_level(LevelFilter::Warn);
                }
            },
            1 => {
                builder.filter_level(LevelFilter::Debug);
            }
            _ => {
                builder.filter_level(LevelFilter::Trace);
            }
        }

        builder.format_timestamp(None).init();

        log::debug!("logging initialized");
    });
}
