use std::fs::File;
use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "camline_core=debug"). Without it `RUST_LOG` is used, then `warn`.
///
/// The terminal UI owns stdout and stderr while it runs, so interactive
/// sessions log to `file` or not at all.
#[derive(Debug, Default)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub file: Option<File>,
}

static INIT: Once = Once::new();

/// Initializes the global logger once. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = &config.env_filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Warn);
        }

        match config.file {
            Some(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
                builder.write_style(env_logger::WriteStyle::Never);
            }
            None => {
                builder.write_style(env_logger::WriteStyle::Auto);
            }
        }

        builder.init();
        log::debug!("logging initialized");
    });
}
