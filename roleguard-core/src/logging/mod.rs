//! Logger setup
//!
//! Library code only talks to the standard `log` facade. Binaries call
//! [`init_logging`] once at startup to install an `env_logger` backend that
//! renders lines in the configured [`LogFormat`].
//!
//! ```rust,no_run
//! use roleguard_core::config::LoggingConfig;
//!
//! roleguard_core::logging::init_logging(&LoggingConfig::default());
//! log::info!("policy loaded");
//! ```

pub mod formatter;

pub use formatter::LogFormat;

use crate::config::LoggingConfig;
use std::io::Write;

/// Install the global logger
///
/// Safe to call more than once; only the first call installs a logger.
/// `RUST_LOG` directives are applied on top of the configured level.
pub fn init_logging(config: &LoggingConfig) {
    let level = config.level.parse::<log::LevelFilter>().unwrap_or(log::LevelFilter::Info);
    let format = LogFormat::from_name(&config.format);

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.format(move |buf, record| {
        let line = format.format_line(
            chrono::Utc::now(),
            record.level(),
            record.target(),
            &record.args().to_string(),
        );
        writeln!(buf, "{}", line)
    });

    // try_init: a host may already have installed its own logger
    let _ = builder.try_init();
}
