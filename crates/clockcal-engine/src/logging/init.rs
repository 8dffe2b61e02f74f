use std::sync::Once;

use log::LevelFilter;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "clockcal=debug,wgpu_core=warn"). When it is `None`, `RUST_LOG` is consulted
/// before falling back to `default_level` plus `quiet_modules`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: LevelFilter,
    /// Modules capped at `warn` under the default level. wgpu and naga are very
    /// chatty at `info`.
    pub quiet_modules: Vec<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: LevelFilter::Info,
            quiet_modules: ["wgpu_core", "wgpu_hal", "naga"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Idempotent; subsequent calls are ignored. Call early in `main`, before the
/// supervisor spawns any thread.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(config.default_level);
            for module in &config.quiet_modules {
                builder.filter_module(module, LevelFilter::Warn);
            }
        }

        builder.write_style(config.write_style);

        // Another logger may already be installed (test harnesses).
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized");
    });
}
