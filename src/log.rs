use std::env;

use log::LevelFilter;

/// Environment variable that turns on debug output like `--verbose` does.
pub const DEBUG_ENV: &str = "BOGGLER_DEBUG";

/// Initialize logging for the command line front end.
///
/// Logs at `Info` by default and at `Debug` when `debug_enabled` is set or
/// [`DEBUG_ENV`] is present. An explicit `RUST_LOG` overrides both.
pub fn init_logger(debug_enabled: bool) {
    let level = if debug_enabled || env::var_os(DEBUG_ENV).is_some() {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    // Let RUST_LOG override our defaults if explicitly set
    if let Ok(spec) = env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    // A second initialization (e.g. from tests) keeps the first logger.
    if builder.try_init().is_ok() {
        log::debug!("Logger initialized at {level:?} level");
    }
}
