//! Logging setup for the `phlogmap` binary.

/// Initialize `env_logger` at `Info`, or `Debug` when `verbose` is set.
///
/// `RUST_LOG` still takes precedence when present.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .parse_default_env()
        .init();
}
