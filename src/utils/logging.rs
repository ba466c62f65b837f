use log::LevelFilter;

/// Initializes env_logger for the embedding shell (reads `RUST_LOG`,
/// defaults to info). Safe to call more than once; later calls are no-ops.
pub fn init() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Info)
        .try_init();
}
