//! Logging initialization

/// Initialize the global logger from the `RUST_LOG` environment.
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let _ = env_logger::Builder::from_default_env().try_init();
}
