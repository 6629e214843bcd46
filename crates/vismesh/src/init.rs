//! Logging setup.

/// Initializes the `env_logger` backend for the `log` facade.
///
/// Verbosity is controlled by `RUST_LOG` (e.g. `RUST_LOG=vismesh=debug`).
/// Calling this more than once, or after another logger has been installed,
/// does nothing.
pub fn init_logging() {
    if env_logger::try_init().is_ok() {
        log::info!("vismesh logging initialized");
    }
}
