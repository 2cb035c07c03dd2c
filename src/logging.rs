use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the stderr log subscriber. Safe to call more than once.
///
/// Only warnings are shown by default, `verbose` lowers that to debug output
/// from this crate, and `RUST_LOG` (e.g. `RUST_LOG=text_fitter=trace`) wins
/// over both.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let default_directive = if verbose { "warn,text_fitter=debug" } else { "warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .init();
    });
}
