//! Logging setup shared by unit and integration tests.

use std::sync::Once;
use tracing::debug;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

static TEST_SETUP: Once = Once::new();

/// Installs a global test subscriber once per process.
///
/// Honours `RUST_LOG`; defaults to `crumbs=debug`. Output goes through the
/// test writer so it is captured unless `--nocapture` is given.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crumbs=debug"));

        let installed = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .try_init();

        match installed {
            Ok(()) => debug!("test logging initialized"),
            Err(e) => eprintln!("Error: Failed to set up logging: {}", e),
        }
    });
}
