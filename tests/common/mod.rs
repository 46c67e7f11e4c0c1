use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Installs a test logger once per test binary. `RUST_LOG` overrides the
/// default level, e.g. `RUST_LOG=hashtbl=debug` to see every rehash.
pub fn init_test_logger() {
    INIT.call_once(|| {
        let mut builder = Builder::new();
        builder
            .filter_level(LevelFilter::Info)
            .is_test(true)
            .parse_default_env();
        // Another harness may already have installed a logger.
        let _ = builder.try_init();
    });
}
