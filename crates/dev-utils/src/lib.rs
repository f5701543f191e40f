use std::sync::Once;

static INIT: Once = Once::new();

/// Install a fmt subscriber for tests. Filtered by `RUST_LOG`, defaults to
/// `trace` for the emmi crates; safe to call from every test binary.
pub fn setup_test_log() {
    INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, registry::Registry, EnvFilter};
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("emmi_wire=trace,emmi_adapter=trace"));
        let _ = tracing::subscriber::set_global_default(
            Registry::default().with(filter).with(
                fmt::Layer::default()
                    .with_test_writer()
                    .with_line_number(true)
                    .with_file(true),
            ),
        );
    });
}
