use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs the stderr subscriber. `RUST_LOG` wins over `verbosity`.
pub fn init_tracing(verbosity: u8) {
    INIT.call_once(|| {
        let default_level = match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(format!("braille_core={default_level}"))),
            )
            .init();
    });
}
