//! Diagnostic tracing for the CLI.
//!
//! Reads `RUST_LOG` and defaults to `warn`. Output goes to stderr so enciphered text on
//! stdout stays clean for piping.
//!
//! ```bash
//! RUST_LOG=enigma=trace enigma-cli HELLO
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
