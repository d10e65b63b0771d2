//! Tracing initialization.
//!
//! The crate emits through `tracing` and never installs a subscriber on its
//! own. What it logs:
//!
//! - `INFO` once per [`SearchIndex`](crate::SearchIndex) build, with entry and group counts and build time
//! - `TRACE` per filter pass, with the query, token count and match count
//! - `DEBUG` when session storage cannot be read or written (the query is
//!   then kept in memory only), and when a coalesced query is flushed on drop
//! - `DEBUG` when a letter jump has no anchor or its smooth scroll falls back
//! - `DEBUG` for each key action the session takes, and for key listeners
//!   being attached and detached

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

static INIT: Once = Once::new();

/// Initialize tracing for a host that has no subscriber of its own.
///
/// Safe to call multiple times. Outside tests the level defaults to `INFO`,
/// so only index builds are shown unless `RUST_LOG` asks for more. Under a
/// test runner it defaults to `DEBUG` through the test writer, so storage
/// and scroll fallbacks appear in captured output.
pub fn init() {
    INIT.call_once(|| {
        let is_test =
            std::env::var("NEXTEST").is_ok() || std::env::var("CARGO_TARGET_TMPDIR").is_ok();
        let filter = EnvFilter::from_default_env().add_directive(
            if is_test {
                tracing::Level::DEBUG
            } else {
                tracing::Level::INFO
            }
            .into(),
        );

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .with_span_events(FmtSpan::NONE)
            .compact();

        if is_test {
            // Another harness may have installed a global subscriber already.
            let _ = builder.with_test_writer().try_init();
        } else if let Err(e) = builder.with_writer(std::io::stderr).try_init() {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        tracing::debug!("tracing initialized twice");
    }
}
