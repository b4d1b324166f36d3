//! # Logging
//!
//! The library only emits `tracing` events; installing a subscriber is left to the
//! application. [`setup_tracing`] installs the compact formatter used throughout the
//! tests and demos, filtered by `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=tul=debug cargo test -- --nocapture
//! ```
//!
//! What gets logged:
//!
//! - **debug**: model writes (`path`), collection adds/changes/removals (`key`, `size`),
//!   template renders, requests sent and answered.
//! - **trace**: every event fired, with its listener count.
//! - **warn**: failed path writes, collection updates whose key cannot be derived
//!   (missing keyfield, key generation failure), failed requests, JSONP
//!   payloads with no pending callback.

/// Installs a global compact subscriber filtered by `RUST_LOG`.
///
/// Panics if a global subscriber is already installed.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

/// Like [`setup_tracing`], but writes through the test harness's captured output and
/// tolerates being called from several tests.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .with_test_writer()
        .try_init();
}

/// Runs `f` under a subscriber that records every event as plain text.
#[cfg(test)]
pub(crate) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let buffer = Buffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_target(false)
        .compact()
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, logs)
}
