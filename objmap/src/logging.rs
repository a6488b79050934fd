//! Opt-in tracing output for applications and tests.
//!
//! The library only emits events: `debug` for registration and lookup, `warn`
//! when a registration is shadowed, `trace` for each applied rule. Nothing is
//! printed unless a subscriber is installed, e.g. through [`try_init`].

use tracing::Subscriber;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a compact stderr subscriber filtered by `RUST_LOG`.
///
/// Falls back to `default_directive` (e.g. `"warn"` or `"objmap=debug"`) when
/// `RUST_LOG` is unset or unparsable. Fails if a global subscriber is already
/// set, which makes it safe to call from several tests.
///
/// ```bash
/// RUST_LOG=objmap=trace cargo test
/// ```
pub fn try_init(default_directive: &str) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    subscriber(filter).try_init()
}

/// The subscriber [`try_init`] installs, for scoped use with
/// [`tracing::subscriber::with_default`].
pub fn subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::*;

    #[test]
    fn filter_directives_select_targets_and_levels() {
        let scoped = subscriber(EnvFilter::new("objmap=debug"));
        tracing::subscriber::with_default(scoped, || {
            assert!(tracing::enabled!(target: "objmap::registry", Level::DEBUG));
            assert!(!tracing::enabled!(target: "objmap::mapper", Level::TRACE));
            assert!(!tracing::enabled!(target: "other_crate", Level::ERROR));
        });
    }
}
