use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Default filter when `RUST_LOG` is unset in development.
const DEV_FILTER: &str = "info,domain_qdrant=debug";

/// Default filter when `RUST_LOG` is unset in production.
const PROD_FILTER: &str = "warn,domain_qdrant=info";

/// Initialize a global tracing subscriber for applications and tests that use
/// the client crates.
///
/// The client libraries only emit events; they never install a subscriber.
/// Call this once from `main` (or from tests that want to see request logs).
///
/// - **Production** (`APP_ENV=production`): JSON lines, flattened event fields,
///   module targets hidden.
/// - **Development** (default): pretty, human-readable output.
///
/// Both include [`tracing_error::ErrorLayer`] so span traces can be attached to
/// errors. `RUST_LOG` overrides the default filter.
///
/// Calling this more than once is harmless: later calls notice the global
/// subscriber is already set and return.
pub fn init_tracing(environment: &Environment) {
    let is_production = environment.is_production();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_production {
            EnvFilter::new(PROD_FILTER)
        } else {
            EnvFilter::new(DEV_FILTER)
        }
    });

    let result = if is_production {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => {
            info!(environment = ?environment, "Tracing initialized");
        }
        Err(_) => {
            debug!("Tracing already initialized, skipping re-initialization");
        }
    }
}
