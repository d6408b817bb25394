use std::{env, sync::Arc};
use tracing::debug;

/// Receives failures that end a request. Reporting is best-effort and never blocks.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &anyhow::Error);

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Forwards errors to the Sentry client set up in [`crate::utils::logger::setup`].
pub struct Sentry;

impl ErrorReporter for Sentry {
    fn report(&self, error: &anyhow::Error) {
        let event_id = sentry::integrations::anyhow::capture_anyhow(error);
        debug!("Reported error to Sentry ({event_id})");
    }
}

pub struct Disabled;

impl ErrorReporter for Disabled {
    fn report(&self, _: &anyhow::Error) {}

    fn is_enabled(&self) -> bool {
        false
    }
}

/// The configured Sentry DSN. A blank `SENTRY_DSN` counts as unset.
pub fn sentry_dsn() -> Option<String> {
    configured(env::var("SENTRY_DSN").ok())
}

fn configured(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Error reporting is only enabled when a Sentry DSN is configured.
pub fn from_env() -> Arc<dyn ErrorReporter> {
    for_dsn(sentry_dsn().as_deref())
}

fn for_dsn(dsn: Option<&str>) -> Arc<dyn ErrorReporter> {
    if dsn.is_some() {
        Arc::new(Sentry)
    } else {
        Arc::new(Disabled)
    }
}
