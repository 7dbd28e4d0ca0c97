pub mod appointment;
pub mod auth;
pub mod dashboard;
pub mod records;
pub mod search;

use crate::api::HttpTransport;

/// Transport for the configured backend
pub(crate) fn backend() -> anyhow::Result<HttpTransport> {
    let config = crate::config::config();
    tracing::debug!("Using backend {} ({:?})", config.api.base_url, config.environment);
    Ok(HttpTransport::from_config(config)?)
}
