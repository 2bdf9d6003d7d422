//! Definitions bundle download.

use reqwest::blocking::Client;
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::constants;
use crate::error::{Error, Result};

/// Downloads the provider's zip of definitions into memory.
///
/// # Errors
///
/// Returns [`Error::Download`] if the request fails, the server answers with a
/// non-success status, or the body is empty.
pub fn download_definitions(config: &Config) -> Result<Vec<u8>> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.settings.timeout_secs))
        .user_agent(config.settings.user_agent.as_str())
        .build()
        .map_err(|e| Error::Download(format!("{}: {e}", constants::ERR_HTTP_CLIENT_BUILD_FAILED)))?;

    let url = config.settings.definitions_url.as_str();
    info!(url, "downloading definitions");

    let response = client
        .get(url)
        .send()
        .map_err(|e| Error::Download(format!("{}: {e}", constants::ERR_NETWORK_REQUEST_FAILED)))?;

    if !response.status().is_success() {
        return Err(Error::Download(format!(
            "{}{}",
            constants::ERR_SERVER_ERROR,
            response.status()
        )));
    }

    let content = response
        .bytes()
        .map_err(|e| Error::Download(format!("{}: {e}", constants::ERR_READ_CONTENT_FAILED)))?;

    if content.is_empty() {
        return Err(Error::Download(constants::ERR_EMPTY_CONTENT.to_string()));
    }

    info!(bytes = content.len(), "downloaded definitions");
    Ok(content.to_vec())
}
