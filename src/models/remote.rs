//! Remote model listing from an OpenAI-compatible `/models` endpoint.

use std::time::Duration;

use serde::Deserialize;

use crate::config::RemoteConfig;
use crate::encoding::EncodingResolver;
use crate::error::{Result, TokCalcError};
use crate::models::catalog::{ModelCatalog, ModelEntry};

/// One model from the `/models` response
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteModel {
    /// Model identifier
    pub id: String,
    /// Owning organisation
    #[serde(default)]
    pub owned_by: Option<String>,
    /// Creation time (unix seconds)
    #[serde(default)]
    pub created: Option<u64>,
}

/// Response from the `/models` API
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteModelsResponse {
    /// List of available models
    pub data: Vec<RemoteModel>,
}

impl RemoteModelsResponse {
    /// Get the list of models
    pub fn models(&self) -> &[RemoteModel] {
        &self.data
    }

    /// Iterate over model ids
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.data.iter().map(|m| m.id.as_str())
    }

    /// Get the number of models
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Fetch the provider's model list without filtering
pub async fn fetch_remote_listing(config: &RemoteConfig) -> Result<RemoteModelsResponse> {
    let api_key = config.api_key()?;
    let url = config.models_url();

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    tracing::debug!(%url, "fetching remote model list");
    let response = client.get(&url).bearer_auth(api_key).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TokCalcError::Upstream(format!("{url} returned {status}: {body}")));
    }

    let listing: RemoteModelsResponse = response.json().await?;
    tracing::info!(models = listing.len(), "fetched remote model list");
    Ok(listing)
}

/// Fetch the provider's model list and keep the models with a known encoding
pub async fn fetch_remote_models<R: EncodingResolver>(
    config: &RemoteConfig,
    catalog: &ModelCatalog<R>,
) -> Result<Vec<ModelEntry>> {
    let listing = fetch_remote_listing(config).await?;
    let supported = catalog.filter_supported(listing.ids());

    tracing::debug!(
        listed = listing.len(),
        supported = supported.len(),
        "filtered remote models"
    );
    Ok(supported)
}
