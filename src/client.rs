//! Catalogue input collaborator.
//!
//! The record array is owned by the catalogue service; this module fetches
//! it once at startup, either over HTTP from the service's public-plants
//! endpoint or from a bundled `all_plants.json` file. No retry, no
//! caching: completion hands an immutable array to the core.

#[cfg(feature = "web")]
use anyhow::{Context, Result};

#[cfg(feature = "web")]
use std::path::PathBuf;

#[cfg(feature = "web")]
use crate::record::PlantRecord;

/// Where the catalogue array comes from.
#[cfg(feature = "web")]
#[derive(Debug, Clone)]
pub enum CatalogueSource {
    /// Base URL of the catalogue service; records come from
    /// `GET {base}/api/public-plants`.
    Remote(String),
    /// Path to an `all_plants.json` bundle.
    File(PathBuf),
}

#[cfg(feature = "web")]
impl CatalogueSource {
    /// Fetch the record array.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or file read fails, or the payload
    /// is not a JSON array of records. Individual malformed fields inside
    /// a record do not fail the load; serde defaults absorb them.
    pub async fn load(&self) -> Result<Vec<PlantRecord>> {
        match self {
            CatalogueSource::Remote(base_url) => fetch_remote(base_url).await,
            CatalogueSource::File(path) => load_bundle(path),
        }
    }
}

#[cfg(feature = "web")]
async fn fetch_remote(base_url: &str) -> Result<Vec<PlantRecord>> {
    let url = format!("{}/api/public-plants", base_url.trim_end_matches('/'));
    tracing::info!("Fetching catalogue from {}", url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .get(&url)
        .send()
        .await
        .context("Failed to reach catalogue service")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Catalogue service error ({status}): {body}");
    }

    let records: Vec<PlantRecord> = response
        .json()
        .await
        .context("Failed to parse catalogue response")?;

    tracing::info!("Fetched {} catalogue records", records.len());
    Ok(records)
}

#[cfg(feature = "web")]
fn load_bundle(path: &PathBuf) -> Result<Vec<PlantRecord>> {
    tracing::info!("Loading catalogue bundle from {}", path.display());
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read bundle {}", path.display()))?;
    let records: Vec<PlantRecord> =
        serde_json::from_str(&contents).context("Failed to parse catalogue bundle")?;
    tracing::info!("Loaded {} catalogue records", records.len());
    Ok(records)
}
