//! Client for the external VIN metadata service.

use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

/// Extra vehicle attributes looked up by VIN. All fields are optional because
/// the upstream service has patchy coverage.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleMetadata {
    pub engine: Option<String>,
    pub transmission: Option<String>,
    pub country_of_origin: Option<String>,
}

pub fn build_client() -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;
    Ok(client)
}

/// Fetches metadata for a single VIN. Lookup failures are logged and mapped to
/// an empty record so a flaky upstream never breaks vehicle listings.
pub async fn fetch_metadata(
    client: &reqwest::Client,
    base_url: &str,
    vin: &str,
) -> VehicleMetadata {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), vin);

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!("Metadata lookup for VIN {} failed: {}", vin, e);
            return VehicleMetadata::default();
        }
    };

    if !response.status().is_success() {
        warn!(
            "Metadata service returned {} for VIN {}",
            response.status(),
            vin
        );
        return VehicleMetadata::default();
    }

    match response.json::<VehicleMetadata>().await {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!("Metadata response for VIN {} was not decodable: {}", vin, e);
            VehicleMetadata::default()
        }
    }
}
