//! Token metadata storage.
//!
//! Launch requests carry the token image as base64; the image is pinned
//! first, then the metadata JSON referencing it, and the resulting URI goes
//! into the on-chain launch instruction.

use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

const PIN_JSON_URL: &str = "https://api.pinata.cloud/pinning/pinJSONToIPFS";
const PIN_FILE_URL: &str = "https://api.pinata.cloud/pinning/pinFileToIPFS";
const GATEWAY_PREFIX: &str = "https://ipfs.io/ipfs/";

/// Metadata structure for a launched token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    /// Name of the token
    pub name: String,
    /// Token symbol (e.g. "BTC")
    pub symbol: String,
    /// Description of the token
    pub description: String,
    /// Pinned URL of the token's image
    pub image: String,
    /// Whether to display the token's name
    pub show_name: bool,
    /// Twitter handle
    pub twitter: Option<String>,
    /// Telegram handle
    pub telegram: Option<String>,
    /// Website URL
    pub website: Option<String>,
}

/// Response received after successfully uploading token metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadataIPFS {
    /// The uploaded token metadata
    pub metadata: TokenMetadata,
    /// URI where the metadata is stored
    pub metadata_uri: String,
}

/// Parameters for creating new token metadata.
#[derive(Debug, Clone)]
pub struct CreateTokenMetadata {
    pub name: String,
    pub symbol: String,
    pub description: String,
    /// Token image as base64, or an already-hosted URL in `image_url`
    pub image_base64: Option<String>,
    pub image_url: Option<String>,
    pub twitter: Option<String>,
    pub telegram: Option<String>,
    pub website: Option<String>,
}

pub async fn create_token_metadata(
    metadata: CreateTokenMetadata,
    jwt_token: &str,
) -> Result<TokenMetadataIPFS, anyhow::Error> {
    let image_url = match (&metadata.image_url, &metadata.image_base64) {
        (Some(url), _) => url.clone(),
        (None, Some(base64_string)) => upload_base64_file(base64_string, jwt_token).await?,
        (None, None) => return Err(anyhow::anyhow!("launch needs an image or an image URL")),
    };

    let token_metadata = TokenMetadata {
        name: metadata.name,
        symbol: metadata.symbol,
        description: metadata.description,
        image: image_url,
        show_name: true,
        twitter: metadata.twitter,
        telegram: metadata.telegram,
        website: metadata.website,
    };

    let client = Client::new();
    let response = client
        .post(PIN_JSON_URL)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {}", jwt_token))
        .json(&token_metadata)
        .send()
        .await?;

    if response.status().is_success() {
        let res_data: Value = response.json().await?;
        let ipfs_hash = res_data["IpfsHash"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("pin response missing IpfsHash"))?;
        Ok(TokenMetadataIPFS {
            metadata: token_metadata,
            metadata_uri: format!("{GATEWAY_PREFIX}{ipfs_hash}"),
        })
    } else {
        error!("metadata pin failed: {:?}", response.status());
        Err(anyhow::anyhow!("Failed to create token metadata"))
    }
}

pub async fn upload_base64_file(
    base64_string: &str,
    jwt_token: &str,
) -> Result<String, anyhow::Error> {
    let decoded_bytes = general_purpose::STANDARD.decode(base64_string)?;

    let client = Client::builder().timeout(Duration::from_secs(120)).build()?;

    let part = Part::bytes(decoded_bytes)
        .file_name("file.png")
        .mime_str("image/png")?;

    let form = Form::new().part("file", part);

    let response = client
        .post(PIN_FILE_URL)
        .header("Authorization", format!("Bearer {}", jwt_token))
        .header("Accept", "application/json")
        .multipart(form)
        .send()
        .await?;

    if response.status().is_success() {
        let response_json: Value = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to parse JSON: {e}"))?;
        let ipfs_hash = response_json["IpfsHash"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("pin response missing IpfsHash"))?;
        Ok(format!("{GATEWAY_PREFIX}{ipfs_hash}"))
    } else {
        let error_text = response.text().await?;
        error!("image pin failed: {error_text}");
        Err(anyhow::anyhow!(
            "Failed to upload file to storage: {error_text}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_serializes_camel_case() {
        let metadata = TokenMetadata {
            name: "Token".to_string(),
            symbol: "TKN".to_string(),
            description: "a token".to_string(),
            image: "https://ipfs.io/ipfs/abc".to_string(),
            show_name: true,
            twitter: None,
            telegram: None,
            website: Some("https://example.com".to_string()),
        };
        let value = serde_json::to_value(&metadata).unwrap();
        assert!(value.get("showName").is_some());
        assert!(value.get("show_name").is_none());
    }

    #[tokio::test]
    async fn rejects_launch_without_image() {
        let result = create_token_metadata(
            CreateTokenMetadata {
                name: "Token".to_string(),
                symbol: "TKN".to_string(),
                description: String::new(),
                image_base64: None,
                image_url: None,
                twitter: None,
                telegram: None,
                website: None,
            },
            "jwt",
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn rejects_invalid_image_base64() {
        assert!(upload_base64_file("!!not-base64!!", "jwt").await.is_err());
    }
}
