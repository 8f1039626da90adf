//! Real [`BlobStore`] implementation: bridges the core gateway contract to a
//! remote blob endpoint over HTTP.
//!
//! A put is an overwrite-capable `PUT {endpoint}/{container}/{name}`
//! authorised by the access key from the connection string. Transport and
//! per-blob HTTP failures are reported as [`StoreError::Rejected`] so the
//! cycle classifies the one file and moves on; a credential refusal means no
//! further put can succeed and maps to [`StoreError::SessionLost`].

use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{error, info};

use bucket_relay_core::contract::{BlobStore, NewBlob, StoreError};

#[derive(Debug)]
pub struct BlobClient {
    http: reqwest::Client,
    endpoint: String,
    access_key: String,
}

impl BlobClient {
    /// Builds a live client from a `;`-separated `Key=Value` connection
    /// string. `Endpoint` and `AccessKey` segments are required; unknown
    /// segments are tolerated.
    pub fn from_connection_string(connection_string: &str) -> Result<Self> {
        let mut endpoint = None;
        let mut access_key = None;

        for segment in connection_string
            .split(';')
            .filter(|segment| !segment.trim().is_empty())
        {
            let Some((key, value)) = segment.split_once('=') else {
                anyhow::bail!("Malformed connection string segment: {segment:?}");
            };
            match key.trim() {
                "Endpoint" => endpoint = Some(value.trim().trim_end_matches('/').to_string()),
                "AccessKey" => access_key = Some(value.trim().to_string()),
                _ => {}
            }
        }

        let endpoint = endpoint
            .ok_or_else(|| anyhow::anyhow!("Connection string is missing an Endpoint segment"))?;
        let access_key = access_key
            .ok_or_else(|| anyhow::anyhow!("Connection string is missing an AccessKey segment"))?;

        info!(endpoint = %endpoint, "Initialised blob client from connection string");
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
            access_key,
        })
    }

    fn blob_url(&self, container: &str, name: &str) -> String {
        format!("{}/{}/{}", self.endpoint, container, name)
    }
}

#[async_trait]
impl BlobStore for BlobClient {
    async fn put_blob<'a>(&self, req: NewBlob<'a>) -> Result<(), StoreError> {
        let url = self.blob_url(req.container, req.name);
        info!(
            blob = req.name,
            container = req.container,
            bytes = req.content.len(),
            "Uploading blob"
        );

        let response = self
            .http
            .put(&url)
            .bearer_auth(&self.access_key)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(req.content.to_vec())
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, blob = req.name, "Transport error uploading blob");
                StoreError::Rejected {
                    name: req.name.to_string(),
                    reason: format!("transport error: {e}"),
                }
            })?;

        let status = response.status();
        if status.is_success() {
            info!(blob = req.name, status = %status, "Successfully uploaded blob");
            return Ok(());
        }

        let reason = match response.text().await {
            Ok(body) if !body.is_empty() => format!("{status}: {body}"),
            _ => status.to_string(),
        };

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            error!(blob = req.name, status = %status, "Remote store refused credentials");
            Err(StoreError::SessionLost { reason })
        } else {
            error!(blob = req.name, status = %status, "Remote store rejected blob");
            Err(StoreError::Rejected {
                name: req.name.to_string(),
                reason,
            })
        }
    }
}
