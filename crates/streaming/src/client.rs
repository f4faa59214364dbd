use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use tracing::{debug, info};

use crate::error::{FetchError, LoadError};
use crate::protocol::{ElevationResponse, TerrainPayload};
use crate::request::ElevationQuery;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Something that answers elevation queries.
///
/// Returns boxed futures so sources can sit behind `dyn`.
pub trait ElevationSource: Send + Sync {
    fn describe(&self) -> String;

    fn fetch(&self, query: ElevationQuery)
    -> BoxFuture<'_, Result<ElevationResponse, FetchError>>;
}

/// The elevation backend over HTTP.
pub struct HttpElevationSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpElevationSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }
}

impl ElevationSource for HttpElevationSource {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    fn fetch(
        &self,
        query: ElevationQuery,
    ) -> BoxFuture<'_, Result<ElevationResponse, FetchError>> {
        Box::pin(async move {
            let url = query.url(&self.base_url)?;
            let url_text = url.to_string();
            debug!(url = %url_text, "requesting elevation data");

            let resp = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|source| FetchError::Transport {
                    url: url_text.clone(),
                    source,
                })?;

            let status = resp.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url: url_text,
                    status: status.as_u16(),
                });
            }

            let body = resp.bytes().await.map_err(|source| FetchError::Transport {
                url: url_text.clone(),
                source,
            })?;
            ElevationResponse::from_json(&body).map_err(FetchError::Decode)
        })
    }
}

/// A response saved to disk, e.g. for offline runs.
pub struct FileElevationSource {
    path: PathBuf,
}

impl FileElevationSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ElevationSource for FileElevationSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(
        &self,
        _query: ElevationQuery,
    ) -> BoxFuture<'_, Result<ElevationResponse, FetchError>> {
        Box::pin(async move {
            let bytes = tokio::fs::read(&self.path)
                .await
                .map_err(|source| FetchError::Io {
                    path: self.path.clone(),
                    source,
                })?;
            ElevationResponse::from_json(&bytes).map_err(FetchError::Decode)
        })
    }
}

/// Answers every query with the same response.
pub struct StaticElevationSource {
    response: ElevationResponse,
}

impl StaticElevationSource {
    pub fn new(response: ElevationResponse) -> Self {
        Self { response }
    }
}

impl ElevationSource for StaticElevationSource {
    fn describe(&self) -> String {
        format!("static {}x{}", self.response.width, self.response.height)
    }

    fn fetch(
        &self,
        _query: ElevationQuery,
    ) -> BoxFuture<'_, Result<ElevationResponse, FetchError>> {
        let response = self.response.clone();
        Box::pin(async move { Ok(response) })
    }
}

/// Fetch one sample and validate it into a terrain payload.
pub async fn load_terrain_payload(
    source: &dyn ElevationSource,
    query: ElevationQuery,
) -> Result<TerrainPayload, LoadError> {
    query.validate()?;
    info!(
        source = %source.describe(),
        lat = query.lat,
        long = query.long,
        zoom = query.zoom,
        "fetching elevation sample"
    );
    let response = source.fetch(query).await?;
    let payload = response.into_payload()?;
    info!(
        width = payload.grid.width,
        height = payload.grid.height,
        imagery = payload.satellite.is_some(),
        "elevation sample received"
    );
    Ok(payload)
}
