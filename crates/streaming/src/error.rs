use std::path::PathBuf;

use terrain::TerrainError;

/// The elevation request did not produce a decodable response.
#[derive(Debug)]
pub enum FetchError {
    InvalidQuery(String),
    InvalidUrl {
        url: String,
        reason: String,
    },
    Transport {
        url: String,
        source: reqwest::Error,
    },
    Status {
        url: String,
        status: u16,
    },
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Decode(serde_json::Error),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::InvalidQuery(msg) => write!(f, "invalid elevation query: {msg}"),
            FetchError::InvalidUrl { url, reason } => write!(f, "invalid url {url}: {reason}"),
            FetchError::Transport { url, .. } => write!(f, "request to {url} failed"),
            FetchError::Status { url, status } => write!(f, "{url} answered HTTP {status}"),
            FetchError::Io { path, .. } => write!(f, "failed to read {}", path.display()),
            FetchError::Decode(_) => write!(f, "malformed elevation response"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Transport { source, .. } => Some(source),
            FetchError::Io { source, .. } => Some(source),
            FetchError::Decode(source) => Some(source),
            _ => None,
        }
    }
}

/// A decoded response that does not describe a usable terrain.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadError {
    InvalidCenter { xcenter: f64, ycenter: f64 },
    NonFiniteElevation { index: usize, value: f64 },
    Terrain(TerrainError),
}

impl std::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadError::InvalidCenter { xcenter, ycenter } => {
                write!(f, "invalid query center ({xcenter}, {ycenter})")
            }
            PayloadError::NonFiniteElevation { index, value } => {
                write!(f, "elevation {index} is not finite: {value}")
            }
            PayloadError::Terrain(_) => write!(f, "inconsistent terrain payload"),
        }
    }
}

impl std::error::Error for PayloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PayloadError::Terrain(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TerrainError> for PayloadError {
    fn from(err: TerrainError) -> Self {
        PayloadError::Terrain(err)
    }
}

/// Anything that stops a query from becoming a terrain payload.
#[derive(Debug)]
pub enum LoadError {
    Fetch(FetchError),
    Payload(PayloadError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Fetch(err) => write!(f, "fetch failed: {err}"),
            LoadError::Payload(err) => write!(f, "rejected payload: {err}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Fetch(err) => Some(err),
            LoadError::Payload(err) => Some(err),
        }
    }
}

impl From<FetchError> for LoadError {
    fn from(err: FetchError) -> Self {
        LoadError::Fetch(err)
    }
}

impl From<PayloadError> for LoadError {
    fn from(err: PayloadError) -> Self {
        LoadError::Payload(err)
    }
}
