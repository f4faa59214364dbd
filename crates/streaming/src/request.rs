use reqwest::Url;

use crate::error::FetchError;

pub const ELEVATION_PATH: &str = "api/elevationData";

/// Where to sample: WGS84 degrees plus a web-map zoom level.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ElevationQuery {
    pub lat: f64,
    pub long: f64,
    pub zoom: u8,
}

impl ElevationQuery {
    pub fn new(lat: f64, long: f64, zoom: u8) -> Result<Self, FetchError> {
        let query = Self { lat, long, zoom };
        query.validate()?;
        Ok(query)
    }

    pub fn validate(&self) -> Result<(), FetchError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(FetchError::InvalidQuery(format!(
                "latitude {} outside [-90, 90]",
                self.lat
            )));
        }
        if !self.long.is_finite() || !(-180.0..=180.0).contains(&self.long) {
            return Err(FetchError::InvalidQuery(format!(
                "longitude {} outside [-180, 180]",
                self.long
            )));
        }
        Ok(())
    }

    /// `{base}/api/elevationData?lat=..&long=..&zoom=..`
    pub fn url(&self, base_url: &str) -> Result<Url, FetchError> {
        let endpoint = format!("{}/{ELEVATION_PATH}", base_url.trim_end_matches('/'));
        Url::parse_with_params(
            &endpoint,
            &[
                ("lat", self.lat.to_string()),
                ("long", self.long.to_string()),
                ("zoom", self.zoom.to_string()),
            ],
        )
        .map_err(|e| FetchError::InvalidUrl {
            url: endpoint.clone(),
            reason: e.to_string(),
        })
    }
}
