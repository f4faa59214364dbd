//! JSON contract of `GET /api/elevationData`.

use serde::{Deserialize, Serialize};
use terrain::{ElevationGrid, Rgb, SatelliteSample};

use crate::error::PayloadError;

/// Response body as sent by the backend.
///
/// `xcenter`/`ycenter` locate the queried point in grid cells and may be
/// fractional; `elevationData` and `satelliteImage` are row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElevationResponse {
    pub width: usize,
    pub height: usize,
    pub xcenter: f64,
    pub ycenter: f64,
    pub elevation_data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satellite_image: Option<Vec<Rgb>>,
}

/// Validated terrain input. Grid and imagery are guaranteed to align.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainPayload {
    pub grid: ElevationGrid,
    pub satellite: Option<SatelliteSample>,
}

impl ElevationResponse {
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Validate and convert into core types. Fractional centers are floored.
    pub fn into_payload(self) -> Result<TerrainPayload, PayloadError> {
        let center_ok = |c: f64| c.is_finite() && c >= 0.0;
        if !center_ok(self.xcenter) || !center_ok(self.ycenter) {
            return Err(PayloadError::InvalidCenter {
                xcenter: self.xcenter,
                ycenter: self.ycenter,
            });
        }
        if let Some((index, value)) = self
            .elevation_data
            .iter()
            .copied()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(PayloadError::NonFiniteElevation { index, value });
        }

        let grid = ElevationGrid::new(
            self.width,
            self.height,
            self.elevation_data,
            self.xcenter.floor() as usize,
            self.ycenter.floor() as usize,
        )?;
        let satellite = match self.satellite_image {
            Some(pixels) => {
                let sample = SatelliteSample::new(self.width, self.height, pixels)?;
                sample.ensure_aligned(&grid)?;
                Some(sample)
            }
            None => None,
        };
        Ok(TerrainPayload { grid, satellite })
    }
}
