use crate::error::{TerrainError, cell_count};

/// One RGB sample, 0-255 per channel.
pub type Rgb = [u8; 3];

/// Rectangular height samples in row-major order (`index = row * width + col`).
///
/// Fields are public so callers can inspect a sample freely; construct through
/// [`ElevationGrid::new`] to get every invariant checked up front.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationGrid {
    pub width: usize,
    pub height: usize,
    pub values: Vec<f64>,
    /// Column of the originally queried point.
    pub query_col: usize,
    /// Row of the originally queried point.
    pub query_row: usize,
}

impl ElevationGrid {
    pub fn new(
        width: usize,
        height: usize,
        values: Vec<f64>,
        query_col: usize,
        query_row: usize,
    ) -> Result<Self, TerrainError> {
        let expected = cell_count(width, height)?;
        if values.len() != expected {
            return Err(TerrainError::DimensionMismatch {
                expected,
                actual: values.len(),
            });
        }
        if query_col >= width || query_row >= height {
            return Err(TerrainError::IndexOutOfRange {
                col: query_col,
                row: query_row,
                width,
                height,
            });
        }
        Ok(Self {
            width,
            height,
            values,
            query_col,
            query_row,
        })
    }

    /// Grid of constant elevation with the query at the centroid cell.
    pub fn flat(width: usize, height: usize, elevation: f64) -> Result<Self, TerrainError> {
        let n = cell_count(width, height)?;
        Self::new(width, height, vec![elevation; n], width / 2, height / 2)
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    pub fn index(&self, col: usize, row: usize) -> Option<usize> {
        (col < self.width && row < self.height).then(|| row * self.width + col)
    }

    pub fn value_at(&self, col: usize, row: usize) -> Option<f64> {
        self.index(col, row).and_then(|i| self.values.get(i).copied())
    }

    /// `(min, max)` elevation.
    pub fn elevation_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.values.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

/// Satellite imagery aligned cell-for-cell with an [`ElevationGrid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SatelliteSample {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Rgb>,
}

impl SatelliteSample {
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self, TerrainError> {
        let expected = cell_count(width, height)?;
        if pixels.len() != expected {
            return Err(TerrainError::ShapeMismatch {
                what: "satellite pixel count",
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Fails with `ShapeMismatch` unless both rasters have the same dimensions.
    pub fn ensure_aligned(&self, grid: &ElevationGrid) -> Result<(), TerrainError> {
        ensure_same_shape(
            ["satellite image width", "satellite image height"],
            (self.width, self.height),
            grid,
        )
    }
}

/// `labels` names the width and height checks in the error.
pub(crate) fn ensure_same_shape(
    labels: [&'static str; 2],
    (width, height): (usize, usize),
    grid: &ElevationGrid,
) -> Result<(), TerrainError> {
    if width != grid.width {
        return Err(TerrainError::ShapeMismatch {
            what: labels[0],
            expected: grid.width,
            actual: width,
        });
    }
    if height != grid.height {
        return Err(TerrainError::ShapeMismatch {
            what: labels[1],
            expected: grid.height,
            actual: height,
        });
    }
    Ok(())
}
