#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerrainError {
    /// A per-pixel array disagrees with its declared dimensions, or two
    /// rasters that must align do not.
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    /// The elevation values disagree with `width * height`.
    DimensionMismatch { expected: usize, actual: usize },
    /// The query cell lies outside the grid.
    IndexOutOfRange {
        col: usize,
        row: usize,
        width: usize,
        height: usize,
    },
    /// Width or height is zero, or their product overflows.
    EmptyGrid { width: usize, height: usize },
}

impl std::fmt::Display for TerrainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerrainError::ShapeMismatch {
                what,
                expected,
                actual,
            } => write!(f, "{what}: expected {expected}, got {actual}"),
            TerrainError::DimensionMismatch { expected, actual } => {
                write!(f, "elevation grid: expected {expected} values, got {actual}")
            }
            TerrainError::IndexOutOfRange {
                col,
                row,
                width,
                height,
            } => write!(f, "query cell ({col}, {row}) outside {width}x{height} grid"),
            TerrainError::EmptyGrid { width, height } => {
                write!(f, "invalid grid dimensions {width}x{height}")
            }
        }
    }
}

impl std::error::Error for TerrainError {}

/// `width * height`, rejecting empty or overflowing dimensions.
pub(crate) fn cell_count(width: usize, height: usize) -> Result<usize, TerrainError> {
    if width == 0 || height == 0 {
        return Err(TerrainError::EmptyGrid { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(TerrainError::EmptyGrid { width, height })
}
