use foundation::math::Vec3;

use crate::error::{TerrainError, cell_count};
use crate::grid::ElevationGrid;

/// Translation that moves the queried cell onto the world origin.
///
/// `dx`/`dy` shift the planar layout; `dz` is the elevation at the query
/// cell, used as marker stem height rather than to sink the mesh.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct RecenterOffset {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl RecenterOffset {
    /// Terrain placement. Elevations stay absolute.
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.dx, self.dy, 0.0)
    }

    /// World position of the surface point above the origin.
    pub fn surface_point(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.dz)
    }
}

pub fn recenter_offset(grid: &ElevationGrid) -> Result<RecenterOffset, TerrainError> {
    let (width, height) = (grid.width, grid.height);
    let expected = cell_count(width, height)?;
    if grid.query_col >= width || grid.query_row >= height {
        return Err(TerrainError::IndexOutOfRange {
            col: grid.query_col,
            row: grid.query_row,
            width,
            height,
        });
    }
    let dz = grid
        .value_at(grid.query_col, grid.query_row)
        .ok_or(TerrainError::DimensionMismatch {
            expected,
            actual: grid.values.len(),
        })?;

    Ok(RecenterOffset {
        dx: (width / 2) as f64 - grid.query_col as f64,
        dy: (height / 2) as f64 - grid.query_row as f64,
        dz,
    })
}

#[cfg(test)]
mod tests {
    use super::{RecenterOffset, recenter_offset};
    use crate::error::TerrainError;
    use crate::grid::ElevationGrid;
    use crate::mesh::build_mesh;
    use foundation::math::Vec3;
    use pretty_assertions::assert_eq;

    fn grid_3x3(query_col: usize, query_row: usize) -> ElevationGrid {
        let values = vec![0.0, 0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 0.0];
        ElevationGrid::new(3, 3, values, query_col, query_row).expect("grid")
    }

    #[test]
    fn centered_query_needs_no_planar_shift() {
        let offset = recenter_offset(&grid_3x3(1, 1)).expect("offset");
        assert_eq!(
            offset,
            RecenterOffset {
                dx: 0.0,
                dy: 0.0,
                dz: 5.0
            }
        );
    }

    #[test]
    fn corner_query_shifts_by_half_extent() {
        let offset = recenter_offset(&grid_3x3(0, 0)).expect("offset");
        assert_eq!((offset.dx, offset.dy, offset.dz), (1.0, 1.0, 0.0));

        let offset = recenter_offset(&grid_3x3(2, 0)).expect("offset");
        assert_eq!((offset.dx, offset.dy), (-1.0, 1.0));
    }

    #[test]
    fn even_grid_uses_floor_of_half_extent() {
        let grid = ElevationGrid::new(2, 2, vec![1.0, 2.0, 3.0, 4.0], 0, 0).expect("grid");
        let offset = recenter_offset(&grid).expect("offset");
        assert_eq!((offset.dx, offset.dy, offset.dz), (1.0, 1.0, 1.0));
    }

    #[test]
    fn uniform_grid_dz_is_the_constant() {
        let grid = ElevationGrid::new(4, 3, vec![42.5; 12], 3, 2).expect("grid");
        assert_eq!(recenter_offset(&grid).expect("offset").dz, 42.5);
    }

    #[test]
    fn translated_query_vertex_lands_above_origin() {
        for (col, row) in [(0, 0), (1, 1), (2, 1), (0, 2)] {
            let grid = grid_3x3(col, row);
            let mesh = build_mesh(&grid, None).expect("mesh");
            let offset = recenter_offset(&grid).expect("offset");
            let i = row * grid.width + col;
            let world = mesh.vertex(i).expect("vertex") + offset.translation();
            assert_eq!(world, offset.surface_point(), "query ({col}, {row})");
        }
        assert_eq!(
            recenter_offset(&grid_3x3(1, 1))
                .expect("offset")
                .surface_point(),
            Vec3::new(0.0, 0.0, 5.0)
        );
    }

    #[test]
    fn rejects_query_outside_grid() {
        let grid = ElevationGrid {
            width: 3,
            height: 3,
            values: vec![0.0; 9],
            query_col: 1,
            query_row: 3,
        };
        assert_eq!(
            recenter_offset(&grid),
            Err(TerrainError::IndexOutOfRange {
                col: 1,
                row: 3,
                width: 3,
                height: 3
            })
        );
    }

    #[test]
    fn rejects_short_values() {
        let grid = ElevationGrid {
            width: 2,
            height: 2,
            values: vec![1.0, 2.0],
            query_col: 1,
            query_row: 1,
        };
        assert_eq!(
            recenter_offset(&grid),
            Err(TerrainError::DimensionMismatch {
                expected: 4,
                actual: 2
            })
        );
    }
}
