use foundation::bounds::Aabb3;
use foundation::math::Vec3;

use crate::error::{TerrainError, cell_count};
use crate::grid::{ElevationGrid, ensure_same_shape};
use crate::texture::TextureBuffer;

/// Displaced heightmap surface.
///
/// Vertex `i` corresponds to grid cell `i` (row-major), so before any scene
/// placement `vertex(i).z == grid.values[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainMesh {
    width: usize,
    height: usize,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
    bounds: Aabb3,
}

impl TerrainMesh {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex(&self, i: usize) -> Option<Vec3> {
        self.positions.get(i).copied()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    /// Triangle list, counter-clockwise seen from +z.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Bounds in mesh-local coordinates.
    pub fn bounds(&self) -> Aabb3 {
        self.bounds
    }
}

/// Planar position of a cell: unit spacing, centroid cell at the origin.
pub fn planar_position(col: usize, row: usize, width: usize, height: usize) -> (f64, f64) {
    (
        col as f64 - (width / 2) as f64,
        row as f64 - (height / 2) as f64,
    )
}

/// Build a displaced, smooth-shaded surface from an elevation grid.
///
/// When a texture is given it must match the grid dimensions; UVs always
/// address texel centers so vertex `i` samples texel `i`.
pub fn build_mesh(
    grid: &ElevationGrid,
    texture: Option<&TextureBuffer>,
) -> Result<TerrainMesh, TerrainError> {
    let (width, height) = (grid.width, grid.height);
    let expected = cell_count(width, height)?;
    if grid.values.len() != expected {
        return Err(TerrainError::DimensionMismatch {
            expected,
            actual: grid.values.len(),
        });
    }
    if let Some(texture) = texture {
        ensure_same_shape(
            ["texture width", "texture height"],
            (texture.width(), texture.height()),
            grid,
        )?;
    }

    let mut positions = Vec::with_capacity(expected);
    let mut uvs = Vec::with_capacity(expected);
    for row in 0..height {
        for col in 0..width {
            let (x, y) = planar_position(col, row, width, height);
            positions.push(Vec3::new(x, y, 0.0));
            uvs.push([
                ((col as f64 + 0.5) / width as f64) as f32,
                ((row as f64 + 0.5) / height as f64) as f32,
            ]);
        }
    }

    // Same row-major order on both sides, so displacement is a direct lookup.
    for (p, z) in positions.iter_mut().zip(grid.values.iter().copied()) {
        p.z = z;
    }

    let indices = grid_indices(width, height);
    // Normals only after displacement, otherwise the surface shades flat.
    let normals = vertex_normals(&positions, &indices);
    let bounds = Aabb3::from_points(positions.iter().copied())
        .unwrap_or_else(|| Aabb3::new(Vec3::ZERO, Vec3::ZERO));

    Ok(TerrainMesh {
        width,
        height,
        positions,
        normals,
        uvs,
        indices,
        bounds,
    })
}

/// Two triangles per quad over `(width - 1) x (height - 1)` quads.
fn grid_indices(width: usize, height: usize) -> Vec<u32> {
    let quads = width.saturating_sub(1) * height.saturating_sub(1);
    let mut indices = Vec::with_capacity(quads * 6);
    for row in 0..height.saturating_sub(1) {
        for col in 0..width.saturating_sub(1) {
            let a = (row * width + col) as u32;
            let b = a + 1;
            let d = a + width as u32;
            let e = d + 1;
            indices.extend_from_slice(&[a, b, e, a, e, d]);
        }
    }
    indices
}

/// Area-weighted average of incident face normals.
fn vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        acc[a] += face;
        acc[b] += face;
        acc[c] += face;
    }
    acc.into_iter().map(|n| n.normalize_or(Vec3::UP)).collect()
}
