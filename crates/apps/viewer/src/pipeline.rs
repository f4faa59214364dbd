use streaming::TerrainPayload;
use terrain::{
    RecenterOffset, TerrainError, TerrainMesh, TextureBuffer, build_mesh, composite_texture,
    recenter_offset,
};

/// Everything the compositor needs to show one terrain.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTerrain {
    pub mesh: TerrainMesh,
    pub texture: Option<TextureBuffer>,
    pub offset: RecenterOffset,
}

/// Texture, mesh and recentering offset for a payload.
///
/// Pure: a failure here leaves nothing half-built for the scene to see.
pub fn prepare_terrain(payload: &TerrainPayload) -> Result<PreparedTerrain, TerrainError> {
    let grid = &payload.grid;
    let texture = match &payload.satellite {
        Some(sample) => {
            sample.ensure_aligned(grid)?;
            Some(composite_texture(sample)?)
        }
        None => None,
    };
    let mesh = build_mesh(grid, texture.as_ref())?;
    let offset = recenter_offset(grid)?;
    Ok(PreparedTerrain {
        mesh,
        texture,
        offset,
    })
}
