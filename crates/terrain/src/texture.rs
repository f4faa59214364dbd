use crate::error::{TerrainError, cell_count};
use crate::grid::SatelliteSample;

pub const BYTES_PER_TEXEL: usize = 4;
const OPAQUE: u8 = 255;

/// Packed RGBA8 texels, row-major, alpha always opaque.
///
/// Immutable once built; the only way to get one is [`composite_texture`] or
/// [`TextureBuffer::solid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl TextureBuffer {
    /// Single-color texture, e.g. for a terrain without imagery.
    pub fn solid(width: usize, height: usize, rgb: [u8; 3]) -> Result<Self, TerrainError> {
        let n = cell_count(width, height)?;
        let mut data = Vec::with_capacity(n * BYTES_PER_TEXEL);
        for _ in 0..n {
            data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], OPAQUE]);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn bytes_per_row(&self) -> usize {
        self.width * BYTES_PER_TEXEL
    }

    pub fn texel(&self, col: usize, row: usize) -> Option<[u8; 4]> {
        if col >= self.width || row >= self.height {
            return None;
        }
        let start = (row * self.width + col) * BYTES_PER_TEXEL;
        let px = self.data.get(start..start + BYTES_PER_TEXEL)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Pack RGB satellite pixels into an RGBA texture.
///
/// Pixel `i` lands at bytes `4*i..4*i+2`, byte `4*i+3` is 255.
pub fn composite_texture(sample: &SatelliteSample) -> Result<TextureBuffer, TerrainError> {
    let expected = cell_count(sample.width, sample.height)?;
    if sample.pixels.len() != expected {
        return Err(TerrainError::ShapeMismatch {
            what: "satellite pixel count",
            expected,
            actual: sample.pixels.len(),
        });
    }

    let mut data = vec![0u8; expected * BYTES_PER_TEXEL];
    for (texel, [r, g, b]) in data
        .chunks_exact_mut(BYTES_PER_TEXEL)
        .zip(sample.pixels.iter().copied())
    {
        texel.copy_from_slice(&[r, g, b, OPAQUE]);
    }

    Ok(TextureBuffer {
        width: sample.width,
        height: sample.height,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::{BYTES_PER_TEXEL, TextureBuffer, composite_texture};
    use crate::error::TerrainError;
    use crate::grid::SatelliteSample;
    use pretty_assertions::assert_eq;

    #[test]
    fn copies_channels_and_sets_opaque_alpha() {
        let sample = SatelliteSample {
            width: 2,
            height: 1,
            pixels: vec![[10, 20, 30], [200, 100, 0]],
        };
        let tex = composite_texture(&sample).expect("texture");
        assert_eq!(tex.as_bytes(), &[10, 20, 30, 255, 200, 100, 0, 255]);
        assert_eq!(tex.texel(1, 0), Some([200, 100, 0, 255]));
        assert_eq!(tex.texel(2, 0), None);
    }

    #[test]
    fn buffer_length_and_alpha_hold_for_larger_samples() {
        let (w, h) = (7, 5);
        let pixels = (0..w * h)
            .map(|i| [i as u8, (i * 3) as u8, (255 - i) as u8])
            .collect();
        let sample = SatelliteSample::new(w, h, pixels).expect("sample");
        let tex = composite_texture(&sample).expect("texture");

        assert_eq!(tex.as_bytes().len(), w * h * 4);
        assert_eq!(tex.bytes_per_row(), w * 4);
        assert!(
            tex.as_bytes()
                .chunks_exact(BYTES_PER_TEXEL)
                .all(|px| px[3] == 255)
        );
        assert_eq!(tex.texel(3, 2), Some([17, 51, 238, 255]));
    }

    #[test]
    fn rejects_pixel_count_mismatch() {
        let sample = SatelliteSample {
            width: 3,
            height: 3,
            pixels: vec![[0, 0, 0]; 8],
        };
        assert_eq!(
            composite_texture(&sample),
            Err(TerrainError::ShapeMismatch {
                what: "satellite pixel count",
                expected: 9,
                actual: 8,
            })
        );
    }

    #[test]
    fn solid_fills_every_texel() {
        let tex = TextureBuffer::solid(3, 2, [0xaa, 0xaa, 0xaa]).expect("texture");
        assert_eq!(tex.as_bytes().len(), 24);
        assert!(
            tex.as_bytes()
                .chunks_exact(4)
                .all(|px| px == [0xaa, 0xaa, 0xaa, 255])
        );
    }
}
