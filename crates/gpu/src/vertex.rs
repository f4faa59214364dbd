use std::f64::consts::PI;

use bytemuck::{Pod, Zeroable};
use foundation::math::Vec3;
use scene::components::Shape3D;
use terrain::TerrainMesh;

/// Interleaved vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    fn new(position: Vec3, normal: Vec3, uv: [f32; 2]) -> Self {
        Self {
            position: position.to_f32(),
            normal: normal.to_f32(),
            uv,
        }
    }
}

/// CPU-side vertex and index buffers for one object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GpuMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

const SPHERE_SEGMENTS: u32 = 16;
const SPHERE_RINGS: u32 = 12;

impl GpuMesh {
    pub fn from_terrain(mesh: &TerrainMesh) -> Self {
        let vertices = mesh
            .positions()
            .iter()
            .zip(mesh.normals())
            .zip(mesh.uvs())
            .map(|((p, n), uv)| MeshVertex::new(*p, *n, *uv))
            .collect();
        Self {
            vertices,
            indices: mesh.indices().to_vec(),
        }
    }

    pub fn from_shape(shape: Shape3D) -> Self {
        let mut mesh = GpuMesh::default();
        match shape {
            Shape3D::Plane { width, depth } => {
                mesh.push_quad(
                    Vec3::new(-width * 0.5, -depth * 0.5, 0.0),
                    Vec3::new(width, 0.0, 0.0),
                    Vec3::new(0.0, depth, 0.0),
                );
            }
            Shape3D::Cube { size } => mesh.push_box(Vec3::ZERO, Vec3::new(size, size, size)),
            Shape3D::Sphere { radius } => mesh.push_sphere(Vec3::ZERO, radius),
            Shape3D::Pin { radius, height } => {
                let stem = radius * 0.25;
                mesh.push_box(
                    Vec3::new(0.0, 0.0, height * 0.5),
                    Vec3::new(stem, stem, height.abs()),
                );
                mesh.push_sphere(Vec3::new(0.0, 0.0, height), radius);
            }
        }
        mesh
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Quad spanned by `u` and `v` from `origin`, facing `u x v`.
    fn push_quad(&mut self, origin: Vec3, u: Vec3, v: Vec3) {
        let normal = u.cross(v).normalize_or(Vec3::UP);
        let base = self.vertices.len() as u32;
        for (offset, uv) in [
            (Vec3::ZERO, [0.0, 0.0]),
            (u, [1.0, 0.0]),
            (u + v, [1.0, 1.0]),
            (v, [0.0, 1.0]),
        ] {
            self.vertices
                .push(MeshVertex::new(origin + offset, normal, uv));
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    fn push_box(&mut self, center: Vec3, size: Vec3) {
        let h = size.scale(0.5);
        let x = Vec3::new(size.x, 0.0, 0.0);
        let y = Vec3::new(0.0, size.y, 0.0);
        let z = Vec3::new(0.0, 0.0, size.z);
        let min = center - h;
        let max = center + h;
        // Each face wound counter-clockwise seen from outside.
        self.push_quad(min, y, x);
        self.push_quad(max, -x, -y);
        self.push_quad(min, x, z);
        self.push_quad(max, -z, -x);
        self.push_quad(min, z, y);
        self.push_quad(max, -y, -z);
    }

    fn push_sphere(&mut self, center: Vec3, radius: f64) {
        let base = self.vertices.len() as u32;
        let cols = SPHERE_SEGMENTS + 1;
        for ring in 0..=SPHERE_RINGS {
            let v = f64::from(ring) / f64::from(SPHERE_RINGS);
            let (sin_phi, cos_phi) = (v * PI).sin_cos();
            for seg in 0..=SPHERE_SEGMENTS {
                let u = f64::from(seg) / f64::from(SPHERE_SEGMENTS);
                let (sin_theta, cos_theta) = (u * 2.0 * PI).sin_cos();
                let normal = Vec3::new(sin_phi * cos_theta, sin_phi * sin_theta, cos_phi);
                self.vertices.push(MeshVertex::new(
                    center + normal.scale(radius),
                    normal,
                    [u as f32, v as f32],
                ));
            }
        }
        for ring in 0..SPHERE_RINGS {
            for seg in 0..SPHERE_SEGMENTS {
                let a = base + ring * cols + seg;
                let b = a + 1;
                let d = a + cols;
                let e = d + 1;
                self.indices.extend_from_slice(&[a, d, e, a, e, b]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GpuMesh, MeshVertex};
    use foundation::math::Vec3;
    use scene::components::Shape3D;
    use terrain::{ElevationGrid, build_mesh};

    fn face_normal(mesh: &GpuMesh, tri: usize) -> Vec3 {
        let p = |i: usize| {
            let [x, y, z] = mesh.vertices[mesh.indices[tri * 3 + i] as usize].position;
            Vec3::new(f64::from(x), f64::from(y), f64::from(z))
        };
        (p(1) - p(0)).cross(p(2) - p(0))
    }

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), 32);
    }

    #[test]
    fn terrain_buffers_follow_mesh_order() {
        let grid = ElevationGrid::new(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 0, 0)
            .expect("grid");
        let mesh = build_mesh(&grid, None).expect("mesh");
        let gpu = GpuMesh::from_terrain(&mesh);

        assert_eq!(gpu.vertices.len(), 6);
        assert_eq!(gpu.vertices[4].position, [0.0, 0.0, 5.0]);
        assert_eq!(gpu.indices, mesh.indices());
        assert_eq!(gpu.vertex_bytes().len(), 6 * 32);
        assert_eq!(gpu.index_bytes().len(), gpu.indices.len() * 4);
    }

    #[test]
    fn plane_faces_up() {
        let gpu = GpuMesh::from_shape(Shape3D::Plane {
            width: 10.0,
            depth: 10.0,
        });
        assert_eq!(gpu.vertices.len(), 4);
        assert_eq!(gpu.triangle_count(), 2);
        assert!(gpu.vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
        assert!(face_normal(&gpu, 0).z > 0.0);
        assert_eq!(gpu.vertices[0].position, [-5.0, -5.0, 0.0]);
    }

    #[test]
    fn cube_faces_point_outward() {
        let gpu = GpuMesh::from_shape(Shape3D::Cube { size: 1.0 });
        assert_eq!(gpu.vertices.len(), 24);
        assert_eq!(gpu.triangle_count(), 12);
        for tri in 0..gpu.triangle_count() {
            let n = face_normal(&gpu, tri);
            let [x, y, z] = gpu.vertices[gpu.indices[tri * 3] as usize].position;
            let to_face = Vec3::new(f64::from(x), f64::from(y), f64::from(z));
            // Winding normal agrees with the stored normal.
            let [nx, ny, nz] = gpu.vertices[gpu.indices[tri * 3] as usize].normal;
            let stored = Vec3::new(f64::from(nx), f64::from(ny), f64::from(nz));
            assert!(n.dot(stored) > 0.0, "triangle {tri}");
            assert!(stored.dot(to_face) > 0.0, "triangle {tri}");
        }
    }

    #[test]
    fn pin_reaches_its_height() {
        let gpu = GpuMesh::from_shape(Shape3D::Pin {
            radius: 0.2,
            height: 5.0,
        });
        let top = gpu
            .vertices
            .iter()
            .map(|v| v.position[2])
            .fold(f32::MIN, f32::max);
        assert!((top - 5.2).abs() < 1e-5);
        assert!(gpu.indices.iter().all(|&i| (i as usize) < gpu.vertices.len()));
    }
}
