use kiss3d::nalgebra::{Point2, Point3, Vector3};
use kiss3d::resource::Mesh;
use std::f32::consts::PI;

/// Procedural torus around the local Z axis, ring in the XY plane.
pub struct TorusGeometry {
    pub coords: Vec<Point3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub uvs: Vec<Point2<f32>>,
    pub faces: Vec<Point3<u16>>,
}

impl TorusGeometry {
    /// `radial` segments go around the tube, `tubular` segments around the
    /// ring. Vertices are duplicated along both seams so UVs wrap cleanly.
    pub fn new(radius: f32, tube: f32, radial: u16, tubular: u16) -> Self {
        let mut coords = Vec::new();
        let mut normals = Vec::new();
        let mut uvs = Vec::new();

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * 2.0 * PI;
            for i in 0..=tubular {
                let u = i as f32 / tubular as f32 * 2.0 * PI;

                let vertex = Point3::new(
                    (radius + tube * v.cos()) * u.cos(),
                    (radius + tube * v.cos()) * u.sin(),
                    tube * v.sin(),
                );
                let center = Point3::new(radius * u.cos(), radius * u.sin(), 0.0);

                coords.push(vertex);
                normals.push((vertex - center).normalize());
                uvs.push(Point2::new(i as f32 / tubular as f32, j as f32 / radial as f32));
            }
        }

        let row = tubular + 1;
        let mut faces = Vec::new();
        for j in 1..=radial {
            for i in 1..=tubular {
                let a = row * j + i - 1;
                let b = row * (j - 1) + i - 1;
                let c = row * (j - 1) + i;
                let d = row * j + i;

                faces.push(Point3::new(a, b, d));
                faces.push(Point3::new(b, c, d));
            }
        }

        TorusGeometry { coords, normals, uvs, faces }
    }

    pub fn into_mesh(self) -> Mesh {
        Mesh::new(self.coords, self.faces, Some(self.normals), Some(self.uvs), false)
    }
}

/// Half extents of the local bounding box of a torus.
pub fn half_extents(radius: f32, tube: f32) -> Vector3<f32> {
    Vector3::new(radius + tube, radius + tube, tube)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_face_counts() {
        let g = TorusGeometry::new(1.0, 0.4, 12, 48);
        assert_eq!(g.coords.len(), 13 * 49);
        assert_eq!(g.normals.len(), g.coords.len());
        assert_eq!(g.uvs.len(), g.coords.len());
        assert_eq!(g.faces.len(), 2 * 12 * 48);

        let max = g.coords.len() as u16;
        assert!(g.faces.iter().all(|f| f.x < max && f.y < max && f.z < max));
    }

    #[test]
    fn vertices_fit_in_half_extents() {
        let g = TorusGeometry::new(1.0, 0.4, 12, 48);
        let h = half_extents(1.0, 0.4);
        let eps = 1e-5;
        for p in &g.coords {
            assert!(p.x.abs() <= h.x + eps);
            assert!(p.y.abs() <= h.y + eps);
            assert!(p.z.abs() <= h.z + eps);
        }
    }

    #[test]
    fn normals_are_unit_length() {
        let g = TorusGeometry::new(1.0, 0.4, 8, 16);
        assert!(g.normals.iter().all(|n| (n.norm() - 1.0).abs() < 1e-5));
    }
}
