use std::f64::consts::TAU;

use tracing::debug;

use crate::error::{OperationError, Result};
use crate::math::{Point2, Point3, Vector3, TOLERANCE};
use crate::solid::{Solid, SubSurface, SurfaceKind};
use crate::tessellation::TriangleMesh;

/// Builds an open-ended annular cylinder around the z axis.
///
/// Produces only side walls, in order `[OuterWall, InnerWall]`; both ends are
/// left open. The solid spans z = -depth/2 to z = +depth/2.
pub struct ExtrudeTube {
    inner_radius: f64,
    outer_radius: f64,
    segments: u32,
    depth: f64,
}

impl ExtrudeTube {
    /// Creates a new `ExtrudeTube` operation.
    #[must_use]
    pub fn new(inner_radius: f64, outer_radius: f64, segments: u32, depth: f64) -> Self {
        Self {
            inner_radius,
            outer_radius,
            segments,
            depth,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if a radius or the depth is not
    /// positive, the inner radius is not smaller than the outer one, or fewer
    /// than 3 segments are requested.
    pub fn execute(&self) -> Result<Solid> {
        if !(self.inner_radius.is_finite() && self.inner_radius > TOLERANCE) {
            return Err(
                OperationError::InvalidInput("tube inner radius must be positive".into()).into(),
            );
        }
        if !self.outer_radius.is_finite() || self.outer_radius <= self.inner_radius {
            return Err(OperationError::InvalidInput(
                "tube outer radius must exceed the inner radius".into(),
            )
            .into());
        }
        if !self.depth.is_finite() || self.depth < TOLERANCE {
            return Err(
                OperationError::InvalidInput("tube depth must be positive".into()).into(),
            );
        }
        if self.segments < 3 {
            return Err(OperationError::InvalidInput(format!(
                "tube needs at least 3 radial segments, got {}",
                self.segments
            ))
            .into());
        }

        let half = self.depth * 0.5;
        let outer = cylinder_wall(self.outer_radius, self.segments, half, true);
        let inner = cylinder_wall(self.inner_radius, self.segments, half, false);

        debug!(
            inner_radius = self.inner_radius,
            outer_radius = self.outer_radius,
            segments = self.segments,
            depth = self.depth,
            "extruded tube"
        );

        Ok(Solid {
            surfaces: vec![
                SubSurface {
                    kind: SurfaceKind::OuterWall,
                    mesh: outer,
                },
                SubSurface {
                    kind: SurfaceKind::InnerWall,
                    mesh: inner,
                },
            ],
        })
    }
}

/// Smooth-shaded cylinder wall with radial normals, pointing outward when
/// `outward` is set and toward the axis otherwise.
fn cylinder_wall(radius: f64, segments: u32, half: f64, outward: bool) -> TriangleMesh {
    let mut mesh = TriangleMesh::default();
    let sign = if outward { 1.0 } else { -1.0 };

    // Seam column is duplicated so u runs cleanly from 0 to 1.
    for k in 0..=segments {
        let u = f64::from(k) / f64::from(segments);
        let angle = u * TAU;
        let (sin, cos) = angle.sin_cos();
        let normal = Vector3::new(cos * sign, sin * sign, 0.0);
        mesh.push_vertex(
            Point3::new(radius * cos, radius * sin, -half),
            normal,
            Point2::new(u, 0.0),
        );
        mesh.push_vertex(
            Point3::new(radius * cos, radius * sin, half),
            normal,
            Point2::new(u, 1.0),
        );
    }

    for k in 0..segments {
        let back_a = 2 * k;
        let front_a = back_a + 1;
        let back_b = back_a + 2;
        let front_b = back_a + 3;
        if outward {
            mesh.indices.push([back_a, back_b, front_b]);
            mesh.indices.push([back_a, front_b, front_a]);
        } else {
            mesh.indices.push([back_a, front_b, back_b]);
            mesh.indices.push([back_a, front_a, front_b]);
        }
    }

    mesh
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn tube_has_outer_then_inner_wall() {
        let solid = ExtrudeTube::new(0.5, 5.0, 16, 2.0).execute().unwrap();
        assert_eq!(
            solid.kinds(),
            vec![SurfaceKind::OuterWall, SurfaceKind::InnerWall]
        );
        assert!(solid.surface(SurfaceKind::FrontCap).is_none());
    }

    #[test]
    fn walls_have_two_triangles_per_segment() {
        let solid = ExtrudeTube::new(0.5, 5.0, 128, 2.0).execute().unwrap();
        for surface in &solid.surfaces {
            assert_eq!(surface.mesh.triangle_count(), 256);
            assert_eq!(surface.mesh.vertices.len(), 2 * 129);
        }
    }

    #[test]
    fn radii_and_height_are_respected() {
        let solid = ExtrudeTube::new(0.5, 5.0, 8, 3.0).execute().unwrap();
        let outer = &solid.surface(SurfaceKind::OuterWall).unwrap().mesh;
        let inner = &solid.surface(SurfaceKind::InnerWall).unwrap().mesh;
        for v in &outer.vertices {
            assert!((v.x.hypot(v.y) - 5.0).abs() < 1e-9);
            assert!((v.z.abs() - 1.5).abs() < 1e-12);
        }
        for v in &inner.vertices {
            assert!((v.x.hypot(v.y) - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn normals_face_away_from_material() {
        let solid = ExtrudeTube::new(1.0, 4.0, 16, 2.0).execute().unwrap();
        let outer = &solid.surface(SurfaceKind::OuterWall).unwrap().mesh;
        let inner = &solid.surface(SurfaceKind::InnerWall).unwrap().mesh;
        for (v, n) in outer.vertices.iter().zip(&outer.normals) {
            assert!(n.dot(&Vector3::new(v.x, v.y, 0.0)) > 0.0);
        }
        for (v, n) in inner.vertices.iter().zip(&inner.normals) {
            assert!(n.dot(&Vector3::new(v.x, v.y, 0.0)) < 0.0);
        }
        for mesh in [outer, inner] {
            for &[a, b, c] in &mesh.indices {
                let (pa, pb, pc) = (
                    mesh.vertices[a as usize],
                    mesh.vertices[b as usize],
                    mesh.vertices[c as usize],
                );
                let face_normal = (pb - pa).cross(&(pc - pa));
                assert!(face_normal.dot(&mesh.normals[a as usize]) > 0.0);
            }
        }
    }

    #[test]
    fn invalid_dimensions_fail() {
        assert!(ExtrudeTube::new(0.0, 5.0, 16, 2.0).execute().is_err());
        assert!(ExtrudeTube::new(5.0, 5.0, 16, 2.0).execute().is_err());
        assert!(ExtrudeTube::new(0.5, 5.0, 16, 0.0).execute().is_err());
        assert!(ExtrudeTube::new(0.5, 5.0, 2, 2.0).execute().is_err());
    }
}
