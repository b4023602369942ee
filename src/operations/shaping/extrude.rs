use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::OutlinePath;
use crate::math::polygon_2d::{dedup_closed, ring_contains, signed_area_2d};
use crate::math::{Point2, Point3, Vector3, TOLERANCE};
use crate::solid::{Solid, SubSurface, SurfaceKind};
use crate::tessellation::{TessellateCap, TriangleMesh};

/// Extrudes an even-odd outline along -z/+z into a solid of the given depth.
///
/// The solid is centered on z = 0 and its sub-surfaces are always, in order,
/// `[FrontCap, BackCap, SideWalls]`.
pub struct Extrude<'a> {
    outline: &'a OutlinePath,
    depth: f64,
}

impl<'a> Extrude<'a> {
    /// Creates a new `Extrude` operation.
    #[must_use]
    pub fn new(outline: &'a OutlinePath, depth: f64) -> Self {
        Self { outline, depth }
    }

    /// Executes the extrusion.
    ///
    /// Rings that flatten to fewer than 3 points or to zero area are skipped;
    /// if none remain, all three sub-surfaces are empty.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the depth is not a positive
    /// finite number, or a tessellation error if the caps cannot be triangulated.
    pub fn execute(&self) -> Result<Solid> {
        if !self.depth.is_finite() || self.depth < TOLERANCE {
            return Err(OperationError::InvalidInput(format!(
                "extrusion depth must be positive, got {}",
                self.depth
            ))
            .into());
        }

        let rings = usable_rings(self.outline);
        let half = self.depth * 0.5;

        let (front, back) = if rings.is_empty() {
            (TriangleMesh::default(), TriangleMesh::default())
        } else {
            let cap = TessellateCap::new(&rings).execute()?;
            (cap.to_mesh(half, true), cap.to_mesh(-half, false))
        };

        let mut walls = TriangleMesh::default();
        for (i, ring) in rings.iter().enumerate() {
            let nesting = rings
                .iter()
                .enumerate()
                .filter(|&(j, other)| j != i && ring_contains(other, &ring[0]))
                .count();
            let oriented = orient_away_from_material(ring, nesting % 2 == 1);
            add_side_walls(&mut walls, &oriented, half);
        }

        debug!(
            rings = rings.len(),
            depth = self.depth,
            cap_triangles = front.triangle_count(),
            wall_triangles = walls.triangle_count(),
            "extruded outline"
        );

        Ok(Solid {
            surfaces: vec![
                SubSurface {
                    kind: SurfaceKind::FrontCap,
                    mesh: front,
                },
                SubSurface {
                    kind: SurfaceKind::BackCap,
                    mesh: back,
                },
                SubSurface {
                    kind: SurfaceKind::SideWalls,
                    mesh: walls,
                },
            ],
        })
    }
}

/// Flattened rings that can bound an area.
fn usable_rings(outline: &OutlinePath) -> Vec<Vec<Point2>> {
    outline
        .flattened()
        .into_iter()
        .map(|ring| dedup_closed(&ring))
        .filter(|ring| {
            let usable = ring.len() >= 3 && signed_area_2d(ring).abs() > TOLERANCE;
            if !usable {
                debug!(points = ring.len(), "skipping ring without area");
            }
            usable
        })
        .collect()
}

/// Orders a ring so that the right-hand normal of each edge points away
/// from the filled region: counter-clockwise for boundaries with material
/// inside, clockwise for holes.
fn orient_away_from_material(ring: &[Point2], is_hole: bool) -> Vec<Point2> {
    let ccw = signed_area_2d(ring) > 0.0;
    if ccw == is_hole {
        ring.iter().rev().copied().collect()
    } else {
        ring.to_vec()
    }
}

/// Adds one flat-shaded quad per ring edge between z = -half and z = +half.
fn add_side_walls(mesh: &mut TriangleMesh, ring: &[Point2], half: f64) {
    let n = ring.len();
    let mut distance = 0.0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let edge = b - a;
        let len = edge.norm();
        if len < TOLERANCE {
            continue;
        }
        let normal = Vector3::new(edge.y / len, -edge.x / len, 0.0);

        let back_a = mesh.push_vertex(Point3::new(a.x, a.y, -half), normal, Point2::new(distance, 0.0));
        let back_b = mesh.push_vertex(
            Point3::new(b.x, b.y, -half),
            normal,
            Point2::new(distance + len, 0.0),
        );
        let front_b = mesh.push_vertex(
            Point3::new(b.x, b.y, half),
            normal,
            Point2::new(distance + len, 1.0),
        );
        let front_a = mesh.push_vertex(Point3::new(a.x, a.y, half), normal, Point2::new(distance, 1.0));

        mesh.indices.push([back_a, back_b, front_b]);
        mesh.indices.push([back_a, front_b, front_a]);
        distance += len;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector2;
    use approx::assert_relative_eq;

    fn frame(outer: f64, inner_w: f64, inner_h: f64) -> OutlinePath {
        let mut path = OutlinePath::new();
        path.add_frame(Point2::origin(), Vector2::new(outer, outer));
        path.add_frame(Point2::origin(), Vector2::new(inner_w, inner_h));
        path
    }

    fn cap_area(mesh: &TriangleMesh) -> f64 {
        mesh.indices
            .iter()
            .map(|&[a, b, c]| {
                let (a, b, c) = (
                    mesh.vertices[a as usize],
                    mesh.vertices[b as usize],
                    mesh.vertices[c as usize],
                );
                (b - a).cross(&(c - a)).norm() * 0.5
            })
            .sum()
    }

    /// Checks that every triangle's winding agrees with its vertex normals.
    fn assert_winding_matches_normals(mesh: &TriangleMesh) {
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

    #[test]
    fn surfaces_are_ordered_front_back_sides() {
        let path = frame(3.0, 1.0, 0.5);
        let solid = Extrude::new(&path, 2.0).execute().unwrap();
        assert_eq!(
            solid.kinds(),
            vec![SurfaceKind::FrontCap, SurfaceKind::BackCap, SurfaceKind::SideWalls]
        );
    }

    #[test]
    fn caps_cover_frame_minus_hole() {
        let path = frame(3.0, 1.0, 0.5);
        let solid = Extrude::new(&path, 2.0).execute().unwrap();
        let front = &solid.surface(SurfaceKind::FrontCap).unwrap().mesh;
        let back = &solid.surface(SurfaceKind::BackCap).unwrap().mesh;
        assert_relative_eq!(cap_area(front), 34.0, epsilon = 1e-9);
        assert_relative_eq!(cap_area(back), 34.0, epsilon = 1e-9);
        assert!(front.vertices.iter().all(|v| (v.z - 1.0).abs() < 1e-12));
        assert!(back.vertices.iter().all(|v| (v.z + 1.0).abs() < 1e-12));
        assert_winding_matches_normals(front);
        assert_winding_matches_normals(back);
    }

    #[test]
    fn side_walls_run_along_both_rings() {
        let path = frame(3.0, 1.0, 0.5);
        let solid = Extrude::new(&path, 2.0).execute().unwrap();
        let walls = &solid.surface(SurfaceKind::SideWalls).unwrap().mesh;
        // 4 outer + 4 inner edges, 2 triangles each.
        assert_eq!(walls.triangle_count(), 16);
        assert_winding_matches_normals(walls);
    }

    #[test]
    fn wall_normals_point_away_from_material() {
        let path = frame(3.0, 1.0, 0.5);
        let solid = Extrude::new(&path, 2.0).execute().unwrap();
        let walls = &solid.surface(SurfaceKind::SideWalls).unwrap().mesh;
        for (v, n) in walls.vertices.iter().zip(&walls.normals) {
            let radial = Vector3::new(v.x, v.y, 0.0);
            let on_outer = v.x.abs() > 2.9 || v.y.abs() > 2.9;
            if on_outer {
                assert!(n.dot(&radial) > 0.0, "outer wall normal {n:?} at {v:?}");
            } else {
                assert!(n.dot(&radial) < 0.0, "hole wall normal {n:?} at {v:?}");
            }
        }
    }

    #[test]
    fn clockwise_input_is_reoriented() {
        let mut path = OutlinePath::new();
        path.add_ring(&[
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
        ]);
        let solid = Extrude::new(&path, 1.0).execute().unwrap();
        let walls = &solid.surface(SurfaceKind::SideWalls).unwrap().mesh;
        let center = Point3::new(0.5, 0.5, 0.0);
        for (v, n) in walls.vertices.iter().zip(&walls.normals) {
            assert!(n.dot(&(v - center)) > 0.0);
        }
    }

    #[test]
    fn circular_hole_is_flattened() {
        let mut path = OutlinePath::new();
        path.add_circle(Point2::origin(), 1.0);
        path.add_frame(Point2::origin(), Vector2::new(5.0, 5.0));
        path.set_flatness(0.005);
        let solid = Extrude::new(&path, 4.0).execute().unwrap();
        let walls = &solid.surface(SurfaceKind::SideWalls).unwrap().mesh;
        let circle_points = path.flattened()[0].len();
        assert_eq!(walls.triangle_count(), (circle_points + 4) * 2);
        let front = &solid.surface(SurfaceKind::FrontCap).unwrap().mesh;
        let hole = std::f64::consts::PI;
        assert!((cap_area(front) - (100.0 - hole)).abs() < 0.05);
    }

    #[test]
    fn empty_outline_yields_empty_surfaces() {
        let path = OutlinePath::new();
        let solid = Extrude::new(&path, 1.0).execute().unwrap();
        assert_eq!(solid.surfaces.len(), 3);
        assert_eq!(solid.triangle_count(), 0);
    }

    #[test]
    fn zero_area_ring_is_skipped() {
        let mut path = frame(3.0, 1.0, 0.5);
        path.add_ring(&[Point2::new(-2.0, 2.0), Point2::new(2.0, 2.0)]);
        let solid = Extrude::new(&path, 2.0).execute().unwrap();
        let walls = &solid.surface(SurfaceKind::SideWalls).unwrap().mesh;
        assert_eq!(walls.triangle_count(), 16);
    }

    #[test]
    fn non_positive_depth_fails() {
        let path = frame(3.0, 1.0, 0.5);
        assert!(Extrude::new(&path, 0.0).execute().is_err());
        assert!(Extrude::new(&path, -1.0).execute().is_err());
        assert!(Extrude::new(&path, f64::NAN).execute().is_err());
    }

    #[test]
    fn combined_mesh_has_all_triangles() {
        let path = frame(3.0, 1.0, 0.5);
        let solid = Extrude::new(&path, 2.0).execute().unwrap();
        let combined = solid.combined_mesh();
        assert_eq!(combined.triangle_count(), solid.triangle_count());
        assert_eq!(combined.vertices.len(), combined.normals.len());
    }
}
