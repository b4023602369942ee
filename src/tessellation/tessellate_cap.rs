use std::collections::VecDeque;

use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{ConstrainedDelaunayTriangulation, Point2 as SpadePoint2, Triangulation};
use tracing::warn;

use crate::error::{Result, TessellationError};
use crate::math::{Point2, Point3, Vector3};

use super::TriangleMesh;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Triangulates the even-odd filled region bounded by a set of closed rings.
pub struct TessellateCap<'a> {
    rings: &'a [Vec<Point2>],
}

/// Counter-clockwise triangles of a planar cap.
#[derive(Debug, Clone, Default)]
pub struct CapTriangles {
    pub points: Vec<Point2>,
    pub triangles: Vec<[u32; 3]>,
}

impl<'a> TessellateCap<'a> {
    /// Creates a new `TessellateCap` operation. Each ring must have at least 3 points.
    #[must_use]
    pub fn new(rings: &'a [Vec<Point2>]) -> Self {
        Self { rings }
    }

    /// Executes the triangulation.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::Failed`] if a ring has fewer than 3 points
    /// or a point cannot be inserted (e.g. NaN coordinates).
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Result<CapTriangles> {
        let cdt = self.constrained_triangulation()?;
        let filled = even_odd_fill(&cdt);

        let mut cap = CapTriangles::default();
        let mut remap: Vec<Option<u32>> = vec![None; cdt.num_vertices()];

        for face in cdt.inner_faces().filter(|f| filled[f.fix().index()]) {
            let triangle = face.vertices().map(|vertex| {
                *remap[vertex.fix().index()].get_or_insert_with(|| {
                    let pos = vertex.position();
                    cap.points.push(Point2::new(pos.x, pos.y));
                    (cap.points.len() - 1) as u32
                })
            });
            cap.triangles.push(triangle);
        }

        Ok(cap)
    }

    /// Inserts every ring as a closed loop of constraint edges.
    ///
    /// An edge that would cross an earlier constraint is left out; rings are
    /// expected not to intersect.
    fn constrained_triangulation(&self) -> Result<Cdt> {
        let mut cdt = Cdt::new();
        for (ring_index, ring) in self.rings.iter().enumerate() {
            if ring.len() < 3 {
                return Err(TessellationError::Failed(format!(
                    "ring {ring_index} has {} points, at least 3 are needed",
                    ring.len()
                ))
                .into());
            }

            let mut corners = Vec::with_capacity(ring.len());
            for p in ring {
                let handle = cdt.insert(SpadePoint2::new(p.x, p.y)).map_err(|e| {
                    TessellationError::Failed(format!("ring {ring_index}: {e}"))
                })?;
                corners.push(handle);
            }

            for (edge, &from) in corners.iter().enumerate() {
                let to = corners[(edge + 1) % corners.len()];
                if from == to {
                    continue;
                }
                if cdt.can_add_constraint(from, to) {
                    cdt.add_constraint(from, to);
                } else {
                    warn!(ring = ring_index, edge, "skipping ring edge that crosses another boundary");
                }
            }
        }
        Ok(cdt)
    }
}

impl CapTriangles {
    /// Lifts the cap into a planar mesh at height `z`.
    ///
    /// `facing_up` selects a +z normal with counter-clockwise winding;
    /// otherwise the normal is -z and every triangle is reversed.
    #[must_use]
    pub fn to_mesh(&self, z: f64, facing_up: bool) -> TriangleMesh {
        let normal = if facing_up { Vector3::z() } else { -Vector3::z() };
        let mut mesh = TriangleMesh::default();
        for p in &self.points {
            mesh.push_vertex(Point3::new(p.x, p.y, z), normal, *p);
        }
        mesh.indices = self
            .triangles
            .iter()
            .map(|&[a, b, c]| if facing_up { [a, b, c] } else { [a, c, b] })
            .collect();
        mesh
    }
}

/// Fill state of every face, indexed by face index.
///
/// Faces touching the unbounded region start empty unless the hull edge
/// between them is a constraint; crossing a constraint edge toggles the state.
fn even_odd_fill(cdt: &Cdt) -> Vec<bool> {
    let mut state: Vec<Option<bool>> = vec![None; cdt.num_all_faces()];

    let mut pending: VecDeque<(FixedFaceHandle<InnerTag>, bool)> = cdt
        .directed_edges()
        .filter(|edge| edge.face().is_outer())
        .filter_map(|edge| {
            let inside = edge.rev().face().as_inner()?;
            Some((inside.fix(), cdt.is_constraint_edge(edge.as_undirected().fix())))
        })
        .collect();

    while let Some((face, filled)) = pending.pop_front() {
        if state[face.index()].is_some() {
            continue;
        }
        state[face.index()] = Some(filled);

        for edge in cdt.face(face).adjacent_edges() {
            let Some(next) = edge.rev().face().as_inner() else {
                continue;
            };
            if state[next.fix().index()].is_none() {
                let toggles = cdt.is_constraint_edge(edge.as_undirected().fix());
                pending.push_back((next.fix(), filled != toggles));
            }
        }
    }

    state.into_iter().map(|s| s == Some(true)).collect()
}
