use crate::tessellation::TriangleMesh;

/// Role of a sub-surface within an extruded solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Planar cap facing the viewer (+z).
    FrontCap,
    /// Planar cap facing away from the viewer (-z).
    BackCap,
    /// Walls along every ring of a planar outline.
    SideWalls,
    /// Outer cylindrical wall of a tube.
    OuterWall,
    /// Inner cylindrical wall of a tube, facing the axis.
    InnerWall,
}

/// One separately paintable part of a solid.
#[derive(Debug, Clone, PartialEq)]
pub struct SubSurface {
    pub kind: SurfaceKind,
    pub mesh: TriangleMesh,
}

/// Triangulated solid made of ordered sub-surfaces.
///
/// The order of `surfaces` is stable per construction kind and is what paint
/// intents are matched against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solid {
    pub surfaces: Vec<SubSurface>,
}

impl Solid {
    /// Returns the sub-surface of the given kind, if present.
    #[must_use]
    pub fn surface(&self, kind: SurfaceKind) -> Option<&SubSurface> {
        self.surfaces.iter().find(|s| s.kind == kind)
    }

    /// Sub-surface kinds in order.
    #[must_use]
    pub fn kinds(&self) -> Vec<SurfaceKind> {
        self.surfaces.iter().map(|s| s.kind).collect()
    }

    /// All sub-surfaces merged into one mesh.
    #[must_use]
    pub fn combined_mesh(&self) -> TriangleMesh {
        let mut combined = TriangleMesh::default();
        for surface in &self.surfaces {
            combined.merge(&surface.mesh);
        }
        combined
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.surfaces.iter().map(|s| s.mesh.triangle_count()).sum()
    }
}
