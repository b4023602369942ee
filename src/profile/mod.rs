mod build;
mod params;

pub use build::{segment_count, BuildProfile, MAX_SUBDIVISIONS, MIN_SUBDIVISIONS};
pub use params::{
    ArcParams, FrameParams, PathParams, PolygonParams, PortalSpec, TubeParams,
    DEFAULT_ARC_FLATNESS, DEFAULT_ARC_OUTER_MULT, DEFAULT_FRAME_OUTER_MULT,
    DEFAULT_PATH_FLATNESS, DEFAULT_PATH_OUTER_MULT, DEFAULT_POLYGON_OUTER_MULT,
    DEFAULT_SUBDIVISIONS, DEFAULT_TUBE_OUTER_MULT,
};

pub(crate) use build::fill_path_outline;

use crate::geometry::OutlinePath;

/// Divisor applied to the requested opening size.
///
/// Halving exactly makes the hole boundary coincide with a tracked marker's
/// edge, which shows up as flicker in some consumers; 1.975 shrinks it slightly.
pub const INNER_INSET_DIVISOR: f64 = 1.975;

/// Which family of outline a portal was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    Rectangle,
    Polygon,
    Arc,
    Tube,
    Path,
}

impl ProfileKind {
    /// Returns `true` for kinds extruded from a planar outline.
    #[must_use]
    pub fn is_planar(self) -> bool {
        !matches!(self, Self::Tube)
    }
}

/// Radii and resolution of an annular tube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeProfile {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub segments: u32,
}

/// Shape produced by [`BuildProfile`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileShape {
    Planar(OutlinePath),
    Tube(TubeProfile),
}

/// A resolved profile: shape plus the parameters frozen for the portal's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub kind: ProfileKind,
    pub shape: ProfileShape,
    pub depth: f64,
    /// Mask multiplier, never below 1.
    pub outer_scale: f64,
}
