mod host;

pub use host::{PortalHost, PortalMount};

use tracing::debug;

use crate::error::{PortalError, Result};
use crate::geometry::OutlinePath;
use crate::mask::{MaskAssembly, MaskedSolid, PaintIntent};
use crate::math::{Isometry3, Point2};
use crate::operations::{Extrude, ExtrudeTube};
use crate::profile::{
    fill_path_outline, ArcParams, BuildProfile, FrameParams, PathParams, PolygonParams,
    PortalSpec, ProfileKind, ProfileShape, TubeParams, TubeProfile,
};

/// Offset pulling the solid's plane slightly toward the viewer so it does not
/// z-fight with content seen through the hole.
pub const Z_EPSILON: f64 = 0.0003;

/// A masking solid with an opening through which content stays visible.
///
/// Depth and outer scale are fixed at construction. Only the outline (and
/// the solid derived from it) can change afterwards, through
/// [`update_geometry`](Self::update_geometry).
#[derive(Debug, Clone, PartialEq)]
pub struct PortalGeometry {
    kind: ProfileKind,
    depth: f64,
    outer_scale: f64,
    shape: ProfileShape,
    solid: MaskedSolid,
    z_offset: f64,
}

impl PortalGeometry {
    /// Builds a portal from a construction request.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are out of range or the outline
    /// cannot be extruded.
    pub fn new(spec: &PortalSpec) -> Result<Self> {
        let profile = BuildProfile::new(spec).execute()?;
        let solid = match &profile.shape {
            ProfileShape::Planar(outline) => Extrude::new(outline, profile.depth).execute()?,
            ProfileShape::Tube(tube) => ExtrudeTube::new(
                tube.inner_radius,
                tube.outer_radius,
                tube.segments,
                profile.depth,
            )
            .execute()?,
        };
        let solid = MaskAssembly::assemble(solid, profile.kind)?;
        let z_offset = z_offset_for(profile.depth);

        debug!(
            kind = ?profile.kind,
            depth = profile.depth,
            outer_scale = profile.outer_scale,
            z_offset,
            triangles = solid.solid().triangle_count(),
            "constructed portal"
        );

        Ok(Self {
            kind: profile.kind,
            depth: profile.depth,
            outer_scale: profile.outer_scale,
            shape: profile.shape,
            solid,
            z_offset,
        })
    }

    /// Rectangular frame portal.
    ///
    /// # Errors
    ///
    /// See [`PortalGeometry::new`].
    pub fn frame(params: FrameParams) -> Result<Self> {
        Self::new(&params.into())
    }

    /// Regular-polygon circle portal.
    ///
    /// # Errors
    ///
    /// See [`PortalGeometry::new`].
    pub fn polygon(params: PolygonParams) -> Result<Self> {
        Self::new(&params.into())
    }

    /// Smooth circle portal.
    ///
    /// # Errors
    ///
    /// See [`PortalGeometry::new`].
    pub fn arc(params: ArcParams) -> Result<Self> {
        Self::new(&params.into())
    }

    /// Open tube portal.
    ///
    /// # Errors
    ///
    /// See [`PortalGeometry::new`].
    pub fn tube(params: TubeParams) -> Result<Self> {
        Self::new(&params.into())
    }

    /// Portal cut along an arbitrary closed polyline.
    ///
    /// A path with fewer than 2 distinct points adds no opening ring; with an
    /// explicit depth the portal is still built, with empty surfaces.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`](crate::error::GeometryError::Degenerate)
    /// if the path has no extent and no depth was given, since the default
    /// depth is derived from the path's bounding box. Otherwise see
    /// [`PortalGeometry::new`].
    pub fn path(params: PathParams) -> Result<Self> {
        Self::new(&params.into())
    }

    /// Restoring a portal from encoded state is not supported.
    ///
    /// # Errors
    ///
    /// Always returns [`PortalError::UnsupportedOperation`].
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Err(PortalError::UnsupportedOperation(format!(
            "portals cannot be decoded from stored state ({} bytes given)",
            bytes.len()
        )))
    }

    /// Replaces the opening with `path`, keeping depth, outer scale, paint
    /// intents and z offset.
    ///
    /// The new mask frame is the path's bounding box scaled by the stored
    /// outer scale. An empty or degenerate path leaves an empty solid.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::UnsupportedOperation`] on a tube portal, or an
    /// error from extrusion. On error the portal is left unchanged.
    pub fn update_geometry(&mut self, path: &[Point2]) -> Result<()> {
        let ProfileShape::Planar(current) = &self.shape else {
            return Err(PortalError::UnsupportedOperation(format!(
                "{:?} portals have no planar outline to reshape",
                self.kind
            )));
        };

        let mut outline = current.clone();
        outline.clear();
        fill_path_outline(&mut outline, path, self.outer_scale);

        let solid = Extrude::new(&outline, self.depth).execute()?;
        let solid = MaskAssembly::assemble(solid, self.kind)?;

        debug!(
            kind = ?self.kind,
            points = path.len(),
            rings = outline.len(),
            triangles = solid.solid().triangle_count(),
            "reshaped portal"
        );

        self.shape = ProfileShape::Planar(outline);
        self.solid = solid;
        Ok(())
    }

    /// Hands the current solid and its placement to `host`.
    pub fn attach_to<H: PortalHost + ?Sized>(&self, host: &mut H) {
        host.mount(PortalMount {
            solid: self.solid.clone(),
            placement: self.placement(),
        });
    }

    #[must_use]
    pub fn kind(&self) -> ProfileKind {
        self.kind
    }

    #[must_use]
    pub fn depth(&self) -> f64 {
        self.depth
    }

    #[must_use]
    pub fn outer_scale(&self) -> f64 {
        self.outer_scale
    }

    /// The planar outline, or `None` for tubes.
    #[must_use]
    pub fn outline(&self) -> Option<&OutlinePath> {
        match &self.shape {
            ProfileShape::Planar(outline) => Some(outline),
            ProfileShape::Tube(_) => None,
        }
    }

    /// Resolved tube radii and segment count, or `None` for planar portals.
    #[must_use]
    pub fn tube_profile(&self) -> Option<&TubeProfile> {
        match &self.shape {
            ProfileShape::Planar(_) => None,
            ProfileShape::Tube(tube) => Some(tube),
        }
    }

    #[must_use]
    pub fn solid(&self) -> &MaskedSolid {
        &self.solid
    }

    #[must_use]
    pub fn intents(&self) -> &'static [PaintIntent] {
        self.solid.intents()
    }

    /// Always `-depth / 2 + Z_EPSILON`.
    #[must_use]
    pub fn z_offset(&self) -> f64 {
        self.z_offset
    }

    /// Translation along z by [`z_offset`](Self::z_offset).
    #[must_use]
    pub fn placement(&self) -> Isometry3 {
        Isometry3::translation(0.0, 0.0, self.z_offset)
    }

    /// Returns `true` if `point` lies in the masking material's footprint,
    /// i.e. outside the opening but inside the mask frame.
    #[must_use]
    pub fn masks(&self, point: &Point2) -> bool {
        match &self.shape {
            ProfileShape::Planar(outline) => outline.contains(point),
            ProfileShape::Tube(tube) => {
                let r = point.coords.norm();
                r > tube.inner_radius && r < tube.outer_radius
            }
        }
    }
}

fn z_offset_for(depth: f64) -> f64 {
    -depth / 2.0 + Z_EPSILON
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::solid::SurfaceKind;
    use approx::assert_relative_eq;

    #[test]
    fn z_offset_tracks_depth() {
        let portal = PortalGeometry::frame(FrameParams::new(2.0, 1.0)).unwrap();
        assert_relative_eq!(portal.depth(), 4.0);
        assert_relative_eq!(portal.z_offset(), -1.9997, epsilon = 1e-12);
        assert_relative_eq!(portal.placement().translation.vector.z, -1.9997, epsilon = 1e-12);
    }

    #[test]
    fn frame_masks_around_hole() {
        let portal = PortalGeometry::frame(FrameParams::new(2.0, 1.0)).unwrap();
        assert!(!portal.masks(&Point2::origin()));
        assert!(portal.masks(&Point2::new(3.0, 0.0)));
        assert!(!portal.masks(&Point2::new(7.0, 0.0)));
    }

    #[test]
    fn tube_has_no_outline() {
        let portal = PortalGeometry::tube(TubeParams::new(1.0)).unwrap();
        assert!(portal.outline().is_none());
        assert_eq!(
            portal.solid().solid().kinds(),
            vec![SurfaceKind::OuterWall, SurfaceKind::InnerWall]
        );
        assert!(!portal.masks(&Point2::origin()));
        assert!(portal.masks(&Point2::new(2.0, 0.0)));
    }

    #[test]
    fn tube_masks_between_stored_radii() {
        let portal = PortalGeometry::tube(TubeParams::new(2.0).with_outer_mult(3.0)).unwrap();
        let tube = portal.tube_profile().unwrap();
        assert_relative_eq!(tube.inner_radius, 2.0 / 1.975);
        assert_relative_eq!(tube.outer_radius, 6.0);
        assert!(!portal.masks(&Point2::new(0.0, 1.0)));
        assert!(portal.masks(&Point2::new(0.0, 1.1)));
        assert!(portal.masks(&Point2::new(-5.9, 0.0)));
        assert!(!portal.masks(&Point2::new(4.5, 4.5)));
        assert!(PortalGeometry::arc(ArcParams::new(1.0)).unwrap().tube_profile().is_none());
    }

    #[test]
    fn tube_cannot_be_reshaped() {
        let mut portal = PortalGeometry::tube(TubeParams::new(1.0)).unwrap();
        let before = portal.clone();
        let err = portal
            .update_geometry(&[
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(0.0, 1.0),
            ])
            .unwrap_err();
        assert!(matches!(err, PortalError::UnsupportedOperation(_)));
        assert_eq!(portal, before);
    }

    #[test]
    fn reshape_keeps_outline_flatness() {
        let mut portal = PortalGeometry::arc(ArcParams::new(2.0)).unwrap();
        let flatness = portal.outline().unwrap().flatness();
        portal
            .update_geometry(&[
                Point2::new(-1.0, -1.0),
                Point2::new(1.0, -1.0),
                Point2::new(0.0, 1.0),
            ])
            .unwrap();
        let outline = portal.outline().unwrap();
        assert_relative_eq!(outline.flatness(), flatness);
        assert_eq!(outline.len(), 2);
        assert!(!outline.rings()[0].has_arcs());
    }

    #[test]
    fn reshape_with_empty_path_leaves_empty_solid() {
        let mut portal = PortalGeometry::frame(FrameParams::new(1.0, 1.0)).unwrap();
        portal.update_geometry(&[]).unwrap();
        assert_eq!(portal.solid().solid().triangle_count(), 0);
        assert_eq!(portal.solid().solid().surfaces.len(), 3);
        assert_relative_eq!(portal.depth(), 2.0);
    }

    #[test]
    fn decode_is_unsupported() {
        let err = PortalGeometry::decode(b"portal").unwrap_err();
        assert!(matches!(err, PortalError::UnsupportedOperation(_)));
    }
}
