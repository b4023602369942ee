use tracing::debug;

use crate::error::GeometryError;
use crate::math::polygon_2d::ring_contains;
use crate::math::{Bounds2, Point2, Vector2};
use crate::tessellation::TessellationParams;

use super::Ring;

/// Default absolute flatness of an outline, in scene units.
pub const DEFAULT_FLATNESS: f64 = 0.6;

/// Region-membership rule used when carving rings out of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// A point is filled when it is enclosed by an odd number of rings.
    #[default]
    EvenOdd,
}

/// A mutable planar outline: an ordered set of closed rings.
///
/// Ring insertion order is preserved. Under the even-odd rule an outer ring
/// plus one ring inside it describes a frame with a hole.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlinePath {
    rings: Vec<Ring>,
    flatness: f64,
}

impl Default for OutlinePath {
    fn default() -> Self {
        Self {
            rings: Vec::new(),
            flatness: DEFAULT_FLATNESS,
        }
    }
}

impl OutlinePath {
    /// Creates an empty outline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a closed straight-edged ring.
    ///
    /// A list with fewer than 2 distinct points is a no-op.
    pub fn add_ring(&mut self, points: &[Point2]) {
        self.push(Ring::from_points(points));
    }

    /// Appends a closed straight-edged ring, reporting degenerate input.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if fewer than 2 distinct points are given.
    pub fn try_add_ring(&mut self, points: &[Point2]) -> Result<(), GeometryError> {
        self.rings.push(Ring::from_points(points)?);
        Ok(())
    }

    /// Appends an axis-aligned rectangle ring around `center`.
    pub fn add_frame(&mut self, center: Point2, half_extents: Vector2) {
        let (w, h) = (half_extents.x, half_extents.y);
        self.add_ring(&[
            center + Vector2::new(-w, -h),
            center + Vector2::new(-w, h),
            center + Vector2::new(w, h),
            center + Vector2::new(w, -h),
        ]);
    }

    /// Appends a true circle, flattened later according to [`Self::flatness`].
    pub fn add_circle(&mut self, center: Point2, radius: f64) {
        self.push(Ring::circle(center, radius));
    }

    fn push(&mut self, ring: Result<Ring, GeometryError>) {
        match ring {
            Ok(ring) => self.rings.push(ring),
            Err(err) => debug!(%err, "skipping degenerate ring"),
        }
    }

    /// Removes all rings. Flatness is kept.
    pub fn clear(&mut self) {
        self.rings.clear();
    }

    #[must_use]
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    #[must_use]
    pub fn fill_rule(&self) -> FillRule {
        FillRule::EvenOdd
    }

    /// Maximum chordal deviation allowed when flattening curved rings.
    #[must_use]
    pub fn flatness(&self) -> f64 {
        self.flatness
    }

    pub fn set_flatness(&mut self, flatness: f64) {
        self.flatness = flatness;
    }

    /// Tessellation parameters derived from the outline's flatness.
    ///
    /// Arc chord counts are not capped, so every chord stays within the
    /// flatness however small it is.
    #[must_use]
    pub fn tessellation_params(&self) -> TessellationParams {
        TessellationParams {
            tolerance: self.flatness,
            max_segments: None,
            ..TessellationParams::default()
        }
    }

    /// Every ring flattened into a polygon, in insertion order.
    #[must_use]
    pub fn flattened(&self) -> Vec<Vec<Point2>> {
        let params = self.tessellation_params();
        self.rings.iter().map(|r| r.to_points(&params)).collect()
    }

    /// Bounds of the flattened outline, or `None` when it has no rings.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds2> {
        let points: Vec<Point2> = self.flattened().into_iter().flatten().collect();
        Bounds2::from_points(&points)
    }

    /// Even-odd membership: `true` if `point` is enclosed by an odd number of rings.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        self.flattened()
            .iter()
            .filter(|ring| ring_contains(ring, point))
            .count()
            % 2
            == 1
    }
}
