use std::f64::consts::TAU;

use tracing::{debug, warn};

use crate::error::{GeometryError, Result};
use crate::geometry::OutlinePath;
use crate::math::{Bounds2, Point2, Vector2, TOLERANCE};

use super::{
    ArcParams, FrameParams, PathParams, PolygonParams, PortalSpec, Profile, ProfileShape,
    TubeParams, TubeProfile, INNER_INSET_DIVISOR,
};

/// Fewest subdivisions accepted: `2^2 = 4` segments.
pub const MIN_SUBDIVISIONS: u32 = 2;
/// Most subdivisions accepted: `2^16` segments.
pub const MAX_SUBDIVISIONS: u32 = 16;

/// Number of circle segments for a subdivision level, `2^subdivisions`
/// after clamping to `MIN_SUBDIVISIONS..=MAX_SUBDIVISIONS`.
#[must_use]
pub fn segment_count(subdivisions: u32) -> u32 {
    if subdivisions > MAX_SUBDIVISIONS {
        warn!(subdivisions, max = MAX_SUBDIVISIONS, "clamping circle subdivisions");
    }
    1 << subdivisions.clamp(MIN_SUBDIVISIONS, MAX_SUBDIVISIONS)
}

/// Resolves a [`PortalSpec`] into rings (or tube radii), depth and mask scale.
pub struct BuildProfile<'a> {
    spec: &'a PortalSpec,
}

impl<'a> BuildProfile<'a> {
    /// Creates a new `BuildProfile` operation.
    #[must_use]
    pub fn new(spec: &'a PortalSpec) -> Self {
        Self { spec }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] for non-positive sizes,
    /// radii, flatness or explicit depth, and [`GeometryError::Degenerate`]
    /// when a path gives no extent to derive a default depth from.
    pub fn execute(&self) -> Result<Profile> {
        let resolved = match self.spec {
            PortalSpec::Frame(params) => build_frame(params)?,
            PortalSpec::Polygon(params) => build_polygon(params)?,
            PortalSpec::Arc(params) => build_arc(params)?,
            PortalSpec::Tube(params) => build_tube(params)?,
            PortalSpec::Path(params) => build_path(params)?,
        };
        let profile = Profile {
            kind: self.spec.kind(),
            shape: resolved.shape,
            depth: resolved.depth,
            outer_scale: resolved.outer_scale,
        };
        debug!(
            kind = ?profile.kind,
            depth = profile.depth,
            outer_scale = profile.outer_scale,
            "built portal profile"
        );
        Ok(profile)
    }
}

struct Resolved {
    shape: ProfileShape,
    depth: f64,
    outer_scale: f64,
}

fn build_frame(params: &FrameParams) -> Result<Resolved> {
    non_negative("width", params.width)?;
    non_negative("height", params.height)?;
    let largest = params.width.max(params.height);
    positive("frame size", largest)?;
    let outer_scale = outer_scale(params.outer_mult)?;
    let depth = resolve_depth(params.depth, largest * 2.0)?;

    let mut outline = OutlinePath::new();
    let hider = largest * outer_scale;
    outline.add_frame(Point2::origin(), Vector2::new(hider, hider));
    outline.add_frame(
        Point2::origin(),
        Vector2::new(
            params.width / INNER_INSET_DIVISOR,
            params.height / INNER_INSET_DIVISOR,
        ),
    );

    Ok(Resolved {
        shape: ProfileShape::Planar(outline),
        depth,
        outer_scale,
    })
}

fn build_polygon(params: &PolygonParams) -> Result<Resolved> {
    positive("radius", params.radius)?;
    let outer_scale = outer_scale(params.outer_mult)?;
    let depth = resolve_depth(params.depth, params.radius * 4.0)?;
    let segments = segment_count(params.subdivisions);

    let step = TAU / f64::from(segments);
    let points: Vec<Point2> = (0..segments)
        .map(|k| {
            let angle = f64::from(k) * step;
            Point2::new(params.radius * angle.cos(), params.radius * angle.sin())
        })
        .collect();

    let mut outline = OutlinePath::new();
    outline.add_ring(&points);
    let hider = params.radius * outer_scale;
    outline.add_frame(Point2::origin(), Vector2::new(hider, hider));

    Ok(Resolved {
        shape: ProfileShape::Planar(outline),
        depth,
        outer_scale,
    })
}

fn build_arc(params: &ArcParams) -> Result<Resolved> {
    positive("radius", params.radius)?;
    positive("flatness", params.flatness)?;
    let outer_scale = outer_scale(params.outer_mult)?;
    let depth = resolve_depth(params.depth, params.radius * 4.0)?;

    let mut outline = OutlinePath::new();
    outline.add_circle(Point2::origin(), params.radius);
    let hider = params.radius * outer_scale;
    outline.add_frame(Point2::origin(), Vector2::new(hider, hider));
    outline.set_flatness(params.radius * params.flatness);

    Ok(Resolved {
        shape: ProfileShape::Planar(outline),
        depth,
        outer_scale,
    })
}

fn build_tube(params: &TubeParams) -> Result<Resolved> {
    positive("radius", params.radius)?;
    let outer_scale = outer_scale(params.outer_mult)?;
    let depth = resolve_depth(params.depth, params.radius * 2.0)?;

    Ok(Resolved {
        shape: ProfileShape::Tube(TubeProfile {
            inner_radius: params.radius / INNER_INSET_DIVISOR,
            outer_radius: params.radius * outer_scale,
            segments: segment_count(params.subdivisions),
        }),
        depth,
        outer_scale,
    })
}

fn build_path(params: &PathParams) -> Result<Resolved> {
    positive("flatness", params.flatness)?;
    let outer_scale = outer_scale(params.outer_mult)?;

    let mut outline = OutlinePath::new();
    let bounds = fill_path_outline(&mut outline, &params.points, outer_scale);
    let largest = bounds.map_or(0.0, |b| b.largest_dim());
    outline.set_flatness(largest * params.flatness);

    let depth = match params.depth {
        Some(depth) => {
            positive("depth", depth)?;
            depth
        }
        None if largest > TOLERANCE => largest * 2.0,
        None => {
            return Err(GeometryError::Degenerate(
                "path has no extent to derive a depth from; supply one explicitly".into(),
            )
            .into())
        }
    };

    Ok(Resolved {
        shape: ProfileShape::Planar(outline),
        depth,
        outer_scale,
    })
}

/// Adds the path as the inner ring and a bounding-box mask frame around the
/// origin as the outer ring. Returns the path's bounds.
pub(crate) fn fill_path_outline(
    outline: &mut OutlinePath,
    points: &[Point2],
    outer_scale: f64,
) -> Option<Bounds2> {
    outline.add_ring(points);
    let bounds = Bounds2::from_points(points);
    let (w, h) = bounds.map_or((0.0, 0.0), |b| (b.width(), b.height()));
    outline.add_frame(Point2::origin(), Vector2::new(w * outer_scale, h * outer_scale));
    bounds
}

fn outer_scale(outer_mult: f64) -> Result<f64> {
    if !outer_mult.is_finite() {
        return Err(out_of_range("outer_mult", outer_mult, 1.0).into());
    }
    Ok(outer_mult.max(1.0))
}

fn resolve_depth(explicit: Option<f64>, default: f64) -> Result<f64> {
    let depth = explicit.unwrap_or(default);
    positive("depth", depth)?;
    Ok(depth)
}

fn positive(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > TOLERANCE {
        Ok(())
    } else {
        Err(out_of_range(parameter, value, TOLERANCE).into())
    }
}

fn non_negative(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(out_of_range(parameter, value, 0.0).into())
    }
}

fn out_of_range(parameter: &'static str, value: f64, min: f64) -> GeometryError {
    GeometryError::ParameterOutOfRange {
        parameter,
        value,
        min,
        max: f64::INFINITY,
    }
}
