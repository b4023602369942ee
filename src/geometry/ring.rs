use std::f64::consts::TAU;

use crate::error::GeometryError;
use crate::math::arc_2d::Arc2;
use crate::math::polygon_2d::dedup_closed;
use crate::math::{Point2, TOLERANCE};
use crate::tessellation::TessellationParams;

/// Bulge-encoded ring vertex.
///
/// The bulge describes the segment from this vertex to the next one:
/// `0` is a straight line, `1` a counter-clockwise semicircle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingVertex {
    pub point: Point2,
    pub bulge: f64,
}

impl RingVertex {
    /// Creates a line vertex (bulge = 0).
    #[must_use]
    pub fn line(point: Point2) -> Self {
        Self { point, bulge: 0.0 }
    }
}

/// A single closed boundary. The last vertex implicitly connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    vertices: Vec<RingVertex>,
}

impl Ring {
    /// Creates a straight-edged ring from a point list.
    ///
    /// Consecutive duplicates and an explicit closing point are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if fewer than 2 distinct points remain.
    pub fn from_points(points: &[Point2]) -> Result<Self, GeometryError> {
        let points = dedup_closed(points);
        if points.len() < 2 {
            return Err(GeometryError::Degenerate(format!(
                "ring needs at least 2 distinct points, got {}",
                points.len()
            )));
        }
        Ok(Self {
            vertices: points.into_iter().map(RingVertex::line).collect(),
        })
    }

    /// Creates a true circle as two counter-clockwise semicircles starting at
    /// `(center.x + radius, center.y)`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the radius is not positive.
    pub fn circle(center: Point2, radius: f64) -> Result<Self, GeometryError> {
        if radius.is_nan() || radius <= TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "circle radius must be positive, got {radius}"
            )));
        }
        Ok(Self {
            vertices: vec![
                RingVertex {
                    point: Point2::new(center.x + radius, center.y),
                    bulge: 1.0,
                },
                RingVertex {
                    point: Point2::new(center.x - radius, center.y),
                    bulge: 1.0,
                },
            ],
        })
    }

    #[must_use]
    pub fn vertices(&self) -> &[RingVertex] {
        &self.vertices
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns `true` if any segment is a circular arc.
    #[must_use]
    pub fn has_arcs(&self) -> bool {
        self.vertices.iter().any(|v| v.bulge.abs() >= 1e-12)
    }

    /// Flattens the ring into a closed polygon (no repeated closing point).
    ///
    /// Arcs are split so that no chord deviates from the true curve by more
    /// than `params.tolerance`, with the chord count for a full turn at least
    /// `params.min_segments` and at most `params.max_segments` when set.
    #[must_use]
    pub fn to_points(&self, params: &TessellationParams) -> Vec<Point2> {
        let n = self.vertices.len();
        let mut points = Vec::with_capacity(n * 2);

        for i in 0..n {
            let v0 = &self.vertices[i];
            let v1 = &self.vertices[(i + 1) % n];
            points.push(v0.point);

            let Some(arc) = Arc2::from_bulge(&v0.point, &v1.point, v0.bulge) else {
                continue;
            };
            let n_sub = arc_chords(&arc, params);
            for j in 1..n_sub {
                points.push(arc.point_at(f64::from(j) / f64::from(n_sub)));
            }
        }

        points
    }
}

/// Chord count for one arc, scaled from the full-turn segment bounds.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn arc_chords(arc: &Arc2, params: &TessellationParams) -> u32 {
    let fraction = arc.sweep.abs() / TAU;
    let lower = ((params.min_segments as f64 * fraction).ceil() as u32).max(1);
    let upper = params.max_segments.map_or(u32::MAX, |max| {
        ((max as f64 * fraction).ceil() as u32).max(lower)
    });
    arc.subdivision_count(params.tolerance).clamp(lower, upper)
}
