/// 2D arc/bulge math utilities.
///
/// Bulge convention: `bulge = tan(sweep_angle / 4)`.
/// - `bulge = 0`: straight line
/// - `bulge > 0`: counter-clockwise arc
/// - `bulge < 0`: clockwise arc
/// - `|bulge| = 1`: semicircle
use std::f64::consts::PI;

use super::Point2;

/// A circular arc in center-radius-angle form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc2 {
    pub center: Point2,
    pub radius: f64,
    pub start_angle: f64,
    /// Signed sweep; positive is counter-clockwise.
    pub sweep: f64,
}

impl Arc2 {
    /// Converts a bulge-defined segment from `p0` to `p1` into an arc.
    ///
    /// Returns `None` for zero-length chords and straight (zero-bulge) segments.
    #[must_use]
    pub fn from_bulge(p0: &Point2, p1: &Point2, bulge: f64) -> Option<Self> {
        if bulge.abs() < 1e-12 {
            return None;
        }
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        let chord_len = (dx * dx + dy * dy).sqrt();
        if chord_len < 1e-12 {
            return None;
        }

        // Distance from chord midpoint to center, in half-chord units.
        let sagitta_ratio = (1.0 - bulge * bulge) / (2.0 * bulge);
        let mx = (p0.x + p1.x) * 0.5;
        let my = (p0.y + p1.y) * 0.5;

        // Normal to chord pointing toward center (for positive bulge, center is left of chord).
        let nx = -dy / chord_len;
        let ny = dx / chord_len;

        let center = Point2::new(
            mx + sagitta_ratio * (chord_len * 0.5) * nx,
            my + sagitta_ratio * (chord_len * 0.5) * ny,
        );

        // r = d*(1+b²)/(4*|b|) derived from r = d/(2*sin(θ/2)) with θ=4*atan(b)
        let radius = (chord_len * 0.5) * (1.0 + bulge * bulge) / (2.0 * bulge.abs());
        let start_angle = (p0.y - center.y).atan2(p0.x - center.x);

        let sweep = 4.0 * bulge.atan();
        let sweep = sweep.clamp(-2.0 * PI, 2.0 * PI);

        Some(Self {
            center,
            radius,
            start_angle,
            sweep,
        })
    }

    /// Evaluates a point on the arc at parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        let angle = self.start_angle + self.sweep * t;
        Point2::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    /// Number of chords needed so that no chord deviates from the arc by
    /// more than `tolerance`.
    #[must_use]
    pub fn subdivision_count(&self, tolerance: f64) -> u32 {
        arc_subdivision_count(self.radius, self.sweep.abs(), tolerance)
    }
}

/// Computes the number of line segments needed to approximate an arc
/// within the given tolerance.
#[must_use]
pub fn arc_subdivision_count(radius: f64, abs_sweep: f64, tolerance: f64) -> u32 {
    if radius < 1e-12 || abs_sweep < 1e-12 || tolerance <= 0.0 {
        return 1;
    }
    // From the sagitta formula: sagitta = r * (1 - cos(θ/2))
    // For a given tolerance: θ = 2 * acos(1 - tolerance/r)
    let max_angle = if tolerance >= radius {
        PI
    } else {
        2.0 * (1.0 - tolerance / radius).acos()
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = (abs_sweep / max_angle).ceil() as u32;
    n.max(1)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn semicircle_ccw_goes_through_bottom() {
        // CCW semicircle from (0,0) to (2,0): center (1,0), sweep +π.
        let arc = Arc2::from_bulge(&Point2::new(0.0, 0.0), &Point2::new(2.0, 0.0), 1.0).unwrap();
        assert!((arc.center.x - 1.0).abs() < TOL, "cx={}", arc.center.x);
        assert!(arc.center.y.abs() < TOL, "cy={}", arc.center.y);
        assert!((arc.radius - 1.0).abs() < TOL, "r={}", arc.radius);
        assert!((arc.sweep - PI).abs() < TOL, "sweep={}", arc.sweep);

        let end = arc.point_at(1.0);
        assert!((end.x - 2.0).abs() < TOL);
        assert!(end.y.abs() < TOL);

        let mid = arc.point_at(0.5);
        assert!((mid.x - 1.0).abs() < TOL, "mid.x={}", mid.x);
        assert!((mid.y + 1.0).abs() < TOL, "mid.y={}", mid.y);
    }

    #[test]
    fn semicircle_cw_goes_through_top() {
        let arc = Arc2::from_bulge(&Point2::new(0.0, 0.0), &Point2::new(2.0, 0.0), -1.0).unwrap();
        assert!((arc.sweep + PI).abs() < TOL, "sweep={}", arc.sweep);
        let mid = arc.point_at(0.5);
        assert!((mid.x - 1.0).abs() < TOL);
        assert!((mid.y - 1.0).abs() < TOL);
    }

    #[test]
    fn quarter_circle_ccw() {
        let bulge = (PI / 8.0).tan();
        let arc = Arc2::from_bulge(&Point2::new(1.0, 0.0), &Point2::new(0.0, 1.0), bulge).unwrap();
        assert!((arc.radius - 1.0).abs() < 1e-6);
        assert!(arc.center.x.abs() < 1e-6);
        assert!(arc.center.y.abs() < 1e-6);
        assert!((arc.sweep - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn zero_bulge_is_not_an_arc() {
        assert!(Arc2::from_bulge(&Point2::new(0.0, 0.0), &Point2::new(1.0, 0.0), 0.0).is_none());
    }

    #[test]
    fn zero_chord_is_not_an_arc() {
        let p = Point2::new(3.0, 3.0);
        assert!(Arc2::from_bulge(&p, &p, 1.0).is_none());
    }

    #[test]
    fn arc_subdivision_count_large_tolerance() {
        assert_eq!(arc_subdivision_count(1.0, PI, 10.0), 1);
    }

    #[test]
    fn arc_subdivision_count_small_tolerance() {
        let n = arc_subdivision_count(1.0, PI, 0.001);
        assert!(n > 10, "expected many subdivisions, got {n}");
    }

    #[test]
    fn arc_subdivision_count_relative_flatness() {
        // tolerance/r = 0.005 → half-angle acos(0.995) ≈ 0.1 rad → 16 chords per semicircle.
        assert_eq!(arc_subdivision_count(2.0, PI, 0.01), 16);
    }
}
