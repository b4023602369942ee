use crate::math::Point2;

use super::ProfileKind;

/// Default mask multiplier for rectangular frames.
pub const DEFAULT_FRAME_OUTER_MULT: f64 = 3.0;
/// Default mask multiplier for polygon circles.
pub const DEFAULT_POLYGON_OUTER_MULT: f64 = 6.0;
/// Default mask multiplier for smooth arc circles.
pub const DEFAULT_ARC_OUTER_MULT: f64 = 5.0;
/// Default mask multiplier for tubes.
pub const DEFAULT_TUBE_OUTER_MULT: f64 = 5.0;
/// Default mask multiplier for arbitrary paths.
pub const DEFAULT_PATH_OUTER_MULT: f64 = 3.0;

/// Default circle subdivisions: `2^7 = 128` segments.
pub const DEFAULT_SUBDIVISIONS: u32 = 7;

/// Default arc flatness, relative to the radius. Values above 0.01 look faceted.
pub const DEFAULT_ARC_FLATNESS: f64 = 0.005;

/// Default path flatness, relative to the larger bounding-box dimension.
pub const DEFAULT_PATH_FLATNESS: f64 = 0.6;

/// Axis-aligned rectangular portal of `width` x `height`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameParams {
    pub width: f64,
    pub height: f64,
    /// Defaults to twice the larger frame dimension.
    pub depth: Option<f64>,
    pub outer_mult: f64,
}

impl FrameParams {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            depth: None,
            outer_mult: DEFAULT_FRAME_OUTER_MULT,
        }
    }

    #[must_use]
    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = Some(depth);
        self
    }

    #[must_use]
    pub fn with_outer_mult(mut self, outer_mult: f64) -> Self {
        self.outer_mult = outer_mult;
        self
    }
}

/// Circular portal approximated by a regular polygon of `2^subdivisions` sides.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonParams {
    pub radius: f64,
    /// Clamped to a minimum of 2 (a diamond).
    pub subdivisions: u32,
    /// Defaults to four times the radius.
    pub depth: Option<f64>,
    pub outer_mult: f64,
}

impl PolygonParams {
    #[must_use]
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            subdivisions: DEFAULT_SUBDIVISIONS,
            depth: None,
            outer_mult: DEFAULT_POLYGON_OUTER_MULT,
        }
    }

    #[must_use]
    pub fn with_subdivisions(mut self, subdivisions: u32) -> Self {
        self.subdivisions = subdivisions;
        self
    }

    #[must_use]
    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = Some(depth);
        self
    }

    #[must_use]
    pub fn with_outer_mult(mut self, outer_mult: f64) -> Self {
        self.outer_mult = outer_mult;
        self
    }
}

/// Circular portal with a true circular boundary, flattened to within
/// `radius * flatness`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcParams {
    pub radius: f64,
    pub flatness: f64,
    /// Defaults to four times the radius.
    pub depth: Option<f64>,
    pub outer_mult: f64,
}

impl ArcParams {
    #[must_use]
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            flatness: DEFAULT_ARC_FLATNESS,
            depth: None,
            outer_mult: DEFAULT_ARC_OUTER_MULT,
        }
    }

    #[must_use]
    pub fn with_flatness(mut self, flatness: f64) -> Self {
        self.flatness = flatness;
        self
    }

    #[must_use]
    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = Some(depth);
        self
    }

    #[must_use]
    pub fn with_outer_mult(mut self, outer_mult: f64) -> Self {
        self.outer_mult = outer_mult;
        self
    }
}

/// Circular portal built as an open annular cylinder.
#[derive(Debug, Clone, PartialEq)]
pub struct TubeParams {
    pub radius: f64,
    pub subdivisions: u32,
    /// Defaults to twice the radius.
    pub depth: Option<f64>,
    pub outer_mult: f64,
}

impl TubeParams {
    #[must_use]
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            subdivisions: DEFAULT_SUBDIVISIONS,
            depth: None,
            outer_mult: DEFAULT_TUBE_OUTER_MULT,
        }
    }

    #[must_use]
    pub fn with_subdivisions(mut self, subdivisions: u32) -> Self {
        self.subdivisions = subdivisions;
        self
    }

    #[must_use]
    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = Some(depth);
        self
    }

    #[must_use]
    pub fn with_outer_mult(mut self, outer_mult: f64) -> Self {
        self.outer_mult = outer_mult;
        self
    }
}

/// Portal whose opening follows a caller-supplied closed polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct PathParams {
    pub points: Vec<Point2>,
    pub flatness: f64,
    /// Defaults to twice the larger bounding-box dimension.
    pub depth: Option<f64>,
    pub outer_mult: f64,
}

impl PathParams {
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self {
            points,
            flatness: DEFAULT_PATH_FLATNESS,
            depth: None,
            outer_mult: DEFAULT_PATH_OUTER_MULT,
        }
    }

    #[must_use]
    pub fn with_flatness(mut self, flatness: f64) -> Self {
        self.flatness = flatness;
        self
    }

    #[must_use]
    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = Some(depth);
        self
    }

    #[must_use]
    pub fn with_outer_mult(mut self, outer_mult: f64) -> Self {
        self.outer_mult = outer_mult;
        self
    }
}

/// A complete portal construction request.
#[derive(Debug, Clone, PartialEq)]
pub enum PortalSpec {
    Frame(FrameParams),
    Polygon(PolygonParams),
    Arc(ArcParams),
    Tube(TubeParams),
    Path(PathParams),
}

impl PortalSpec {
    #[must_use]
    pub fn kind(&self) -> ProfileKind {
        match self {
            Self::Frame(_) => ProfileKind::Rectangle,
            Self::Polygon(_) => ProfileKind::Polygon,
            Self::Arc(_) => ProfileKind::Arc,
            Self::Tube(_) => ProfileKind::Tube,
            Self::Path(_) => ProfileKind::Path,
        }
    }
}

impl From<FrameParams> for PortalSpec {
    fn from(params: FrameParams) -> Self {
        Self::Frame(params)
    }
}

impl From<PolygonParams> for PortalSpec {
    fn from(params: PolygonParams) -> Self {
        Self::Polygon(params)
    }
}

impl From<ArcParams> for PortalSpec {
    fn from(params: ArcParams) -> Self {
        Self::Arc(params)
    }
}

impl From<TubeParams> for PortalSpec {
    fn from(params: TubeParams) -> Self {
        Self::Tube(params)
    }
}

impl From<PathParams> for PortalSpec {
    fn from(params: PathParams) -> Self {
        Self::Path(params)
    }
}
