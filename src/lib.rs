pub mod error;
pub mod geometry;
pub mod mask;
pub mod math;
pub mod operations;
pub mod portal;
pub mod profile;
pub mod solid;
pub mod tessellation;

pub use error::{PortalError, Result};
pub use mask::{MaskAssembly, MaskedSolid, PaintIntent, RenderState};
pub use portal::{PortalGeometry, PortalHost, PortalMount, Z_EPSILON};
pub use profile::{
    ArcParams, FrameParams, PathParams, PolygonParams, PortalSpec, ProfileKind, TubeParams,
    INNER_INSET_DIVISOR,
};
