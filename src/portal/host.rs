use crate::mask::MaskedSolid;
use crate::math::Isometry3;

/// A positioned, painted solid ready to be placed under a scene node.
#[derive(Debug, Clone, PartialEq)]
pub struct PortalMount {
    pub solid: MaskedSolid,
    /// Transform relative to the owning node.
    pub placement: Isometry3,
}

/// Something that can hold a portal's solid, typically a scene-graph node.
///
/// Mounting again replaces whatever was mounted before.
pub trait PortalHost {
    fn mount(&mut self, mount: PortalMount);
}

impl PortalHost for Option<PortalMount> {
    fn mount(&mut self, mount: PortalMount) {
        *self = Some(mount);
    }
}
