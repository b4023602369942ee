use crate::error::{OperationError, Result};
use crate::profile::ProfileKind;
use crate::solid::{Solid, SubSurface};

/// How the renderer should treat one sub-surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaintIntent {
    /// Invisible but depth-writing; hides everything behind it.
    Occluder,
    /// Ordinary opaque paint.
    Structural,
    /// Fully transparent.
    SeeThrough,
}

/// Render flags a material for a [`PaintIntent`] must honor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub writes_color: bool,
    pub writes_depth: bool,
    pub double_sided: bool,
    pub opacity: f64,
}

impl PaintIntent {
    #[must_use]
    pub fn render_state(self) -> RenderState {
        match self {
            Self::Occluder => RenderState {
                writes_color: false,
                writes_depth: true,
                double_sided: true,
                opacity: 1.0,
            },
            Self::Structural => RenderState {
                writes_color: true,
                writes_depth: true,
                double_sided: false,
                opacity: 1.0,
            },
            Self::SeeThrough => RenderState {
                writes_color: true,
                writes_depth: true,
                double_sided: false,
                opacity: 0.0,
            },
        }
    }
}

const FRAMED_INTENTS: [PaintIntent; 3] = [
    PaintIntent::Occluder,
    PaintIntent::Structural,
    PaintIntent::SeeThrough,
];

const TUBE_INTENTS: [PaintIntent; 2] = [PaintIntent::Occluder, PaintIntent::SeeThrough];

/// Pairs the sub-surfaces of an extruded solid with their paint intents.
pub struct MaskAssembly;

impl MaskAssembly {
    /// Intents in sub-surface order for a profile kind.
    #[must_use]
    pub fn intents_for(kind: ProfileKind) -> &'static [PaintIntent] {
        if kind.is_planar() {
            &FRAMED_INTENTS
        } else {
            &TUBE_INTENTS
        }
    }

    /// Attaches intents to `solid` by position.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Failed`] if the solid does not have exactly
    /// one sub-surface per intent.
    pub fn assemble(solid: Solid, kind: ProfileKind) -> Result<MaskedSolid> {
        let intents = Self::intents_for(kind);
        if solid.surfaces.len() != intents.len() {
            return Err(OperationError::Failed(format!(
                "{kind:?} portal expects {} sub-surfaces, solid has {}",
                intents.len(),
                solid.surfaces.len()
            ))
            .into());
        }
        Ok(MaskedSolid { solid, intents })
    }
}

/// A solid whose sub-surfaces each carry a paint intent.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedSolid {
    solid: Solid,
    intents: &'static [PaintIntent],
}

impl MaskedSolid {
    #[must_use]
    pub fn solid(&self) -> &Solid {
        &self.solid
    }

    #[must_use]
    pub fn intents(&self) -> &'static [PaintIntent] {
        self.intents
    }

    /// Sub-surfaces paired with their intent, in order.
    pub fn surfaces(&self) -> impl Iterator<Item = (&SubSurface, PaintIntent)> + '_ {
        self.solid
            .surfaces
            .iter()
            .zip(self.intents.iter().copied())
    }
}
