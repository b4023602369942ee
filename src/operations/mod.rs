pub mod shaping;

pub use shaping::{Extrude, ExtrudeTube};
