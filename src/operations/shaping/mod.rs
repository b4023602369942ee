mod extrude;
mod extrude_tube;

pub use extrude::Extrude;
pub use extrude_tube::ExtrudeTube;
