pub mod outline;
pub mod ring;

pub use outline::{FillRule, OutlinePath, DEFAULT_FLATNESS};
pub use ring::{Ring, RingVertex};
