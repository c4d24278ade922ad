//! Camera math.
//!
//! - `Projection`: perspective parameters, turned into a matrix once.
//! - `OrbitCamera`: a camera on a circle in the X-Z plane looking at the origin.
//!
//! Conventions: right-handed, +Y up, clip-space depth in `[0, 1]` (wgpu).

mod orbit;
mod projection;

pub use orbit::{orbit_position, OrbitCamera};
pub use projection::Projection;
