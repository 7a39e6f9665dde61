// world/ - Path and orientation queries
//
// Pure functions over the traversal path and the scene's geometry helpers.
// No state; only the spline sampler allocates.

mod camera;
mod math;
mod spline;

pub use camera::*;
pub use math::*;
pub use spline::*;
