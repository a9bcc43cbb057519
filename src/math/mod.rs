pub mod vec2;
pub mod vec3;
pub mod matrix;
pub mod matrix2d;
pub mod spline;

pub use vec2::{Vec2, Point};
pub use vec3::Vec3;
pub use matrix::{Mat4, project_to_2d};
pub use matrix2d::Mat3;
pub use spline::{Spline, Knot, HermiteBasis, Resample};
