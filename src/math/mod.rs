/// World-space vector type
pub mod vector;

pub use vector::Vector3;
