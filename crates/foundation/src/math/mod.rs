pub mod angle;
pub mod geodesy;
pub mod local;
pub mod matrix;
pub mod projection;
pub mod ray;
pub mod vec;

pub use angle::*;
pub use geodesy::*;
pub use local::*;
pub use matrix::*;
pub use projection::*;
pub use ray::*;
pub use vec::*;
