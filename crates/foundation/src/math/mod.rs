pub mod angle;
pub mod spherical;
pub mod vec;

pub use angle::*;
pub use spherical::*;
pub use vec::*;
