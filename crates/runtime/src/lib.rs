pub mod cancel;
pub mod frame;
pub mod metrics;
pub mod tick_loop;

pub use cancel::*;
pub use frame::*;
pub use metrics::*;
pub use tick_loop::*;
