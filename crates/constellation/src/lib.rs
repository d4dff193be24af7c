//! Rotating constellation sphere: point generation, rotation, perspective
//! projection, proximity graph rendering and DOM overlay anchoring.
//!
//! Everything here is host-agnostic. Drawing goes through [`Surface`] and
//! overlay styling through [`StyleSink`], so the browser app and the headless
//! CLI share the same per-frame pipeline.

pub mod animator;
pub mod config;
pub mod error;
pub mod graph;
pub mod layout;
pub mod overlay;
pub mod projection;
pub mod rotation;
pub mod scene;
pub mod sphere;

pub use animator::*;
pub use config::*;
pub use error::*;
pub use graph::*;
pub use layout::*;
pub use overlay::*;
pub use projection::*;
pub use rotation::*;
pub use scene::*;
pub use sphere::*;
