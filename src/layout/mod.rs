//! Layout engine: chart data in, coordinates and paths out.

mod engine;
mod geometry;
mod scene;
mod viewport;

pub use engine::*;
pub use geometry::{Path, Point};
pub use scene::*;
pub use viewport::{resolve_canvas, Viewport};
