//! Graph snapshot pipeline: payload, layout, viewport, loader.

mod layout;
mod loader;
mod payload;
mod viewport;

pub use layout::{Bounds, Layout, LayoutConfig, LayoutEngine, PlacedNode, Point};
pub use loader::GraphLoader;
pub use payload::{Edge, GraphPayload, Node};
pub use viewport::{MAX_SCALE, MIN_SCALE, ViewTransform};
