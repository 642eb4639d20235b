//! Network seam shared by both pipelines.

mod fetch;
mod sequence;

pub use fetch::{BrowserFetch, Fetch};
pub use sequence::{RequestSequence, RequestToken};
