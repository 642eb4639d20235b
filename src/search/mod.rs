//! Search pipeline: result decoding, promotion, display records, client.

mod client;
mod display;
mod promote;
mod result;

pub use client::SearchClient;
pub use display::{DisplayRecord, display_records, format_date};
pub use promote::{PromotionMode, promote, promote_json};
pub use result::{SearchResult, decode_results, parse_result_values};
