//! View components shared by the pages.

pub mod error_alert;
pub mod force_graph;
pub mod search_results;
