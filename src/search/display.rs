use chrono::DateTime;

use super::SearchResult;

/// What one result card shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayRecord {
	/// Card heading.
	pub title_text: String,
	/// Visible link text, the bare URL.
	pub link_text: String,
	/// Link target.
	pub link_href: String,
	/// Crawl date, see [`format_date`].
	pub date_text: String,
	/// Crawl profile name.
	pub profile_text: String,
}

impl From<&SearchResult> for DisplayRecord {
	fn from(result: &SearchResult) -> Self {
		Self {
			title_text: result.title.clone(),
			link_text: result.url.clone(),
			link_href: result.url.clone(),
			date_text: format_date(result.timestamp),
			profile_text: result.profile.clone(),
		}
	}
}

/// UTC calendar date (`YYYY-MM-DD`) of a Unix timestamp in seconds.
///
/// Out-of-range timestamps fall back to the raw number.
pub fn format_date(timestamp: i64) -> String {
	match DateTime::from_timestamp(timestamp, 0) {
		Some(dt) => dt.format("%Y-%m-%d").to_string(),
		None => timestamp.to_string(),
	}
}

/// Map a promoted list to cards, one per result, order kept.
pub fn display_records(results: &[SearchResult]) -> Vec<DisplayRecord> {
	results.iter().map(DisplayRecord::from).collect()
}
