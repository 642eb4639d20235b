use serde_json::Value;

use super::result::{SearchResult, decode_results};
use crate::error::DataShapeError;

/// What happens to the first title match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PromotionMode {
	/// Prepend a copy; the original stays where it was.
	#[default]
	Duplicate,
	/// Move it to the front.
	Move,
}

/// Surface the first result whose title contains `query` (case-insensitive).
///
/// In [`PromotionMode::Duplicate`] the match is prepended and also kept at
/// its original position, so the list grows by one. No match, or an empty
/// list, returns the input unchanged.
pub fn promote(
	mut results: Vec<SearchResult>,
	query: &str,
	mode: PromotionMode,
) -> Vec<SearchResult> {
	let query = query.to_lowercase();
	let Some(i) = results
		.iter()
		.position(|r| r.title.to_lowercase().contains(&query))
	else {
		return results;
	};

	match mode {
		PromotionMode::Duplicate => {
			let hit = results[i].clone();
			results.insert(0, hit);
		}
		PromotionMode::Move => {
			let hit = results.remove(i);
			results.insert(0, hit);
		}
	}
	results
}

/// [`promote`] over undecoded elements. Every element is decoded first, so
/// one malformed result (e.g. no `title`) fails the whole list instead of
/// being skipped.
pub fn promote_json(
	values: Vec<Value>,
	query: &str,
	mode: PromotionMode,
) -> Result<Vec<SearchResult>, DataShapeError> {
	Ok(promote(decode_results(values)?, query, mode))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn titled(title: &str) -> SearchResult {
		SearchResult {
			title: title.into(),
			url: format!("https://example.com/{}", title.len()),
			timestamp: 0,
			profile: "default".into(),
		}
	}

	fn titles(results: &[SearchResult]) -> Vec<&str> {
		results.iter().map(|r| r.title.as_str()).collect()
	}

	#[test]
	fn first_match_is_duplicated_to_front() {
		let list = vec![titled("Cats"), titled("Great Cats of Africa"), titled("Dog facts")];
		let out = promote(list.clone(), "great cats", PromotionMode::Duplicate);
		assert_eq!(
			titles(&out),
			["Great Cats of Africa", "Cats", "Great Cats of Africa", "Dog facts"]
		);
		assert_eq!(out.len(), list.len() + 1);
		assert_eq!(out[0], list[1]);
		assert_eq!(out[1..], list[..]);
	}

	#[test]
	fn only_the_first_match_is_promoted() {
		let list = vec![titled("x"), titled("cat one"), titled("cat two")];
		let out = promote(list, "cat", PromotionMode::Duplicate);
		assert_eq!(titles(&out), ["cat one", "x", "cat one", "cat two"]);
	}

	#[test]
	fn match_is_case_insensitive_both_ways() {
		let out = promote(vec![titled("Hello World")], "HELLO", PromotionMode::Duplicate);
		assert_eq!(out.len(), 2);

		let list = vec![titled("Hello World")];
		assert_eq!(promote(list.clone(), "zzz", PromotionMode::Duplicate), list);
	}

	#[test]
	fn no_match_is_identity() {
		let list = vec![titled("alpha"), titled("beta"), titled("alpha")];
		assert_eq!(promote(list.clone(), "gamma", PromotionMode::Duplicate), list);
	}

	#[test]
	fn empty_list_stays_empty() {
		assert!(promote(Vec::new(), "anything", PromotionMode::Duplicate).is_empty());
	}

	#[test]
	fn empty_query_promotes_the_first_result() {
		let out = promote(vec![titled("a"), titled("b")], "", PromotionMode::Duplicate);
		assert_eq!(titles(&out), ["a", "a", "b"]);
	}

	#[test]
	fn move_mode_does_not_duplicate() {
		let list = vec![titled("Cats"), titled("Great Cats of Africa"), titled("Dog facts")];
		let out = promote(list, "great cats", PromotionMode::Move);
		assert_eq!(titles(&out), ["Great Cats of Africa", "Cats", "Dog facts"]);
	}

	#[test]
	fn missing_title_fails_the_whole_list() {
		let values: Vec<Value> = serde_json::from_str(
			r#"[{"title":"Cats","url":"u","timestamp":1,"profile":"p"},
			    {"url":"u","timestamp":2,"profile":"p"}]"#,
		)
		.unwrap();
		assert!(matches!(
			promote_json(values, "cats", PromotionMode::Duplicate),
			Err(DataShapeError::Result { index: 1, .. })
		));
	}
}
