use unicode_normalization::UnicodeNormalization;

/// Folds a raw search term into its aggregation key.
///
/// NFKC, whitespace runs collapsed to one space, surrounding whitespace trimmed, lowercased.
/// Returns `None` when nothing but whitespace remains.
pub fn normalize_term(raw: &str) -> Option<String> {
	let folded = raw.nfkc().collect::<String>();
	let joined = folded.split_whitespace().collect::<Vec<_>>().join(" ");

	if joined.is_empty() {
		return None;
	}

	Some(joined.to_lowercase())
}
