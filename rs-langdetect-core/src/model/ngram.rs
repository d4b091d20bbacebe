/// Character used to pad words and to replace non-letters.
pub const WORD_BOUNDARY: char = ' ';

/// Extracts the character n-grams of `text` for every requested length.
///
/// # Behavior
/// - Lowercases the text.
/// - Every non-alphabetic character acts as a word boundary.
/// - Each word is padded with a single space on both sides, so `"the"`
///   yields `" t"`, `"th"`, `"he"`, `"e "` as 2-grams.
/// - Windows made only of spaces are skipped.
///
/// # Notes
/// - UTF-8 safe: works on `char`s, not bytes.
/// - Lengths of 0 are ignored.
pub fn extract(text: &str, lengths: &[usize]) -> Vec<String> {
	let mut grams = Vec::new();

	for word in words(text) {
		let padded: Vec<char> = std::iter::once(WORD_BOUNDARY)
			.chain(word.chars())
			.chain(std::iter::once(WORD_BOUNDARY))
			.collect();

		for &n in lengths {
			if n == 0 || padded.len() < n {
				continue;
			}
			for window in padded.windows(n) {
				if window.iter().all(|c| *c == WORD_BOUNDARY) {
					continue;
				}
				grams.push(window.iter().collect());
			}
		}
	}

	grams
}

/// Splits text into lowercase runs of alphabetic characters.
fn words(text: &str) -> impl Iterator<Item = String> + '_ {
	text.split(|c: char| !c.is_alphabetic())
		.filter(|word| !word.is_empty())
		.map(|word| word.chars().flat_map(char::to_lowercase).collect())
}
