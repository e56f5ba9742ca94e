/// Substring matcher using the Knuth-Morris-Pratt failure table.
///
/// The table is built once per pattern so a recursive search over many files
/// pays for it a single time. Matching is byte-wise and linear in the length
/// of the text.
#[derive(Debug, Clone)]
pub struct Matcher {
	pattern: Vec<u8>,
	/// Length of the longest proper prefix of `pattern[..=i]` that is also a suffix.
	lps: Vec<usize>,
}

impl Matcher {
	pub fn new(pattern: &str) -> Self {
		let pattern = pattern.as_bytes().to_vec();
		let lps = failure_table(&pattern);
		Self { pattern, lps }
	}

	/// True when the pattern occurs anywhere in `text`. The empty pattern
	/// occurs in every text.
	pub fn is_match(&self, text: &str) -> bool {
		self.find(text).is_some()
	}

	/// Byte offset of the first occurrence.
	pub fn find(&self, text: &str) -> Option<usize> {
		let m = self.pattern.len();
		if m == 0 {
			return Some(0);
		}

		let mut j = 0;
		for (i, &b) in text.as_bytes().iter().enumerate() {
			while j > 0 && b != self.pattern[j] {
				j = self.lps[j - 1];
			}
			if b == self.pattern[j] {
				j += 1;
				if j == m {
					return Some(i + 1 - m);
				}
			}
		}
		None
	}
}

fn failure_table(pattern: &[u8]) -> Vec<usize> {
	let mut lps = vec![0; pattern.len()];
	let mut len = 0;
	let mut i = 1;
	while i < pattern.len() {
		if pattern[i] == pattern[len] {
			len += 1;
			lps[i] = len;
			i += 1;
		} else if len == 0 {
			i += 1;
		} else {
			len = lps[len - 1];
		}
	}
	lps
}

#[cfg(test)]
mod tests {
	use super::*;

	fn contains(text: &str, pattern: &str) -> bool {
		Matcher::new(pattern).is_match(text)
	}

	#[test]
	fn failure_table_for_repeating_pattern() {
		assert_eq!(failure_table(b"aabaaab"), vec![0, 1, 0, 1, 2, 2, 3]);
		assert_eq!(failure_table(b"abcd"), vec![0, 0, 0, 0]);
	}

	#[test]
	fn finds_match_in_middle() {
		let m = Matcher::new("needle");
		assert_eq!(m.find("hay needle hay"), Some(4));
		assert!(m.is_match("...needle..."));
	}

	#[test]
	fn no_match() {
		assert!(!contains("hello world", "worlds"));
		assert!(!contains("", "a"));
	}

	#[test]
	fn backtracks_over_partial_prefix() {
		assert_eq!(Matcher::new("aab").find("aaab"), Some(1));
		assert!(contains("abababca", "ababca"));
	}

	#[test]
	fn match_across_lines() {
		assert!(contains("first\nsecond\n", "t\ns"));
	}

	#[test]
	fn empty_pattern_matches_everything() {
		assert!(contains("", ""));
		assert!(contains("abc", ""));
	}

	#[test]
	fn multibyte_text() {
		assert!(contains("naïve café", "café"));
		assert_eq!(Matcher::new("é").find("café"), Some(3));
	}
}
