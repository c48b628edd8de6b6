/// Punctuation marks emitted as standalone tokens.
pub const PUNCTUATION: [char; 4] = ['.', ',', '!', '?'];

/// Punctuation marks that end a sentence.
pub const TERMINAL_PUNCTUATION: [&str; 3] = [".", "!", "?"];

/// Returns true for characters that belong to a word token.
///
/// Word characters are Unicode alphanumerics, `_` and the apostrophe,
/// so contractions such as `don't` stay in one piece.
fn is_word_char(c: char) -> bool {
	c.is_alphanumeric() || c == '_' || c == '\''
}

/// Splits `text` into tokens.
///
/// Scanning left to right, a token is either:
/// - a maximal run of word characters, or
/// - a single punctuation mark from [`PUNCTUATION`].
///
/// Every other character (whitespace, dashes, quotes, ...) is a separator.
pub fn tokenize(text: &str) -> Vec<String> {
	let mut tokens = Vec::new();
	let mut word = String::new();

	for c in text.chars() {
		if is_word_char(c) {
			word.push(c);
			continue;
		}

		if !word.is_empty() {
			tokens.push(std::mem::take(&mut word));
		}
		if PUNCTUATION.contains(&c) {
			tokens.push(c.to_string());
		}
	}

	if !word.is_empty() {
		tokens.push(word);
	}

	tokens
}

/// Returns true if `token` ends a sentence.
pub fn is_terminal(token: &str) -> bool {
	TERMINAL_PUNCTUATION.contains(&token)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_words_and_punctuation() {
		assert_eq!(
			tokenize("Hello, world! Don't panic..."),
			vec!["Hello", ",", "world", "!", "Don't", "panic", ".", ".", "."]
		);
	}

	#[test]
	fn other_characters_are_separators() {
		assert_eq!(tokenize("  a-b\t(c);\n"), vec!["a", "b", "c"]);
		assert_eq!(tokenize("snake_case 42"), vec!["snake_case", "42"]);
	}

	#[test]
	fn empty_input_yields_no_token() {
		assert!(tokenize("").is_empty());
		assert!(tokenize(" \n\t-").is_empty());
	}

	#[test]
	fn unicode_letters_are_word_characters() {
		assert_eq!(tokenize("déjà vu?"), vec!["déjà", "vu", "?"]);
	}

	#[test]
	fn terminal_punctuation() {
		assert!(is_terminal("."));
		assert!(is_terminal("!"));
		assert!(is_terminal("?"));
		assert!(!is_terminal(","));
		assert!(!is_terminal("stop"));
	}
}
