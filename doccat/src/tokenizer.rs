use std::sync::OnceLock;

use regex::Regex;

/// Characters that separate words: anything that is neither a letter nor an ASCII digit.
const DELIMITER_PATTERN: &str = r"[^\p{L}0-9]+";

fn delimiter() -> &'static Regex {
    static DELIMITER: OnceLock<Regex> = OnceLock::new();
    DELIMITER.get_or_init(|| Regex::new(DELIMITER_PATTERN).unwrap())
}

/// Splits a text into lowercase words.
///
/// # Arguments
///
/// * `text` - A raw text.
///
/// # Returns
///
/// Words in the order of appearance. An empty `text` yields a single empty word, while a text
/// consisting only of delimiters yields no words.
///
/// # Examples
///
/// ```
/// use doccat::tokenize;
///
/// assert_eq!(vec!["hello", "wörld", "42"], tokenize("Hello, WÖRLD! 42"));
/// assert_eq!(vec![""], tokenize(""));
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }
    delimiter()
        .split(text)
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_empty() {
        assert_eq!(vec![""], tokenize(""));
    }

    #[test]
    fn test_tokenize_only_delimiters() {
        assert_eq!(Vec::<String>::new(), tokenize(" .,;-! "));
    }

    #[test]
    fn test_tokenize_lowercase() {
        assert_eq!(vec!["cat", "dog", "cat"], tokenize("Cat DOG cat"));
    }

    #[test]
    fn test_tokenize_leading_and_trailing_delimiters() {
        assert_eq!(vec!["fish", "bird"], tokenize("  ...fish, bird!!"));
    }

    #[test]
    fn test_tokenize_unicode_letters() {
        assert_eq!(
            vec!["příliš", "žluťoučký", "kůň", "猫"],
            tokenize("Příliš žluťoučký-kůň (猫)")
        );
    }

    #[test]
    fn test_tokenize_digits_kept_inside_words() {
        assert_eq!(vec!["mp3", "2024", "x"], tokenize("MP3/2024_x"));
    }

    #[test]
    fn test_tokenize_non_ascii_digits_split() {
        // Only ASCII digits belong to words.
        assert_eq!(vec!["a", "b"], tokenize("a١b"));
    }
}
