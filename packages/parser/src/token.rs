//! Splits a preprocessed address string into tokens.
//!
//! A token keeps its original text (for case-preserving output) next to
//! a normalized key used for every table lookup. Commas are not tokens;
//! they mark the token that follows them as starting a new comma group.

use regex::Regex;
use std::sync::LazyLock;

use crate::tables;

/// A house number or a street name number glued to a directional
/// (`48S`, `400E`).
static GLUED_DIRECTIONAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([0-9]+)(NE|NW|SE|SW|N|S|E|W)$").expect("valid regex")
});

/// Punctuation trimmed from both ends of every word.
const TRIM_CHARS: &[char] = &['"', '\'', '(', ')', '[', ']', '{', '}', ':', '!', '?'];

/// One word of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Original text with surrounding punctuation trimmed.
    pub text: String,
    /// Uppercased text with periods removed.
    pub key: String,
    /// A comma (or newline) separated this token from the previous one.
    pub comma_before: bool,
    /// Split off the end of the previous word (`E` in `400E`).
    pub glued: bool,
}

impl Token {
    fn new(text: &str, comma_before: bool, glued: bool) -> Self {
        Self {
            text: text.to_string(),
            key: tables::normalize_key(text),
            comma_before,
            glued,
        }
    }

    /// Only ASCII digits.
    #[must_use]
    pub fn is_digits(&self) -> bool {
        !self.key.is_empty() && self.key.chars().all(|c| c.is_ascii_digit())
    }

    /// `&` or `and`.
    #[must_use]
    pub fn is_connector(&self) -> bool {
        self.key == "&" || self.key == "AND"
    }

    /// Text without periods, for rendering names.
    #[must_use]
    pub fn bare_text(&self) -> String {
        self.text.replace('.', "")
    }
}

/// Tokenizes a preprocessed address string.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut comma_pending = false;

    for word in input.split_whitespace() {
        let mut piece = String::new();
        for ch in word.chars() {
            match ch {
                ',' | ';' => {
                    push_word(&mut tokens, &piece, &mut comma_pending);
                    piece.clear();
                    comma_pending = true;
                }
                '&' => {
                    push_word(&mut tokens, &piece, &mut comma_pending);
                    piece.clear();
                    push_word(&mut tokens, "&", &mut comma_pending);
                }
                _ => piece.push(ch),
            }
        }
        push_word(&mut tokens, &piece, &mut comma_pending);
    }

    tokens
}

fn push_word(tokens: &mut Vec<Token>, word: &str, comma_pending: &mut bool) {
    let word = word.trim_matches(TRIM_CHARS);
    if tables::normalize_key(word).is_empty() {
        return;
    }

    let comma_before = std::mem::take(comma_pending);
    let plain = word.trim_end_matches('.');
    if let Some(caps) = GLUED_DIRECTIONAL_RE.captures(plain) {
        tokens.push(Token::new(&caps[1], comma_before, false));
        tokens.push(Token::new(&caps[2], false, true));
    } else {
        tokens.push(Token::new(word, comma_before, false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(input: &str) -> Vec<String> {
        tokenize(input).into_iter().map(|t| t.key).collect()
    }

    #[test]
    fn splits_on_whitespace_and_commas() {
        assert_eq!(
            keys("1005 N Gravenstein Hwy, Sebastopol,CA"),
            ["1005", "N", "GRAVENSTEIN", "HWY", "SEBASTOPOL", "CA"]
        );
    }

    #[test]
    fn marks_comma_groups() {
        let tokens = tokenize("100 Main St, Springfield, IL");
        let commas: Vec<bool> = tokens.iter().map(|t| t.comma_before).collect();
        assert_eq!(commas, [false, false, false, true, true]);
    }

    #[test]
    fn strips_periods_from_keys_only() {
        let tokens = tokenize("100 S.E. Washington Ave.");
        assert_eq!(tokens[1].key, "SE");
        assert_eq!(tokens[1].text, "S.E.");
        assert_eq!(tokens[3].key, "AVE");
        assert_eq!(tokens[3].bare_text(), "Ave");
    }

    #[test]
    fn splits_glued_directionals() {
        let tokens = tokenize("48S 400E,");
        assert_eq!(
            tokens.iter().map(|t| t.key.as_str()).collect::<Vec<_>>(),
            ["48", "S", "400", "E"]
        );
        assert!(tokens[1].glued);
        assert!(!tokens[2].glued);
    }

    #[test]
    fn leaves_letter_prefixed_numbers_alone() {
        assert_eq!(keys("E1005 Gravenstein"), ["E1005", "GRAVENSTEIN"]);
        assert_eq!(keys("1st 2nd 3rd"), ["1ST", "2ND", "3RD"]);
    }

    #[test]
    fn separates_ampersands() {
        assert_eq!(keys("Mission&Valencia"), ["MISSION", "&", "VALENCIA"]);
        assert!(tokenize("Mission & Valencia")[1].is_connector());
    }

    #[test]
    fn keeps_unit_and_postal_shapes() {
        assert_eq!(keys("#3206 60606-6306 1/2"), ["#3206", "60606-6306", "1/2"]);
    }
}
