//! Text signatures: content-derived secondary keys for blocks.
//!
//! A signature is the first character of every word in a block's text. It
//! survives a paragraph moving to a new position, which lets a comment store
//! re-associate threads whose sequence-based identifier has shifted.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

static WORD_REGEX: OnceLock<Regex> = OnceLock::new();

/// First character of each run of letters or digits.
pub fn text_signature(text: &str) -> String {
    let word_regex =
        WORD_REGEX.get_or_init(|| Regex::new(r"[\p{L}\p{N}]+").expect("Invalid word regex"));
    word_regex
        .find_iter(text)
        .filter_map(|word| word.as_str().chars().next())
        .collect()
}

/// Makes signatures unique within one segmentation: the second `Ab` becomes
/// `Ab@2`, the third `Ab@3`. Empty signatures are left alone.
#[derive(Debug, Default)]
pub struct SignatureRegistry {
    seen: HashMap<String, usize>,
}

impl SignatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, signature: String) -> String {
        if signature.is_empty() {
            return signature;
        }
        let count = self.seen.entry(signature.clone()).or_insert(0);
        *count += 1;
        match *count {
            1 => signature,
            n => format!("{signature}@{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_letters_of_words() {
        assert_eq!(text_signature("Hello, brave new world!"), "Hbnw");
    }

    #[test]
    fn unicode_and_digits() {
        assert_eq!(text_signature("Éte 2024 — naïve"), "É2n");
    }

    #[test]
    fn no_words_no_signature() {
        assert_eq!(text_signature(" … — "), "");
    }

    #[test]
    fn registry_deduplicates() {
        let mut registry = SignatureRegistry::new();
        assert_eq!(registry.register("Ab".into()), "Ab");
        assert_eq!(registry.register("Cd".into()), "Cd");
        assert_eq!(registry.register("Ab".into()), "Ab@2");
        assert_eq!(registry.register("Ab".into()), "Ab@3");
        assert_eq!(registry.register(String::new()), "");
        assert_eq!(registry.register(String::new()), "");
    }
}
