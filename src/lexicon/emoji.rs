// Emoji matcher: one alternation over every known emoji sequence.
//
// Sequences are tried longest first so a ZWJ family or a flag is consumed as
// a single emoji instead of as its component codepoints.

use regex::{Regex, RegexBuilder};

use crate::error::{FeatureError, Result};

const VARIATION_SELECTOR_16: char = '\u{FE0F}';

#[derive(Debug, Clone)]
pub struct EmojiMatcher {
    regex: Regex,
}

impl EmojiMatcher {
    /// Build the matcher from the canonical emoji list, skin tones included.
    ///
    /// Text-presentation forms (the sequence without U+FE0F) are added as
    /// well, since clients frequently drop the variation selector.
    pub fn canonical() -> Result<Self> {
        let mut sequences: Vec<String> = Vec::new();
        for emoji in emojis::iter() {
            sequences.push(emoji.as_str().to_string());
            if let Some(tones) = emoji.skin_tones() {
                sequences.extend(tones.map(|e| e.as_str().to_string()));
            }
        }

        let bare: Vec<String> = sequences
            .iter()
            .filter(|s| s.contains(VARIATION_SELECTOR_16))
            .map(|s| s.replace(VARIATION_SELECTOR_16, ""))
            .filter(|s| !s.is_empty())
            .collect();
        sequences.extend(bare);

        Self::from_sequences(sequences)
    }

    /// Build a matcher from an explicit list of literal sequences.
    pub fn from_sequences<I, S>(sequences: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut literals: Vec<String> = sequences
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        literals.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        literals.dedup();

        // An empty alternation would match everywhere; use a class that
        // never matches instead.
        let pattern = if literals.is_empty() {
            r"[^\s\S]".to_string()
        } else {
            literals
                .iter()
                .map(|s| regex::escape(s))
                .collect::<Vec<_>>()
                .join("|")
        };

        let regex = RegexBuilder::new(&pattern)
            .size_limit(64 * (1 << 20))
            .dfa_size_limit(16 * (1 << 20))
            .build()
            .map_err(|source| FeatureError::Pattern {
                name: "emoji",
                source,
            })?;

        Ok(Self { regex })
    }

    pub fn count(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }

    pub fn remove(&self, text: &str) -> String {
        self.regex.replace_all(text, "").into_owned()
    }

    pub fn find_iter<'a, 't: 'a>(&'a self, text: &'t str) -> impl Iterator<Item = &'t str> + 'a {
        self.regex.find_iter(text).map(|m| m.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_codepoint_sequences_count_once() {
        let matcher = EmojiMatcher::canonical().unwrap();
        // family (ZWJ sequence), flag, thumbs up with skin tone
        let text = "hi 👨\u{200D}👩\u{200D}👧 🇩🇪 👍🏽";
        assert_eq!(matcher.count(text), 3);
        assert_eq!(matcher.remove(text), "hi   ");
    }

    #[test]
    fn test_plain_text_has_no_emoji() {
        let matcher = EmojiMatcher::canonical().unwrap();
        assert_eq!(matcher.count("nothing to see here, 100% text."), 0);
    }

    #[test]
    fn test_custom_sequences() {
        let matcher = EmojiMatcher::from_sequences(["ab", "a"]).unwrap();
        assert_eq!(matcher.find_iter("aab").collect::<Vec<_>>(), vec!["a", "ab"]);
    }

    #[test]
    fn test_empty_list_matches_nothing() {
        let matcher = EmojiMatcher::from_sequences(Vec::<String>::new()).unwrap();
        assert_eq!(matcher.count("anything"), 0);
    }
}
