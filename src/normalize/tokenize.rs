// Sentence and word tokenization for text statistics.
//
// Sentences end at a run of terminal punctuation followed by whitespace (or
// the end of the text) and at line breaks. Words are runs of word characters,
// optionally joined by apostrophes or hyphens; tokens made only of
// punctuation never count as words.

use crate::lexicon::patterns::TextPatterns;

/// Split text into non-blank sentences.
pub fn sentences<'t>(patterns: &TextPatterns, text: &'t str) -> Vec<&'t str> {
    patterns
        .sentence_break
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Word tokens of a text, punctuation-only tokens excluded.
pub fn words<'t>(patterns: &TextPatterns, text: &'t str) -> Vec<&'t str> {
    patterns.word.find_iter(text).map(|m| m.as_str()).collect()
}

/// Word counts per sentence, in order.
pub fn words_per_sentence(patterns: &TextPatterns, text: &str) -> Vec<usize> {
    sentences(patterns, text)
        .into_iter()
        .map(|s| words(patterns, s).len())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_split() {
        let p = TextPatterns::compile().unwrap();
        let s = sentences(&p, "First one. Second one!! Third?\nFourth line");
        assert_eq!(s, vec!["First one", "Second one", "Third", "Fourth line"]);
    }

    #[test]
    fn test_decimal_point_does_not_split() {
        let p = TextPatterns::compile().unwrap();
        assert_eq!(sentences(&p, "Pi is 3.14 roughly.").len(), 1);
    }

    #[test]
    fn test_punctuation_is_not_a_word() {
        let p = TextPatterns::compile().unwrap();
        assert_eq!(words(&p, "don't stop -- ever !!! well-known"), vec!["don't", "stop", "ever", "well-known"]);
        assert_eq!(words_per_sentence(&p, "One two. -- . Three"), vec![2, 0, 1]);
    }

    #[test]
    fn test_empty_text() {
        let p = TextPatterns::compile().unwrap();
        assert!(sentences(&p, "   ").is_empty());
        assert!(words_per_sentence(&p, "").is_empty());
    }
}
