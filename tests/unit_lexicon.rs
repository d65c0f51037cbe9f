// Unit tests for the lexical and pattern library.
//
// Tests the lookup tables and classifiers the extractors read:
// username structures, bot words, code tables, service profiles,
// shorteners and the geofence.

use cinder::lexicon::codes::{SOURCE_EMPTY, SOURCE_OTHER, SOURCE_URL};
use cinder::lexicon::emoji::EmojiMatcher;
use cinder::lexicon::geofence::Geofence;
use cinder::RuleSet;

fn rules() -> RuleSet {
    RuleSet::new().unwrap()
}

// ============================================================
// Username structures
// ============================================================

#[test]
fn username_structure_documented_examples() {
    let rules = rules();
    assert_eq!(rules.username_structure("username"), 0);
    assert_eq!(rules.username_structure("USERNAME"), 1);
    assert_eq!(rules.username_structure("123456"), 3);
    assert_eq!(rules.username_structure("__username123__"), 12);
    assert_eq!(rules.username_structure("test_account"), 13);
    assert_eq!(rules.username_structure("__test_123"), -1);
}

#[test]
fn username_structure_priority_order() {
    let rules = rules();
    // "abc" fits both lowercase (0) and mixed-case (2); the first wins
    assert_eq!(rules.username_structure("abc"), 0);
    assert_eq!(rules.username_structure("UserName"), 2);
    assert_eq!(rules.username_structure("user123"), 4);
    assert_eq!(rules.username_structure("123user"), 5);
    assert_eq!(rules.username_structure("user_123"), 10);
    assert_eq!(rules.username_structure("one_two_three"), 13);
}

#[test]
fn username_structure_empty_handle() {
    assert_eq!(rules().username_structure(""), -1);
}

// ============================================================
// Bot words
// ============================================================

#[test]
fn bot_word_in_handle() {
    let rules = rules();
    assert!(rules.contains_bot_word("test_account_bot"));
    assert!(!rules.contains_bot_word("test_account"));
}

#[test]
fn bot_word_is_case_insensitive_substring() {
    let rules = rules();
    assert!(rules.contains_bot_word("NewsBOT"));
    assert!(rules.contains_bot_word("I am a robot account"));
    assert!(!rules.contains_bot_word("Robert"));
}

// ============================================================
// Code tables
// ============================================================

#[test]
fn language_lookup_is_strict() {
    let rules = rules();
    assert!(rules.language_code("en").is_some());
    assert!(rules.language_code("ckb").is_some());
    assert!(rules.language_code("iw").is_some());
    assert!(rules.language_code("klingon").is_none());
    assert!(rules.undefined_language_code().is_some());
}

#[test]
fn kosovo_has_a_country_code() {
    assert!(rules().country_code(Some("XK")) > 0);
}

#[test]
fn source_codes() {
    let rules = rules();
    assert_eq!(rules.source_code("Twitter Web App"), 1);
    assert_eq!(rules.source_code("TweetDeck Web App"), 14);
    assert_eq!(rules.source_code(""), SOURCE_EMPTY);
    assert_eq!(rules.source_code("https://example.com/app"), SOURCE_URL);
    assert_eq!(rules.source_code("My Homemade Poster"), SOURCE_OTHER);
}

// ============================================================
// Service profiles and shorteners
// ============================================================

#[test]
fn service_profile_recognition() {
    let rules = rules();
    assert_eq!(rules.service_profile("https://www.facebook.com/someone"), 1);
    assert_eq!(rules.service_profile("https://reddit.com/u/someone"), 2);
    assert_eq!(rules.service_profile("twitter.com/someone"), 3);
    assert_eq!(rules.service_profile("https://www.instagram.com/someone/"), 6);
    assert_eq!(rules.service_profile("https://www.youtube.com/@someone"), 12);
    assert_eq!(rules.service_profile("https://example.com/someone"), 0);
}

#[test]
fn shortener_detection() {
    let rules = rules();
    assert!(rules.is_shortened("https://bit.ly/abc"));
    assert!(rules.is_shortened("t.co/xyz"));
    assert!(!rules.is_shortened("https://bit.lyrics.com/abc"));
    assert!(!rules.is_shortened("https://example.com/bit.ly"));
}

// ============================================================
// Swappable tables
// ============================================================

#[test]
fn custom_emoji_table_replaces_canonical() {
    let rules = rules().with_emoji(EmojiMatcher::from_sequences(["*"]).unwrap());
    assert_eq!(rules.emoji().count("a * b * c"), 2);
}

#[test]
fn geofence_regions_are_named() {
    let fence = Geofence::standard().unwrap();
    let names: Vec<&str> = fence.regions().iter().map(|r| r.name.as_str()).collect();
    assert!(names.contains(&"europe"));
    assert!(names.contains(&"oceania"));
    assert_eq!(fence.no_region(), fence.regions().len());
}
