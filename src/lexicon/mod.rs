// Lexical & pattern library: every table and pattern the extractors read.
//
// Everything is built once by RuleSet::new() and then only read. The
// extractors take a &RuleSet, so tests can swap any single table through
// the with_* methods without touching process-wide state.

pub mod codes;
pub mod emoji;
pub mod entities;
pub mod geofence;
pub mod patterns;

use regex::Regex;

use crate::error::Result;
use codes::{CodeTable, COUNTRY_CODES, KNOWN_SOURCES, LANGUAGE_CODES, UNDEFINED_LANGUAGE};
use emoji::EmojiMatcher;
use entities::EntityTable;
use geofence::Geofence;
use patterns::TextPatterns;

/// Substrings that mark a handle, name or bio as self-declared automation.
pub const BOT_WORDS: &[&str] = &[
    "bot", "b0t", "robot", "roboter", "robô", "robota", "бот", "робот", "ボット", "机器人", "봇",
];

/// The immutable rule set shared by both extractors.
#[derive(Debug, Clone)]
pub struct RuleSet {
    languages: CodeTable,
    countries: CodeTable,
    sources: CodeTable,
    username_structures: Vec<Regex>,
    service_profiles: Vec<(u32, Regex)>,
    patterns: TextPatterns,
    emoji: EmojiMatcher,
    entities: EntityTable,
    geofence: Geofence,
    bot_words: Vec<String>,
}

impl RuleSet {
    /// Build the standard rule set. Compiling the emoji alternation is the
    /// expensive part, so build this once per process and share it.
    pub fn new() -> Result<Self> {
        Ok(Self {
            languages: CodeTable::from_ordered(LANGUAGE_CODES.iter().copied()),
            countries: CodeTable::from_ordered(COUNTRY_CODES.iter().copied()),
            sources: CodeTable::from_ordered(KNOWN_SOURCES.iter().copied()),
            username_structures: patterns::compile_username_structures()?,
            service_profiles: patterns::compile_service_profiles()?,
            patterns: TextPatterns::compile()?,
            emoji: EmojiMatcher::canonical()?,
            entities: EntityTable::standard()?,
            geofence: Geofence::standard()?,
            bot_words: BOT_WORDS.iter().map(|w| w.to_string()).collect(),
        })
    }

    pub fn with_emoji(mut self, emoji: EmojiMatcher) -> Self {
        self.emoji = emoji;
        self
    }

    pub fn with_entities(mut self, entities: EntityTable) -> Self {
        self.entities = entities;
        self
    }

    pub fn with_geofence(mut self, geofence: Geofence) -> Self {
        self.geofence = geofence;
        self
    }

    pub fn with_bot_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bot_words = words.into_iter().map(|w| w.into().to_lowercase()).collect();
        self
    }

    pub fn patterns(&self) -> &TextPatterns {
        &self.patterns
    }

    pub fn emoji(&self) -> &EmojiMatcher {
        &self.emoji
    }

    pub fn entities(&self) -> &EntityTable {
        &self.entities
    }

    pub fn geofence(&self) -> &Geofence {
        &self.geofence
    }

    /// Strict language lookup. `None` means the code is not in the table,
    /// which callers must treat as a data error.
    pub fn language_code(&self, lang: &str) -> Option<u32> {
        self.languages.get(lang)
    }

    pub fn undefined_language_code(&self) -> Option<u32> {
        self.languages.get(UNDEFINED_LANGUAGE)
    }

    /// Country code for a place, `0` for no place or an unlisted code.
    pub fn country_code(&self, country: Option<&str>) -> u32 {
        country
            .map(|c| c.trim().to_ascii_uppercase())
            .and_then(|c| self.countries.get(&c))
            .unwrap_or(codes::NO_COUNTRY)
    }

    /// Code for the posting client: a known client, empty, a link, or other.
    pub fn source_code(&self, source: &str) -> u32 {
        let name = self
            .patterns
            .source_anchor
            .captures(source)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .unwrap_or(source)
            .trim();

        if let Some(code) = self.sources.get(name) {
            code
        } else if name.is_empty() {
            codes::SOURCE_EMPTY
        } else if self.patterns.url.is_match(name) {
            codes::SOURCE_URL
        } else {
            codes::SOURCE_OTHER
        }
    }

    /// Index of the first username structure the handle fully matches, or -1.
    pub fn username_structure(&self, handle: &str) -> i32 {
        self.username_structures
            .iter()
            .position(|re| re.is_match(handle))
            .map(|i| i as i32)
            .unwrap_or(patterns::NO_STRUCTURE)
    }

    /// Id of the first known service the profile link belongs to, or 0.
    pub fn service_profile(&self, url: &str) -> u32 {
        let url = url.trim();
        self.service_profiles
            .iter()
            .find(|(_, re)| re.is_match(url))
            .map(|(id, _)| *id)
            .unwrap_or(patterns::NO_SERVICE)
    }

    pub fn is_shortened(&self, url: &str) -> bool {
        self.patterns.shortener.is_match(url.trim())
    }

    pub fn contains_bot_word(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.bot_words.iter().any(|w| lower.contains(w.as_str()))
    }
}
