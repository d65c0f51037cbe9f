// Compiled text patterns: links, tags, numbers, pagination, username shapes.
//
// Every pattern here is compiled exactly once when the RuleSet is built.
// The username and service-profile lists are priority-ordered: the first
// pattern that matches decides the result.

use regex::Regex;

use crate::error::{FeatureError, Result};

/// Username shapes, matched against the whole handle. Index = class code.
pub const USERNAME_STRUCTURES: &[&str] = &[
    // 0: lowercase word
    r"^[a-z]+$",
    // 1: uppercase word
    r"^[A-Z]+$",
    // 2: mixed-case word
    r"^[A-Za-z]+$",
    // 3: digits only
    r"^[0-9]+$",
    // 4: word followed by digits
    r"^[A-Za-z]+[0-9]+$",
    // 5: digits followed by word
    r"^[0-9]+[A-Za-z]+$",
    // 6: underscore-wrapped word
    r"^_+[A-Za-z]+_+$",
    // 7: underscore-wrapped digits
    r"^_+[0-9]+_+$",
    // 8: leading underscores, word
    r"^_+[A-Za-z]+$",
    // 9: word, trailing underscores
    r"^[A-Za-z]+_+$",
    // 10: word_digits
    r"^[A-Za-z]+_+[0-9]+$",
    // 11: digits_word
    r"^[0-9]+_+[A-Za-z]+$",
    // 12: underscore-wrapped word followed by digits
    r"^_+[A-Za-z]+[0-9]+_+$",
    // 13: word_word, any number of parts
    r"^[A-Za-z]+(?:_+[A-Za-z]+)+$",
];

/// Result for a handle matching none of the structures.
pub const NO_STRUCTURE: i32 = -1;

/// Known social-profile URL shapes as (service id, pattern).
pub const SERVICE_PROFILES: &[(u32, &str)] = &[
    (1, r"(?i)^(?:https?://)?(?:www\.|m\.|[a-z]{2}-[a-z]{2}\.)?(?:facebook\.com|fb\.com)/[^/?#\s]+/?"),
    (2, r"(?i)^(?:https?://)?(?:www\.|old\.)?reddit\.com/(?:u|user)/[^/?#\s]+/?"),
    (3, r"(?i)^(?:https?://)?(?:www\.|mobile\.)?(?:twitter\.com|x\.com)/[A-Za-z0-9_]{1,15}/?$"),
    (4, r"(?i)^(?:https?://)?(?:[a-z]{2,3}\.|www\.)?linkedin\.com/(?:in|pub|company)/[^/?#\s]+/?"),
    (5, r"(?i)^(?:https?://)?(?:www\.|m\.)?vk\.com/[^/?#\s]+/?$"),
    (6, r"(?i)^(?:https?://)?(?:www\.)?(?:instagram\.com|instagr\.am)/[^/?#\s]+/?$"),
    (7, r"(?i)^(?:https?://)?(?:www\.)?flickr\.com/(?:photos|people)/[^/?#\s]+/?"),
    (8, r"(?i)^(?:https?://)?(?:www\.)?xing\.com/(?:profile|profiles)/[^/?#\s]+/?"),
    (9, r"(?i)^(?:https?://)?(?:www\.)?about\.me/[^/?#\s]+/?$"),
    (10, r"(?i)^(?:https?://)?[a-z0-9-]+\.tumblr\.com/?$"),
    (11, r"(?i)^(?:https?://)?(?:[a-z]{2}\.|www\.)?pinterest\.[a-z.]+/[^/?#\s]+/?$"),
    (12, r"(?i)^(?:https?://)?(?:www\.|m\.)?youtube\.com/(?:user/|channel/|c/|@)[^/?#\s]+/?"),
];

/// Result for a profile link matching no known service.
pub const NO_SERVICE: u32 = 0;

/// Link shortener domains whose targets are worth resolving.
pub const SHORTENER_DOMAINS: &[&str] = &[
    "bit.ly", "t.co", "goo.gl", "tinyurl.com", "ow.ly", "buff.ly", "dlvr.it", "ift.tt",
    "is.gd", "fb.me", "j.mp", "lnkd.in", "trib.al", "amzn.to", "youtu.be", "bit.do", "t.ly",
    "rebrand.ly", "shorturl.at", "tiny.cc", "cutt.ly", "wp.me", "spoti.fi", "po.st", "su.pr",
    "soo.gd", "s.id", "v.gd", "qr.ae", "mcaf.ee", "adf.ly", "bl.ink", "lc.chat", "ht.ly",
    "tr.im", "snip.ly", "dld.bz", "shar.es",
];

/// Compiled general-purpose text patterns.
#[derive(Debug, Clone)]
pub struct TextPatterns {
    pub url: Regex,
    pub shortener: Regex,
    pub hashtag: Regex,
    pub mention: Regex,
    pub number: Regex,
    pub pagination_leading: Regex,
    pub pagination_trailing: Regex,
    pub word: Regex,
    pub sentence_break: Regex,
    pub source_anchor: Regex,
}

impl TextPatterns {
    pub fn compile() -> Result<Self> {
        let shortener_alternation = SHORTENER_DOMAINS
            .iter()
            .map(|d| regex::escape(d))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            url: compile(
                "url",
                r#"(?i)\b(?:https?://|www\.)[^\s<>"']*[^\s<>"'.,;:!?)\]}]"#,
            )?,
            shortener: compile(
                "shortener",
                &format!(r"(?i)^(?:https?://)?(?:www\.)?(?:{shortener_alternation})(?:[/?#]|$)"),
            )?,
            hashtag: compile("hashtag", r"#(\w+)")?,
            // An `@` glued to a word is an email address, not a mention.
            mention: compile("mention", r"(?:^|[^\w])@(\w{1,15})")?,
            number: compile(
                "number",
                r"\b(?:[0-9]{1,3}(?:[.,][0-9]{3})+(?:[.,][0-9]+)?|[0-9]+(?:[.,][0-9]+)?)\b",
            )?,
            pagination_leading: compile("leading pagination", r"^\s*([0-9]+)\s*/\s*([0-9]+)\b")?,
            pagination_trailing: compile(
                "trailing pagination",
                r"\(?([0-9]+)\s*/\s*([0-9]+)\)?\s*$",
            )?,
            word: compile("word", r"\w+(?:['’\-]\w+)*")?,
            sentence_break: compile("sentence break", r"[.!?…]+(?:\s+|$)|\s*\n\s*")?,
            source_anchor: compile("source anchor", r"(?is)^\s*<a\b[^>]*>(.*?)</a>\s*$")?,
        })
    }
}

pub(crate) fn compile(name: &'static str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| FeatureError::Pattern { name, source })
}

/// Compile the username structure list, preserving priority order.
pub fn compile_username_structures() -> Result<Vec<Regex>> {
    USERNAME_STRUCTURES
        .iter()
        .map(|p| compile("username structure", p))
        .collect()
}

/// Compile the service profile list, preserving priority order.
pub fn compile_service_profiles() -> Result<Vec<(u32, Regex)>> {
    SERVICE_PROFILES
        .iter()
        .map(|(id, p)| Ok((*id, compile("service profile", p)?)))
        .collect()
}
