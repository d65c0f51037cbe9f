// Text normalization: produces the cleaned text the post features read.
//
// The steps run in a fixed order and the order matters for odd inputs:
//   1. HTML-unescape
//   2. strip the platform's own entity URLs (collecting their targets)
//   3. strip any other URL the generic pattern finds
//   4. shortened targets go through the injected UrlResolver
//   5. count and strip emoji
// A URL containing emoji-like characters is removed as a URL before the
// emoji pass ever sees it.

pub mod resolver;
pub mod tokenize;

#[cfg(feature = "http")]
pub mod http;

use tracing::debug;

use crate::lexicon::RuleSet;
use crate::records::EntityUrl;
use resolver::UrlResolver;

/// Output of `normalize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    /// Text after unescaping and URL + emoji removal.
    pub cleaned: String,
    /// Link targets in order of appearance: entity URLs first, then the ones
    /// found by the generic pattern. Shortened links are resolved.
    pub expanded_urls: Vec<String>,
    /// Emoji sequences removed in the last step.
    pub emoji_count: usize,
}

pub fn normalize(
    rules: &RuleSet,
    resolver: &dyn UrlResolver,
    text: &str,
    entity_urls: &[EntityUrl],
) -> NormalizedText {
    let mut working = rules.entities().unescape(text);
    let mut expanded_urls = Vec::new();
    let mut covered: Vec<&str> = Vec::new();

    for entity in entity_urls {
        if !entity.url.is_empty() {
            working = working.replace(entity.url.as_str(), "");
        }
        covered.push(entity.url.as_str());
        covered.push(entity.target());
        expanded_urls.push(expand(rules, resolver, entity.target()));
    }

    let url_pattern = &rules.patterns().url;
    let extra: Vec<String> = url_pattern
        .find_iter(&working)
        .map(|m| m.as_str().to_string())
        .collect();
    if !extra.is_empty() {
        working = url_pattern.replace_all(&working, "").into_owned();
    }
    for url in &extra {
        if covered.contains(&url.as_str()) {
            continue;
        }
        expanded_urls.push(expand(rules, resolver, url));
    }

    let emoji_count = rules.emoji().count(&working);
    let cleaned = if emoji_count > 0 {
        rules.emoji().remove(&working)
    } else {
        working
    };

    NormalizedText {
        cleaned,
        expanded_urls,
        emoji_count,
    }
}

/// Resolve a link if it is on a known shortener, otherwise keep it.
fn expand(rules: &RuleSet, resolver: &dyn UrlResolver, url: &str) -> String {
    if rules.is_shortened(url) {
        let resolved = resolver.resolve(url);
        debug!(url = url, resolved = resolved.as_str(), "Expanded shortened URL");
        resolved
    } else {
        url.to_string()
    }
}

/// Prefix `http://` to scheme-less links so they parse as URLs.
pub fn with_scheme(url: &str) -> String {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}

/// Host of a link, lower-cased and without a leading `www.`.
pub fn host_of(url: &str) -> Option<String> {
    let parsed = url::Url::parse(&with_scheme(url)).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
    (!host.is_empty()).then_some(host)
}

/// Non-empty path segments of a link, lower-cased.
pub fn path_segments_of(url: &str) -> Vec<String> {
    url::Url::parse(&with_scheme(url))
        .ok()
        .and_then(|u| {
            u.path_segments().map(|segments| {
                segments
                    .filter(|s| !s.is_empty())
                    .map(|s| s.to_lowercase())
                    .collect()
            })
        })
        .unwrap_or_default()
}
