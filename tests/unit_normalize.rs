// Unit tests for the text normalizer.
//
// Tests the cleaning pipeline end to end with a fixed resolver: entity URL
// removal, generic URL removal, shortened-link expansion, emoji stripping
// and the order those steps run in.

use std::collections::HashMap;

use cinder::normalize::normalize;
use cinder::normalize::resolver::{CachingResolver, IdentityResolver, UrlResolver};
use cinder::records::EntityUrl;
use cinder::RuleSet;

/// Resolver with a fixed answer table; unknown URLs come back unchanged.
struct StubResolver(HashMap<&'static str, &'static str>);

impl UrlResolver for StubResolver {
    fn resolve(&self, url: &str) -> String {
        self.0.get(url).map(|s| s.to_string()).unwrap_or_else(|| url.to_string())
    }
}

fn entity(url: &str, expanded: Option<&str>) -> EntityUrl {
    EntityUrl {
        url: url.to_string(),
        expanded_url: expanded.map(str::to_string),
    }
}

// ============================================================
// URL handling
// ============================================================

#[test]
fn entity_url_removed_and_shortener_resolved() {
    let rules = RuleSet::new().unwrap();
    let resolver = StubResolver(HashMap::from([(
        "https://bit.ly/xyz",
        "https://example.com/article",
    )]));

    let out = normalize(
        &rules,
        &resolver,
        "Check this https://t.co/abc",
        &[entity("https://t.co/abc", Some("https://bit.ly/xyz"))],
    );

    assert_eq!(out.cleaned, "Check this ");
    assert_eq!(out.expanded_urls, vec!["https://example.com/article"]);
    assert_eq!(out.emoji_count, 0);
}

#[test]
fn unlisted_url_found_by_pattern() {
    let rules = RuleSet::new().unwrap();
    let out = normalize(&rules, &IdentityResolver, "read www.example.com/page now", &[]);
    assert_eq!(out.cleaned, "read  now");
    assert_eq!(out.expanded_urls, vec!["www.example.com/page"]);
}

#[test]
fn entity_target_in_text_is_not_counted_twice() {
    let rules = RuleSet::new().unwrap();
    let out = normalize(
        &rules,
        &IdentityResolver,
        "https://t.co/abc aka https://example.com/x",
        &[entity("https://t.co/abc", Some("https://example.com/x"))],
    );
    assert_eq!(out.expanded_urls, vec!["https://example.com/x"]);
    assert_eq!(out.cleaned.trim(), "aka");
}

#[test]
fn non_shortened_links_skip_the_resolver() {
    let rules = RuleSet::new().unwrap();
    let resolver = StubResolver(HashMap::from([(
        "https://example.com/a",
        "https://elsewhere.com/",
    )]));
    let out = normalize(&rules, &resolver, "go https://example.com/a", &[]);
    assert_eq!(out.expanded_urls, vec!["https://example.com/a"]);
}

#[test]
fn shared_cache_across_posts() {
    let rules = RuleSet::new().unwrap();
    let cache = CachingResolver::new(StubResolver(HashMap::from([(
        "https://bit.ly/one",
        "https://example.com/one",
    )])));

    for _ in 0..3 {
        let out = normalize(&rules, &cache, "x https://bit.ly/one", &[]);
        assert_eq!(out.expanded_urls, vec!["https://example.com/one"]);
    }
    assert_eq!(cache.len(), 1);
}

// ============================================================
// Emoji and ordering
// ============================================================

#[test]
fn emoji_counted_and_removed() {
    let rules = RuleSet::new().unwrap();
    let out = normalize(&rules, &IdentityResolver, "good morning \u{2600}\u{FE0F}\u{1F600}", &[]);
    assert_eq!(out.emoji_count, 2);
    assert_eq!(out.cleaned, "good morning ");
}

#[test]
fn emoji_inside_url_goes_with_the_url() {
    let rules = RuleSet::new().unwrap();
    let out = normalize(
        &rules,
        &IdentityResolver,
        "see https://example.com/\u{1F600}path ok",
        &[],
    );
    assert_eq!(out.emoji_count, 0);
    assert_eq!(out.expanded_urls.len(), 1);
    assert_eq!(out.cleaned, "see  ok");
}

#[test]
fn html_entities_unescaped_before_everything() {
    let rules = RuleSet::new().unwrap();
    let out = normalize(&rules, &IdentityResolver, "fish &amp; chips &gt; salad", &[]);
    assert_eq!(out.cleaned, "fish & chips > salad");
    assert!(out.expanded_urls.is_empty());
}
